pub mod completion;
pub mod lighthouse;
pub mod seo;
