pub mod error;
pub mod lighthouse;
pub mod site;
pub mod text;

pub use error::{Error, Result};
