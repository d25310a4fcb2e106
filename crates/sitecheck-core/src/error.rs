use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid report {path}: {source}")]
    InvalidReport {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("No Lighthouse JSON reports found in {0}")]
    NoReports(PathBuf),

    #[error("Directory '{0}' does not exist")]
    MissingDirectory(PathBuf),

    #[error("Render error: {0}")]
    Render(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
