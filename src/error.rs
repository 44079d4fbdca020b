//! Error type shared by model loading and projection output

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The snapshot parsed but lacks one or more required top-level keys
    #[error("invalid model file format: missing {}", .missing.join(", "))]
    InvalidFormat { missing: Vec<String> },

    #[error("invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),
}

pub type Result<T> = std::result::Result<T, Error>;
