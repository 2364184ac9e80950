//! Error taxonomy.
//!
//! Per-query resolution never surfaces these to the caller — every query path
//! terminates in an answer string. Errors exist for initialization (config,
//! dataset load, sink open) and for the provider boundary, where they are
//! caught and converted to the fixed apology.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AskDeskError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Feedback store error: {0}")]
    Feedback(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AskDeskError>;
