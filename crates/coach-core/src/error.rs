//! Error types for Coach

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No transaction data found: {0}")]
    MissingData(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Advisor unavailable: {0}")]
    AdvisorUnavailable(String),

    #[error("Advisor provider error: {0}")]
    AdvisorProvider(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
