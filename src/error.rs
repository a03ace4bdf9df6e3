//! Error types for the smoke harness

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Invalid session token: token is empty or missing")]
    InvalidToken,

    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    #[error("{method} {url} failed: {reason}")]
    RequestFailed {
        method: String,
        url: String,
        reason: String,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type HarnessResult<T> = Result<T, HarnessError>;
