use thiserror::Error;

use crate::logging::LoggingError;

/// Unified result type for the navigation crate.
pub type Result<T> = std::result::Result<T, NavError>;

/// Errors surfaced by the navigation stack and its runtime.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("invalid navigation state: {0}")]
    InvalidState(&'static str),
    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
