//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// A command needed a selected node and none was given.
    #[error("{0}")]
    MissingSelection(String),

    #[error("selector failed: {message}")]
    Selector { message: String },

    #[error("prompt failed: {message}")]
    Prompt { message: String },

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
