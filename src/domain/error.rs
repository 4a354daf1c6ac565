//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent business rule violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Please enter a name")]
    EmptyProjectName,

    #[error("Spaces are not allowed: {0:?}")]
    WhitespaceInProjectName(String),

    #[error("invalid state transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}
