//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::exitcode;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => exitcode::USAGE,
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => exitcode::IOERR,
                InfraError::Catalog { .. } => exitcode::DATAERR,
                InfraError::Runtime { .. } => exitcode::SOFTWARE,
                InfraError::Application(app) => match app {
                    ApplicationError::MissingSelection(_) | ApplicationError::Domain(_) => {
                        exitcode::USAGE
                    }
                    ApplicationError::Config { .. } => exitcode::CONFIG,
                    ApplicationError::Selector { .. } | ApplicationError::Prompt { .. } => {
                        exitcode::SOFTWARE
                    }
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn given_missing_selection_then_usage_exit_code() {
        let err: CliError = ApplicationError::MissingSelection("No experiment selected".into()).into();
        assert_eq!(err.exit_code(), exitcode::USAGE);
        assert_eq!(err.to_string(), "No experiment selected");
    }

    #[test]
    fn given_invalid_project_name_then_usage_exit_code() {
        let err: CliError = ApplicationError::from(DomainError::EmptyProjectName).into();
        assert_eq!(err.exit_code(), exitcode::USAGE);
    }

    #[test]
    fn given_bad_catalog_then_dataerr_exit_code() {
        let err = CliError::from(InfraError::Catalog {
            path: "catalog.toml".into(),
            message: "expected table".into(),
        });
        assert_eq!(err.exit_code(), exitcode::DATAERR);
    }

    #[test]
    fn given_runtime_failure_then_software_exit_code() {
        let err = CliError::from(InfraError::Runtime {
            message: "start async runtime: no reactor".into(),
        });
        assert_eq!(err.exit_code(), exitcode::SOFTWARE);
        assert_eq!(err.to_string(), "runtime error: start async runtime: no reactor");
    }
}
