//! Domain layer: entities and business rules
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod project;
pub mod run;

pub use entities::*;
pub use error::DomainError;
pub use project::{validate_project_name, ProjectName, ProjectPlan, PROJECT_NAME_PLACEHOLDER};
pub use run::{ProgressEvent, RunState};
