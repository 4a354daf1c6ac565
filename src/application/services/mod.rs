//! Application services

pub mod picker;
pub mod project;
pub mod runner;
pub mod tree;

pub use picker::{ExperimentPicker, Selected};
pub use project::ProjectService;
pub use runner::{
    on_cancellation, warn_on_cancellation, CancelHook, RunReport, StepSchedule, TaskRunner,
};
pub use tree::{CompetitionTree, Subscription};
