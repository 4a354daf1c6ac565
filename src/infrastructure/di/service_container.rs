//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{CompetitionTree, ExperimentPicker, ProjectService, StepSchedule, TaskRunner};
use crate::config::Settings;
use crate::infrastructure::catalog::InMemoryDataSource;
use crate::infrastructure::traits::{DataSource, Prompter, Selector, SkimSelector, StdinPrompter};
use crate::infrastructure::InfraResult;

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Competition data
    pub source: Arc<dyn DataSource>,

    /// Single-choice picker
    pub selector: Arc<dyn Selector>,

    /// Free-text input
    pub prompter: Arc<dyn Prompter>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    ///
    /// Loads the catalog named by `settings.data_file`, or the sample data.
    pub fn new(settings: Settings) -> InfraResult<Self> {
        let source: Arc<dyn DataSource> = match &settings.data_file {
            Some(path) => Arc::new(InMemoryDataSource::load(path)?),
            None => Arc::new(InMemoryDataSource::sample()),
        };
        Ok(Self::with_deps(
            settings,
            source,
            Arc::new(SkimSelector),
            Arc::new(StdinPrompter),
        ))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        source: Arc<dyn DataSource>,
        selector: Arc<dyn Selector>,
        prompter: Arc<dyn Prompter>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            source,
            selector,
            prompter,
        }
    }

    pub fn tree(&self) -> CompetitionTree {
        CompetitionTree::new(Arc::clone(&self.source))
    }

    pub fn runner(&self) -> TaskRunner {
        TaskRunner::new(StepSchedule::standard(self.settings.step_delay()))
    }

    pub fn projects(&self) -> ProjectService {
        ProjectService::new(
            Arc::clone(&self.prompter),
            Arc::clone(&self.selector),
            self.settings.frameworks.clone(),
        )
    }

    pub fn picker(&self) -> ExperimentPicker {
        ExperimentPicker::new(Arc::clone(&self.selector))
    }
}
