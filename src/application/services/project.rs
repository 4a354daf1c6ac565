//! Project creation flow: name prompt with validation, then framework choice.
//!
//! Nothing is scaffolded on disk; the result is a plan to announce.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{validate_project_name, ProjectName, ProjectPlan, PROJECT_NAME_PLACEHOLDER};
use crate::infrastructure::traits::{InputRequest, Prompter, SelectionItem, Selector};

/// Service for the create-project command.
pub struct ProjectService {
    prompter: Arc<dyn Prompter>,
    selector: Arc<dyn Selector>,
    frameworks: Vec<String>,
}

impl ProjectService {
    pub fn new(
        prompter: Arc<dyn Prompter>,
        selector: Arc<dyn Selector>,
        frameworks: Vec<String>,
    ) -> Self {
        Self {
            prompter,
            selector,
            frameworks,
        }
    }

    pub fn frameworks(&self) -> &[String] {
        &self.frameworks
    }

    /// Collect name and framework, prompting for whatever is missing.
    ///
    /// Returns `Ok(None)` when the user cancels either prompt.
    /// A `name` passed in is validated without re-prompting.
    #[instrument(skip(self))]
    pub fn create(
        &self,
        name: Option<&str>,
        framework: Option<&str>,
    ) -> ApplicationResult<Option<ProjectPlan>> {
        let name = match name {
            Some(raw) => ProjectName::parse(raw)?,
            None => match self.prompt_name()? {
                Some(name) => name,
                None => {
                    debug!("name prompt cancelled");
                    return Ok(None);
                }
            },
        };

        let framework = match framework {
            Some(fw) => fw.to_string(),
            None => match self.choose_framework()? {
                Some(fw) => fw,
                None => {
                    debug!("framework choice cancelled");
                    return Ok(None);
                }
            },
        };

        Ok(Some(ProjectPlan { name, framework }))
    }

    fn prompt_name(&self) -> ApplicationResult<Option<ProjectName>> {
        let request = InputRequest {
            prompt: "Enter a project name".to_string(),
            placeholder: PROJECT_NAME_PLACEHOLDER.to_string(),
        };
        let validate = |text: &str| validate_project_name(text).err().map(|e| e.to_string());

        let raw = self
            .prompter
            .input(&request, &validate)
            .map_err(|message| ApplicationError::Prompt { message })?;

        match raw {
            Some(raw) => Ok(Some(ProjectName::parse(&raw)?)),
            None => Ok(None),
        }
    }

    fn choose_framework(&self) -> ApplicationResult<Option<String>> {
        let items: Vec<SelectionItem> = self
            .frameworks
            .iter()
            .map(|fw| SelectionItem::new(fw.as_str(), fw.as_str()))
            .collect();

        let selected = self
            .selector
            .select_one(&items, "Select a framework: ")
            .map_err(|message| ApplicationError::Selector { message })?;

        Ok(selected.map(|item| item.value))
    }
}
