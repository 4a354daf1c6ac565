//! Project naming rules

use std::fmt;

use crate::domain::DomainError;

/// Placeholder suggested when prompting for a project name.
pub const PROJECT_NAME_PLACEHOLDER: &str = "my-kaggle-project";

/// A validated project name: non-empty, no whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        validate_project_name(input)?;
        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Check a raw project name.
pub fn validate_project_name(input: &str) -> Result<(), DomainError> {
    if input.is_empty() {
        return Err(DomainError::EmptyProjectName);
    }
    if input.chars().any(char::is_whitespace) {
        return Err(DomainError::WhitespaceInProjectName(input.to_string()));
    }
    Ok(())
}

/// A project about to be created: name plus chosen framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPlan {
    pub name: ProjectName,
    pub framework: String,
}

impl ProjectPlan {
    /// User-facing confirmation message.
    pub fn announcement(&self) -> String {
        format!(
            "Project '{}' will be created with the {} framework!",
            self.name, self.framework
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_valid_name_when_parsing_then_ok() {
        let name = ProjectName::parse(PROJECT_NAME_PLACEHOLDER).unwrap();
        assert_eq!(name.as_str(), "my-kaggle-project");
    }

    #[test]
    fn given_empty_name_when_parsing_then_rejected() {
        assert!(matches!(
            ProjectName::parse(""),
            Err(DomainError::EmptyProjectName)
        ));
    }

    #[test]
    fn given_name_with_space_or_tab_when_parsing_then_rejected() {
        for raw in ["my project", "my\tproject", " leading", "trailing "] {
            assert!(
                matches!(
                    ProjectName::parse(raw),
                    Err(DomainError::WhitespaceInProjectName(_))
                ),
                "should reject {raw:?}"
            );
        }
    }

    #[test]
    fn test_announcement() {
        let plan = ProjectPlan {
            name: ProjectName::parse("titanic-v2").unwrap(),
            framework: "LightGBM".into(),
        };
        assert_eq!(
            plan.announcement(),
            "Project 'titanic-v2' will be created with the LightGBM framework!"
        );
    }
}
