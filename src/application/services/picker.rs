//! Resolving the experiment a command acts on.
//!
//! Names given on the command line are looked up directly; anything missing
//! is picked interactively from the tree.

use std::sync::Arc;

use itertools::Itertools;
use tracing::debug;

use crate::application::services::tree::CompetitionTree;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::TreeNode;
use crate::infrastructure::traits::{SelectionItem, Selector};

/// An experiment together with the competition it was found under.
#[derive(Debug, Clone, PartialEq)]
pub struct Selected {
    pub competition: String,
    pub experiment: TreeNode,
}

pub struct ExperimentPicker {
    selector: Arc<dyn Selector>,
}

impl ExperimentPicker {
    pub fn new(selector: Arc<dyn Selector>) -> Self {
        Self { selector }
    }

    /// Resolve an experiment, prompting for whatever was not given.
    ///
    /// An aborted pick or an unknown name is a missing selection.
    pub fn pick(
        &self,
        tree: &CompetitionTree,
        competition: Option<&str>,
        experiment: Option<&str>,
    ) -> ApplicationResult<Selected> {
        let parent = match competition {
            Some(name) => tree.find_competition(name).ok_or_else(|| {
                ApplicationError::MissingSelection(format!("No competition named '{name}'"))
            })?,
            None => self
                .choose(tree.roots(), "Select a competition: ")?
                .ok_or_else(|| {
                    ApplicationError::MissingSelection("No competition selected".to_string())
                })?,
        };

        let children = tree.children(&parent);
        let node = match experiment {
            Some(name) => children
                .into_iter()
                .find(|n| n.label() == name)
                .ok_or_else(|| {
                    ApplicationError::MissingSelection(format!(
                        "No experiment named '{name}' in '{}'",
                        parent.label()
                    ))
                })?,
            None => self
                .choose(children, "Select an experiment: ")?
                .ok_or_else(|| {
                    ApplicationError::MissingSelection("No experiment selected".to_string())
                })?,
        };

        debug!("picked {} / {}", parent.label(), node.label());
        Ok(Selected {
            competition: parent.label().to_string(),
            experiment: node,
        })
    }

    /// Show read-only rows in the selector; the choice is ignored.
    pub fn show(&self, lines: &[String], prompt: &str) -> ApplicationResult<()> {
        let items = lines
            .iter()
            .map(|l| SelectionItem::new(l.as_str(), l.as_str()))
            .collect_vec();
        self.selector
            .select_one(&items, prompt)
            .map_err(|message| ApplicationError::Selector { message })?;
        Ok(())
    }

    fn choose(&self, nodes: Vec<TreeNode>, prompt: &str) -> ApplicationResult<Option<TreeNode>> {
        let items = nodes
            .iter()
            .map(|n| SelectionItem::new(n.to_string(), n.label()))
            .collect_vec();
        let selected = self
            .selector
            .select_one(&items, prompt)
            .map_err(|message| ApplicationError::Selector { message })?;

        Ok(selected.and_then(|item| nodes.into_iter().find(|n| n.label() == item.value)))
    }
}
