//! Tests for resolving the experiment a command acts on

use std::sync::{Arc, Mutex};

use compws::application::services::{CompetitionTree, ExperimentPicker};
use compws::application::ApplicationError;
use compws::infrastructure::catalog::InMemoryDataSource;
use compws::infrastructure::traits::{SelectionItem, Selector};

/// Selector that picks items by value, one script entry per call.
struct ScriptedSelector {
    picks: Mutex<Vec<Option<&'static str>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedSelector {
    fn new(mut picks: Vec<Option<&'static str>>) -> Self {
        picks.reverse();
        Self {
            picks: Mutex::new(picks),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

impl Selector for ScriptedSelector {
    fn select_one(
        &self,
        items: &[SelectionItem],
        prompt: &str,
    ) -> Result<Option<SelectionItem>, String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let pick = self.picks.lock().unwrap().pop().flatten();
        Ok(pick.and_then(|value| items.iter().find(|i| i.value == value).cloned()))
    }
}

fn sample_tree() -> CompetitionTree {
    CompetitionTree::new(Arc::new(InMemoryDataSource::sample()))
}

#[test]
fn given_both_names_when_picking_then_no_interaction() {
    let selector = Arc::new(ScriptedSelector::new(vec![]));
    let picker = ExperimentPicker::new(selector.clone());

    let selected = picker
        .pick(&sample_tree(), Some("Titanic"), Some("exp-003-xgboost"))
        .unwrap();

    assert_eq!(selected.competition, "Titanic");
    assert_eq!(selected.experiment.label(), "exp-003-xgboost");
    assert_eq!(selected.experiment.score(), Some(0.8012));
    assert!(selector.prompts.lock().unwrap().is_empty());
}

#[test]
fn given_no_names_when_picking_then_competition_then_experiment_selected() {
    let selector = Arc::new(ScriptedSelector::new(vec![
        Some("House Prices"),
        Some("exp-001-linear"),
    ]));
    let picker = ExperimentPicker::new(selector.clone());

    let selected = picker.pick(&sample_tree(), None, None).unwrap();

    assert_eq!(selected.competition, "House Prices");
    assert_eq!(selected.experiment.label(), "exp-001-linear");
    assert_eq!(selector.prompts.lock().unwrap().len(), 2);
}

#[test]
fn given_aborted_pick_when_picking_then_missing_selection() {
    let selector = Arc::new(ScriptedSelector::new(vec![Some("Titanic"), None]));
    let picker = ExperimentPicker::new(selector);

    let err = picker.pick(&sample_tree(), None, None).unwrap_err();

    match err {
        ApplicationError::MissingSelection(msg) => assert_eq!(msg, "No experiment selected"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn given_unknown_competition_when_picking_then_missing_selection() {
    let picker = ExperimentPicker::new(Arc::new(ScriptedSelector::new(vec![])));

    let err = picker
        .pick(&sample_tree(), Some("nonexistent"), None)
        .unwrap_err();

    assert!(matches!(err, ApplicationError::MissingSelection(_)));
}

#[test]
fn given_unknown_experiment_when_picking_then_missing_selection() {
    let picker = ExperimentPicker::new(Arc::new(ScriptedSelector::new(vec![])));

    let err = picker
        .pick(&sample_tree(), Some("Digit Recognizer"), Some("exp-404"))
        .unwrap_err();

    assert!(
        matches!(err, ApplicationError::MissingSelection(ref msg) if msg.contains("exp-404"))
    );
}

#[test]
fn given_detail_rows_when_showing_then_passed_to_selector() {
    let selector = Arc::new(ScriptedSelector::new(vec![None]));
    let picker = ExperimentPicker::new(selector.clone());
    let tree = sample_tree();
    let lines = tree.detail_lines("Digit Recognizer", "exp-001-cnn").unwrap();

    picker.show(&lines, "exp-001-cnn: ").unwrap();

    assert_eq!(
        *selector.prompts.lock().unwrap(),
        vec!["exp-001-cnn: ".to_string()]
    );
    assert_eq!(lines[2], "Score: 0.9912");
}
