//! Domain entities: core data structures

use std::fmt;

/// A single named run with an optional score.
#[derive(Debug, Clone, PartialEq)]
pub struct Experiment {
    pub name: String,
    pub score: Option<f64>,
}

impl Experiment {
    pub fn new(name: impl Into<String>, score: Option<f64>) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// A named grouping of experiments, e.g. a machine-learning contest.
#[derive(Debug, Clone, PartialEq)]
pub struct Competition {
    /// Unique key among competitions
    pub name: String,
    /// Experiments in insertion order
    pub experiments: Vec<Experiment>,
}

impl Competition {
    pub fn new(name: impl Into<String>, experiments: Vec<Experiment>) -> Self {
        Self {
            name: name.into(),
            experiments,
        }
    }
}

/// What a tree node projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Competition,
    Experiment,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Competition => "competition",
            NodeKind::Experiment => "experiment",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transient view projection of a competition or an experiment.
///
/// Nodes are produced fresh on every tree query and never cached.
/// Competition nodes are always expandable, experiment nodes never are;
/// the constructors are the only way to build one, so the invariant holds.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    label: String,
    kind: NodeKind,
    expandable: bool,
    score: Option<f64>,
}

impl TreeNode {
    /// Root node for a competition: expandable, no score.
    pub fn competition(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: NodeKind::Competition,
            expandable: true,
            score: None,
        }
    }

    /// Leaf node for an experiment, carrying its score if present.
    pub fn experiment(experiment: &Experiment) -> Self {
        Self {
            label: experiment.name.clone(),
            kind: NodeKind::Experiment,
            expandable: false,
            score: experiment.score,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_expandable(&self) -> bool {
        self.expandable
    }

    pub fn score(&self) -> Option<f64> {
        self.score
    }

    /// Secondary text shown next to the label: `Score: 0.8012`.
    pub fn description(&self) -> Option<String> {
        match self.kind {
            NodeKind::Competition => None,
            NodeKind::Experiment => self.score.map(|s| format!("Score: {}", format_score(s))),
        }
    }

    pub fn tooltip(&self) -> &str {
        &self.label
    }

    /// Context value used by hosts to decide which commands apply to a node.
    pub fn context_value(&self) -> &'static str {
        self.kind.as_str()
    }

    pub fn icon(&self) -> &'static str {
        match self.kind {
            NodeKind::Competition => "📁",
            NodeKind::Experiment => "◆",
        }
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon(), self.label)?;
        if let Some(desc) = self.description() {
            write!(f, "  {desc}")?;
        }
        Ok(())
    }
}

/// Format a score with exactly 4 fixed-point decimals.
///
/// Rounds half away from zero at the 4th decimal, e.g. `0.79999` → `"0.8000"`.
pub fn format_score(score: f64) -> String {
    let scaled = score * 10_000.0;
    // Scores this large have no fractional digits left to round
    let rounded = if scaled.is_finite() {
        scaled.round() / 10_000.0
    } else {
        score
    };
    // Negative values that round to zero print unsigned
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded:.4}")
}

/// Expand environment variables and tilde in a string.
///
/// Supports: `~`, `$VAR`, `${VAR}`.
/// Unknown variables are left unexpanded.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_competition_node_then_expandable_without_score() {
        let node = TreeNode::competition("Titanic");
        assert!(node.is_expandable());
        assert_eq!(node.kind(), NodeKind::Competition);
        assert_eq!(node.score(), None);
        assert_eq!(node.description(), None);
        assert_eq!(node.context_value(), "competition");
    }

    #[test]
    fn given_experiment_with_score_then_leaf_with_description() {
        let node = TreeNode::experiment(&Experiment::new("exp-003-xgboost", Some(0.8012)));
        assert!(!node.is_expandable());
        assert_eq!(node.description(), Some("Score: 0.8012".to_string()));
        assert_eq!(node.tooltip(), "exp-003-xgboost");
    }

    #[test]
    fn given_experiment_without_score_then_no_description() {
        let node = TreeNode::experiment(&Experiment::new("exp-004-draft", None));
        assert_eq!(node.description(), None);
        assert_eq!(node.to_string(), "◆ exp-004-draft");
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0.8), "0.8000");
        assert_eq!(format_score(0.79999), "0.8000");
        assert_eq!(format_score(0.8012), "0.8012");
        assert_eq!(format_score(0.12345678), "0.1235");
        assert_eq!(format_score(-0.79999), "-0.8000");
        assert_eq!(format_score(12.0), "12.0000");
    }

    #[test]
    fn given_huge_finite_score_then_formats_all_digits() {
        let formatted = format_score(1e305);
        assert!(!formatted.contains("inf"));
        assert!(formatted.ends_with(".0000"));
        assert_eq!(formatted, format!("{:.4}", 1e305_f64));
        assert_eq!(format_score(-1e305), format!("-{formatted}"));
    }

    #[test]
    fn given_tiny_negative_score_then_no_negative_zero() {
        assert_eq!(format_score(-0.00001), "0.0000");
        assert_eq!(format_score(-0.0), "0.0000");
        assert_eq!(format_score(-0.00012), "-0.0001");
    }
}
