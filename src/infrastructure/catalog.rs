//! Competition catalogs: built-in sample data and TOML catalog files

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::domain::{Competition, Experiment};
use crate::infrastructure::traits::DataSource;
use crate::infrastructure::{InfraError, InfraResult};

/// Immutable in-memory catalog. Built once, read for the process lifetime.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryDataSource {
    competitions: Vec<Competition>,
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    competitions: Vec<RawCompetition>,
}

#[derive(Debug, Deserialize)]
struct RawCompetition {
    name: String,
    #[serde(default)]
    experiments: Vec<RawExperiment>,
}

#[derive(Debug, Deserialize)]
struct RawExperiment {
    name: String,
    score: Option<f64>,
}

impl InMemoryDataSource {
    pub fn new(competitions: Vec<Competition>) -> Self {
        Self { competitions }
    }

    /// Built-in sample catalog.
    pub fn sample() -> Self {
        Self::new(vec![
            Competition::new(
                "Titanic",
                vec![
                    Experiment::new("exp-001-baseline", Some(0.7655)),
                    Experiment::new("exp-002-feature-eng", Some(0.7842)),
                    Experiment::new("exp-003-xgboost", Some(0.8012)),
                ],
            ),
            Competition::new(
                "House Prices",
                vec![
                    Experiment::new("exp-001-linear", Some(0.1234)),
                    Experiment::new("exp-002-random-forest", Some(0.1156)),
                ],
            ),
            Competition::new(
                "Digit Recognizer",
                vec![Experiment::new("exp-001-cnn", Some(0.9912))],
            ),
        ])
    }

    /// Parse a TOML catalog. Order is file order.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let raw: RawCatalog = toml::from_str(content)?;
        let competitions = raw
            .competitions
            .into_iter()
            .map(|c| {
                let experiments = c
                    .experiments
                    .into_iter()
                    .map(|e| Experiment::new(e.name, e.score))
                    .collect();
                Competition::new(c.name, experiments)
            })
            .collect();
        Ok(Self::new(competitions))
    }

    /// Load a TOML catalog file.
    pub fn load(path: &Path) -> InfraResult<Self> {
        debug!("load catalog: {}", path.display());
        let content = std::fs::read_to_string(path)
            .map_err(|e| InfraError::io(format!("read catalog {}", path.display()), e))?;
        Self::from_toml_str(&content).map_err(|e| InfraError::Catalog {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

impl DataSource for InMemoryDataSource {
    fn list_competitions(&self) -> Vec<String> {
        self.competitions.iter().map(|c| c.name.clone()).collect()
    }

    fn list_experiments(&self, competition: &str) -> Vec<Experiment> {
        // First occurrence wins on duplicate names
        self.competitions
            .iter()
            .find(|c| c.name == competition)
            .map(|c| c.experiments.clone())
            .unwrap_or_default()
    }
}
