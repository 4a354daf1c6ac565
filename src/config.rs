//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/compws/compws.toml`
//! 3. Local config: `<workspace>/.compws.toml`
//! 4. Environment variables: `COMPWS_*` prefix

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::expand_env_vars;

/// Raw settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub data_file: Option<PathBuf>,
    pub step_delay_ms: Option<u64>,
    pub frameworks: Option<Vec<String>>,
}

/// Unified configuration for compws.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Catalog TOML replacing the built-in sample data
    pub data_file: Option<PathBuf>,
    /// Delay between progress steps of a simulated run
    pub step_delay_ms: u64,
    /// Frameworks offered when creating a project, in menu order
    pub frameworks: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: None,
            step_delay_ms: 1000,
            frameworks: vec![
                "PyTorch".into(),
                "TensorFlow".into(),
                "scikit-learn".into(),
                "LightGBM".into(),
            ],
        }
    }
}

/// Get the XDG config directory for compws.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "compws").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("compws.toml"))
}

/// Get the path to the local config file in a workspace directory.
pub fn local_config_path(workspace_dir: &Path) -> PathBuf {
    workspace_dir.join(".compws.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Merge arrays with union semantics and negation support, keeping order.
///
/// - Items from overlay are appended to base unless already present
/// - Items prefixed with `!` remove the corresponding item from the result
///
/// # Examples
/// ```ignore
/// merge_array(&["a", "b"], &["c"])       // → ["a", "b", "c"]
/// merge_array(&["a", "b"], &["!a", "c"]) // → ["b", "c"]
/// ```
pub fn merge_array(base: &[String], overlay: &[String]) -> Vec<String> {
    let mut result: Vec<String> = base.to_vec();

    for pattern in overlay {
        if let Some(negated) = pattern.strip_prefix('!') {
            result.retain(|item| item != negated);
        } else if !result.contains(pattern) {
            result.push(pattern.clone());
        }
    }

    result
}

impl Settings {
    /// Delay between progress steps.
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        if let Some(path) = &self.data_file {
            let expanded = expand_env_vars(path.to_string_lossy().as_ref());
            self.data_file = Some(PathBuf::from(expanded));
        }
    }

    /// Apply global config onto defaults: arrays REPLACE.
    fn apply_global(&self, global: &RawSettings) -> Self {
        Self {
            data_file: global.data_file.clone().or_else(|| self.data_file.clone()),
            step_delay_ms: global.step_delay_ms.unwrap_or(self.step_delay_ms),
            frameworks: global
                .frameworks
                .clone()
                .unwrap_or_else(|| self.frameworks.clone()),
        }
    }

    /// Merge local config onto self: scalars override, arrays UNION.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            data_file: overlay.data_file.clone().or_else(|| self.data_file.clone()),
            step_delay_ms: overlay.step_delay_ms.unwrap_or(self.step_delay_ms),
            frameworks: overlay
                .frameworks
                .as_ref()
                .map(|o| merge_array(&self.frameworks, o))
                .unwrap_or_else(|| self.frameworks.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `workspace_dir` - Optional workspace directory for local config
    ///
    /// # Array Merge Semantics
    /// - Defaults → Global: REPLACE
    /// - Global → Local: UNION with `!item` negation
    /// - Any → Env vars: REPLACE
    pub fn load(workspace_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.apply_global(&raw);
            }
        }

        if let Some(workspace) = workspace_dir {
            let local_path = local_config_path(workspace);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply COMPWS_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("COMPWS")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("frameworks")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("data_file") {
            settings.data_file = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get::<u64>("step_delay_ms") {
            settings.step_delay_ms = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("frameworks") {
            settings.frameworks = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# compws configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/compws/compws.toml  (defines your baseline)
#   Local:  <workspace>/.compws.toml      (workspace-specific additions)
#   Env:    COMPWS_* environment variables (explicit overrides)
#
# Array Merge Semantics:
#   Global config REPLACES compiled defaults.
#   Local config UNIONS with global; use "!item" to remove an inherited item:
#     frameworks = ["XGBoost", "!TensorFlow"]

# Catalog of competitions and experiments (default: built-in sample data)
# data_file = "~/kaggle/catalog.toml"

# Delay between progress steps of a simulated run, in milliseconds
# step_delay_ms = 1000

# Frameworks offered by `compws create`
# frameworks = ["PyTorch", "TensorFlow", "scikit-learn", "LightGBM"]
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
