//! Tunables for action execution, loaded from YAML.

use std::path::Path;

use goap_core::minutes;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionConfig {
    pub cost: CostConfig,
    pub streamlining: StreamliningConfig,
    pub navigation: NavigationConfig,
    pub trace: TraceConfig,
    pub planner: PlannerConfig,
}

/// Cached random cost defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostConfig {
    pub random_window_ticks: u64,
    pub random_min: f32,
    pub random_max: f32,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            random_window_ticks: minutes(15),
            random_min: 0.01,
            random_max: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamliningConfig {
    pub enabled: bool,
}

impl Default for StreamliningConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// How long a "would get stuck" target stays marked unreachable.
    pub unsafe_cooldown_ticks: u64,
    /// Give up stepping aside after this long in the action.
    pub step_aside_limit_ticks: u64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            unsafe_cooldown_ticks: minutes(10),
            step_aside_limit_ticks: minutes(5),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    pub enabled: bool,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub max_expansions: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_expansions: 4096,
        }
    }
}

impl ActionConfig {
    /// Load from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: Some(path.to_path_buf()),
            source,
        })?;
        config.validate()?;
        tracing::info!(path = %path.display(), "loaded action config");
        Ok(config)
    }

    /// Load `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::info!(path = %path.display(), "no action config, using defaults");
            Ok(Self::default())
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|source| ConfigError::Parse { path: None, source })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let cost = &self.cost;
        if !cost.random_min.is_finite() || !cost.random_max.is_finite() {
            return Err(ConfigError::Invalid(
                "cost.random_min and cost.random_max must be finite".into(),
            ));
        }
        if cost.random_min > cost.random_max {
            return Err(ConfigError::Invalid(format!(
                "cost.random_min ({}) is greater than cost.random_max ({})",
                cost.random_min, cost.random_max
            )));
        }
        if self.planner.max_expansions == 0 {
            return Err(ConfigError::Invalid(
                "planner.max_expansions must be positive".into(),
            ));
        }
        Ok(())
    }
}
