/// Expansion settings — initial probability, depth guard, and fallback shape.
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Starting substitution probability: high enough for long, richly nested
/// output, strictly below 1 so decay always bites.
pub const DEFAULT_INITIAL_PROBABILITY: f64 = 0.95;

/// Nesting depth past which substitution is switched off.
pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// What an unresolvable reference turns into when its draw succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnresolvedPolicy {
    /// The bare token, spliced in place.
    #[default]
    Literal,
    /// The token wrapped in a one-element nested group.
    Grouped,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpansionConfig {
    #[serde(default = "default_initial_probability")]
    pub initial_probability: f64,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    #[serde(default)]
    pub unresolved: UnresolvedPolicy,
}

fn default_initial_probability() -> f64 {
    DEFAULT_INITIAL_PROBABILITY
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            initial_probability: DEFAULT_INITIAL_PROBABILITY,
            max_depth: DEFAULT_MAX_DEPTH,
            unresolved: UnresolvedPolicy::default(),
        }
    }
}

impl ExpansionConfig {
    pub fn load_from_ron(path: &Path) -> Result<ExpansionConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<ExpansionConfig, ConfigError> {
        let config: ExpansionConfig = ron::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Probability must lie in `[0, 1)` and the depth guard must allow at
    /// least one level.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = self.initial_probability;
        if !(0.0..1.0).contains(&p) {
            return Err(ConfigError::Invalid(format!(
                "initial_probability must be in [0, 1), got {}",
                p
            )));
        }
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
