//! Generator configuration, loadable from TOML.

use std::fs;
use std::path::Path;

use mcq_formatter::FractionStyle;
use mcq_math::CommonDenominator;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Retry cap shared by instance samplers and distractor fallbacks.
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Attempts before a sampler falls back to its known-good instance.
    pub max_attempts: usize,
    /// Display of improper answers in the fraction family.
    pub fraction_style: FractionStyle,
    /// Overrides every level's common-denominator strategy when set.
    pub common_denominator: Option<CommonDenominator>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            fraction_style: FractionStyle::Mixed,
            common_denominator: None,
        }
    }
}

impl GeneratorConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.max_attempts = config.max_attempts.max(1);
        Ok(config)
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    /// Like [`GeneratorConfig::load`], but logs and falls back to defaults
    /// on a broken file.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    target: "config",
                    path = %path.as_ref().display(),
                    error = %e,
                    "using default generator config"
                );
                Self::default()
            }
        }
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_means_defaults() {
        let config = GeneratorConfig::from_toml_str("").expect("parse");
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.max_attempts, 100);
    }

    #[test]
    fn partial_overrides() {
        let config = GeneratorConfig::from_toml_str(
            "max_attempts = 25\nfraction_style = \"improper\"\ncommon_denominator = \"cross_multiply\"\n",
        )
        .expect("parse");
        assert_eq!(config.max_attempts, 25);
        assert_eq!(config.fraction_style, FractionStyle::Improper);
        assert_eq!(config.common_denominator, Some(CommonDenominator::CrossMultiply));
    }

    #[test]
    fn zero_attempts_is_clamped() {
        let config = GeneratorConfig::from_toml_str("max_attempts = 0").expect("parse");
        assert_eq!(config.max_attempts, 1);
    }

    #[test]
    fn rejects_unknown_style() {
        let err = GeneratorConfig::from_toml_str("fraction_style = \"decimal\"");
        assert!(matches!(err, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn toml_round_trip() {
        let config = GeneratorConfig {
            max_attempts: 10,
            fraction_style: FractionStyle::Improper,
            common_denominator: Some(CommonDenominator::Lcm),
        };
        let text = config.to_toml_string().expect("serialize");
        assert_eq!(GeneratorConfig::from_toml_str(&text).expect("parse"), config);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = GeneratorConfig::load("definitely/not/here/mcq.toml").expect("load");
        assert_eq!(config, GeneratorConfig::default());
    }
}
