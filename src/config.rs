//! Configuration for modifier chain application.
//!
//! The defaults place no limit on value counts. Limits can be tightened for
//! untrusted rules or loaded from YAML alongside other engine settings.
//!
//! # Examples
//!
//! ```rust
//! use sigma_modifiers::ModifierConfig;
//!
//! let config = ModifierConfig::default().with_max_values(128);
//! assert!(config.validate().is_ok());
//!
//! let config = ModifierConfig::from_yaml_str("max_values: 512\n").unwrap();
//! assert_eq!(config.max_values, 512);
//! ```

use crate::error::{ModifierError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings applied when running modifier chains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModifierConfig {
    /// Maximum number of values a detection item may hold before the chain
    /// runs and after any chain step. Unbounded (`usize::MAX`) by default.
    ///
    /// Modifiers such as `base64offset` multiply the value count; setting a
    /// limit keeps a single untrusted rule from expanding without bound.
    pub max_values: usize,

    /// Minimum batch size before `apply_all` spreads work across threads.
    pub parallel_threshold: usize,
}

impl Default for ModifierConfig {
    fn default() -> Self {
        Self {
            max_values: usize::MAX,
            parallel_threshold: 64,
        }
    }
}

impl ModifierConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tight limits for rules from untrusted sources.
    pub fn strict() -> Self {
        Self {
            max_values: 256,
            parallel_threshold: 64,
        }
    }

    /// No value limit and eager parallelism for large curated rule sets.
    pub fn permissive() -> Self {
        Self {
            max_values: usize::MAX,
            parallel_threshold: 16,
        }
    }

    pub fn with_max_values(mut self, max_values: usize) -> Self {
        self.max_values = max_values;
        self
    }

    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_values == 0 {
            return Err(ModifierError::Config(
                "max_values must be greater than 0".to_string(),
            ));
        }
        if self.parallel_threshold == 0 {
            return Err(ModifierError::Config(
                "parallel_threshold must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a YAML document. Missing keys take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ModifierConfig::default();
        assert_eq!(config.max_values, usize::MAX);
        assert_eq!(config.parallel_threshold, 64);
        assert!(config.validate().is_ok());
        assert_eq!(ModifierConfig::new(), config);
    }

    #[test]
    fn test_presets() {
        assert!(ModifierConfig::strict().max_values < ModifierConfig::default().max_values);
        assert_eq!(ModifierConfig::permissive().max_values, usize::MAX);
        assert!(
            ModifierConfig::permissive().parallel_threshold
                < ModifierConfig::default().parallel_threshold
        );
        assert!(ModifierConfig::strict().validate().is_ok());
        assert!(ModifierConfig::permissive().validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = ModifierConfig::new()
            .with_max_values(10)
            .with_parallel_threshold(2);
        assert_eq!(config.max_values, 10);
        assert_eq!(config.parallel_threshold, 2);
    }

    #[test]
    fn test_validation_errors() {
        let err = ModifierConfig::new().with_max_values(0).validate().unwrap_err();
        assert!(matches!(err, ModifierError::Config(_)));

        let err = ModifierConfig::new()
            .with_parallel_threshold(0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("parallel_threshold"));
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = ModifierConfig::from_yaml_str("parallel_threshold: 8\n").unwrap();
        assert_eq!(config.parallel_threshold, 8);
        assert_eq!(config.max_values, usize::MAX);
    }

    #[test]
    fn test_from_yaml_rejects_invalid() {
        assert!(ModifierConfig::from_yaml_str("max_values: 0\n").is_err());
        assert!(ModifierConfig::from_yaml_str("max_values: [1, 2]\n").is_err());
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_values: 100").unwrap();
        writeln!(file, "parallel_threshold: 4").unwrap();

        let config = ModifierConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config, ModifierConfig::new().with_max_values(100).with_parallel_threshold(4));
    }

    #[test]
    fn test_from_missing_file() {
        let err = ModifierConfig::from_yaml_file("/nonexistent/modifiers.yml").unwrap_err();
        assert!(matches!(err, ModifierError::Config(_)));
    }
}
