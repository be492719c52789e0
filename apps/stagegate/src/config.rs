//! # Registry Configuration
//!
//! Loads the step → secret mapping from a TOML file.
//!
//! ```toml
//! storage_key = "stagegate-progress"   # optional
//!
//! [codes]
//! 1 = "yuka"
//! 2 = "sagittaire"
//! ```
//!
//! Without a file the built-in registry and default storage key are used.
//! The configuration is read once at startup and never reloaded.

use serde::Deserialize;
use stagegate_core::primitives::STORAGE_KEY;
use stagegate_core::{CodeRegistry, GateError, is_valid_storage_key};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Maximum size of a configuration file (64 KB).
const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config '{path}': {reason}")]
    Read { path: String, reason: String },

    #[error("Config file too large: {0} bytes")]
    TooLarge(u64),

    #[error("Invalid config: {0}")]
    Parse(String),

    #[error("Invalid step key '{0}': steps are positive integers")]
    StepKey(String),

    #[error(transparent)]
    Registry(#[from] GateError),
}

impl From<ConfigError> for GateError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Registry(inner) => inner,
            ConfigError::Read { path, reason } => {
                GateError::IoError(format!("Cannot read config '{}': {}", path, reason))
            }
            other => GateError::InvalidRegistry(other.to_string()),
        }
    }
}

/// On-disk shape of the configuration file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    storage_key: Option<String>,
    codes: BTreeMap<String, String>,
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// Step → secret mapping.
    pub registry: CodeRegistry,
    /// Key of the durable progress slot.
    pub storage_key: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            registry: CodeRegistry::builtin(),
            storage_key: STORAGE_KEY.to_string(),
        }
    }
}

impl GateConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;

        let mut entries = Vec::with_capacity(raw.codes.len());
        for (key, secret) in raw.codes {
            let step: u32 = key
                .trim()
                .parse()
                .map_err(|_| ConfigError::StepKey(key.clone()))?;
            entries.push((step, secret));
        }
        let registry = CodeRegistry::from_entries(entries)?;

        let storage_key = match raw.storage_key {
            Some(key) if !is_valid_storage_key(&key) => {
                return Err(ConfigError::Parse(format!(
                    "storage_key '{}' must be non-empty, may not start with '.', and may \
                     only contain ASCII letters, digits, '-', '_' and '.'",
                    key
                )));
            }
            Some(key) => key,
            None => STORAGE_KEY.to_string(),
        };

        Ok(Self {
            registry,
            storage_key,
        })
    }

    /// Load configuration from `path`, or fall back to the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            tracing::debug!("No config file given, using built-in registry");
            return Ok(Self::default());
        };

        let read_err = |reason: String| ConfigError::Read {
            path: path.display().to_string(),
            reason,
        };

        let metadata = std::fs::metadata(path).map_err(|e| read_err(e.to_string()))?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::TooLarge(metadata.len()));
        }
        let text = std::fs::read_to_string(path).map_err(|e| read_err(e.to_string()))?;

        let config = Self::from_toml(&text)?;
        tracing::info!(
            path = %path.display(),
            steps = config.registry.total_steps(),
            "Loaded registry configuration"
        );
        Ok(config)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use stagegate_core::Step;

    #[test]
    fn parses_codes_and_key() {
        let config = GateConfig::from_toml(
            r#"
            storage_key = "custom-progress"

            [codes]
            1 = "yuka"
            2 = "sagittaire"
            "#,
        )
        .expect("valid config");

        assert_eq!(config.storage_key, "custom-progress");
        assert_eq!(config.registry.total_steps(), 2);
        assert_eq!(
            config.registry.secret_for(Step(2)).expect("step 2").as_str(),
            "sagittaire"
        );
    }

    #[test]
    fn storage_key_defaults() {
        let config = GateConfig::from_toml("[codes]\n1 = \"yuka\"\n").expect("valid config");
        assert_eq!(config.storage_key, STORAGE_KEY);
    }

    #[test]
    fn storage_key_must_fit_every_backend() {
        for key in ["my progress", "", ".progress", "../progress", "a/b"] {
            let text = format!("storage_key = {:?}\n[codes]\n1 = \"yuka\"\n", key);
            let result = GateConfig::from_toml(&text);
            assert!(matches!(result, Err(ConfigError::Parse(_))), "key {:?} accepted", key);
        }
    }

    #[test]
    fn non_numeric_step_rejected() {
        let result = GateConfig::from_toml("[codes]\none = \"yuka\"\n");
        assert!(matches!(result, Err(ConfigError::StepKey(_))));
    }

    #[test]
    fn gap_rejected_by_registry() {
        let result = GateConfig::from_toml("[codes]\n1 = \"yuka\"\n3 = \"olaf\"\n");
        assert!(matches!(
            result,
            Err(ConfigError::Registry(GateError::InvalidRegistry(_)))
        ));
    }

    #[test]
    fn unknown_fields_rejected() {
        let result = GateConfig::from_toml("secret_mode = true\n[codes]\n1 = \"yuka\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn converts_into_gate_error() {
        let err: GateError = ConfigError::StepKey("x".to_string()).into();
        assert!(matches!(err, GateError::InvalidRegistry(_)));
    }
}
