/// `load_config` module: Loads the optional YAML config of the CLI and applies environment overrides.
///
/// # Responsibilities
/// - Parse the user-supplied YAML file into [`CliConfig`]
/// - Fall back to defaults when no file is given
/// - Let `JDI_DEFAULT_LANGUAGE` override the file
///
/// # Errors
/// All errors in this module use `anyhow::Error` and are surfaced at the CLI boundary.
///
/// Accepted YAML:
///
/// ```yaml
/// default_language: ts
/// ```
use anyhow::Result;
use jdi_core::classify::DEFAULT_LANGUAGE;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{error, info};

/// Environment variable overriding `default_language`.
pub const DEFAULT_LANGUAGE_ENV: &str = "JDI_DEFAULT_LANGUAGE";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Fence annotation for source files without an extension.
    #[serde(default = "default_language")]
    pub default_language: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
        }
    }
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// Loads the config file if one is given, then applies environment overrides.
pub fn load_config(path: Option<&Path>) -> Result<CliConfig> {
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => {
            info!("No config file given, using defaults");
            CliConfig::default()
        }
    };

    if let Ok(language) = std::env::var(DEFAULT_LANGUAGE_ENV) {
        info!(env = DEFAULT_LANGUAGE_ENV, language = %language, "Default language overridden from env");
        config.default_language = language;
    }

    info!(default_language = %config.default_language, "Config loaded");
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<CliConfig> {
    info!(config_path = ?path, "Loading configuration from file");

    let config_content = match fs::read_to_string(path) {
        Ok(content) => {
            info!(config_path = ?path, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path,
                e
            ));
        }
    };

    // An empty file is a valid config with all defaults.
    if config_content.trim().is_empty() {
        return Ok(CliConfig::default());
    }

    match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path, "Parsed config YAML successfully");
            Ok(conf)
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path, "Failed to parse config YAML");
            Err(anyhow::anyhow!("Failed to parse config YAML: {e}"))
        }
    }
}
