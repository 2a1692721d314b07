//! # Configuration File Loading
//!
//! Loads chatbot settings from TOML or YAML files.
//!
//! Supports automatic format detection based on file extension. Missing
//! sections and fields fall back to the shipped defaults.

use crate::config::ChatbotConfig;
use errors::ConfigError;
use std::path::Path;

/// Configuration file loading error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(String),

    #[error("Failed to parse YAML: {0}")]
    YamlParse(String),

    #[error("Config file has no extension")]
    NoExtension,

    #[error("Unsupported config file format: {0}")]
    UnsupportedFormat(String)
}

impl ConfigFileError {
    /// Attach the offending path, producing the crate-wide error.
    pub fn at(self, path: &Path) -> ConfigError {
        ConfigError::File {
            path: path.display().to_string(),
            reason: self.to_string()
        }
    }
}

/// Load settings from a TOML file.
///
/// ## Usage
/// ```rust,no_run
/// use config::load_from_toml;
/// use std::path::Path;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = load_from_toml(Path::new("chatbot.toml"))?;
///     println!("Model: {}", config.api.model);
///     Ok(())
/// }
/// ```
pub fn load_from_toml(path: &Path) -> Result<ChatbotConfig, ConfigFileError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|_e| ConfigFileError::FileNotFound(path.display().to_string()))?;

    let config: ChatbotConfig =
        toml::from_str(&contents).map_err(|e| ConfigFileError::TomlParse(e.to_string()))?;

    Ok(config)
}

/// Load settings from a YAML file.
pub fn load_from_yaml(path: &Path) -> Result<ChatbotConfig, ConfigFileError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|_e| ConfigFileError::FileNotFound(path.display().to_string()))?;

    let config: ChatbotConfig =
        serde_yaml::from_str(&contents).map_err(|e| ConfigFileError::YamlParse(e.to_string()))?;

    Ok(config)
}

/// Load settings from file, detecting the format from the extension.
///
/// ## Supported Formats
/// - `.toml`: TOML format
/// - `.yaml` / `.yml`: YAML format
pub fn load_from_file(path: &Path) -> Result<ChatbotConfig, ConfigFileError> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or(ConfigFileError::NoExtension)?;

    match extension.to_lowercase().as_str() {
        "toml" => load_from_toml(path),
        "yaml" | "yml" => load_from_yaml(path),
        other => Err(ConfigFileError::UnsupportedFormat(other.to_string()))
    }
}
