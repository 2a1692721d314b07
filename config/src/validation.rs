//! # Configuration Validation
//!
//! Checks resolved settings before a store is built, using the `validator`
//! crate rules declared on the configuration structures.

use crate::config::ChatbotConfig;
use errors::ConfigError;
use validator::Validate;

/// Validate a resolved configuration.
///
/// ## Usage
/// ```rust,no_run
/// use config::{ChatbotConfig, validate};
///
/// let config = ChatbotConfig::default();
/// match validate(&config) {
///     Ok(()) => println!("Configuration is valid"),
///     Err(error) => println!("Validation error: {error}"),
/// }
/// ```
///
/// ## Validation Rules
/// ### API
/// - `base_url`: absolute http(s) URL
/// - `model`, `api_key_env`: 1-255 characters
/// - `max_tokens`: > 0
/// - `temperature`: finite, 0.0-2.0
/// - `top_p`: finite, 0.0-1.0
///
/// ### Web search
/// - provider `url`: absolute http(s) URL
/// - provider `priority`: >= 1 and unique
/// - `trigger_keywords`: non-empty and unique
///
/// ### Conversation
/// - `max_history_length`, `context_window`: > 0
/// - `context_window` <= `max_history_length`
///
/// ### UI
/// - `width`, `height`: CSS lengths such as `380px` or `80vh`
/// - `animation_duration`: CSS time such as `0.3s`
///
/// ### Analytics
/// - `track_events`: non-empty and unique
pub fn validate(config: &ChatbotConfig) -> Result<(), ConfigError> {
    config.validate().map_err(|e| ConfigError::Validation {
        message: e.to_string()
    })
}
