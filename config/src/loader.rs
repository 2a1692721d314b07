//! # Environment Variable Loader
//!
//! Overlays configuration from `CHATBOT_*` environment variables.
//!
//! # Naming Convention
//! - `CHATBOT_API_*`: language-model API settings
//! - `CHATBOT_WEB_SEARCH_*`: web search settings
//! - `CHATBOT_UI_*`: widget UI settings
//! - `CHATBOT_FEATURE_*`: feature flags
//! - `CHATBOT_ANALYTICS_*`: analytics settings
//!
//! Unset or blank variables leave the base value untouched. Variables that
//! are set but cannot be parsed are rejected.

use crate::config::{ChatbotConfig, FEATURE_NAMES};
use errors::ConfigError;
use std::env;
use std::fmt::Display;
use std::str::FromStr;

/// Load configuration from environment variables on top of the shipped
/// defaults.
///
/// ## Usage
/// ```rust,no_run
/// use config::load_from_env;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = load_from_env()?;
///     println!("Model: {}", config.api.model);
///     Ok(())
/// }
/// ```
///
/// ## Environment Variables
/// ### API Settings (`CHATBOT_API_*`)
/// - `CHATBOT_API_BASE_URL`: API base URL
/// - `CHATBOT_API_MODEL`: model id
/// - `CHATBOT_API_MAX_TOKENS`: completion token limit
/// - `CHATBOT_API_TEMPERATURE`: sampling temperature
/// - `CHATBOT_API_TOP_P`: nucleus sampling threshold
/// - `CHATBOT_API_KEY_ENV`: name of the variable holding the API key
///
/// ### Web Search Settings
/// - `CHATBOT_WEB_SEARCH_ENABLED`: enable web search (true/false/1/0)
///
/// ### Conversation Settings
/// - `CHATBOT_MAX_HISTORY_LENGTH`, `CHATBOT_CONTEXT_WINDOW`
/// - `CHATBOT_AUTO_SUMMARIZE`, `CHATBOT_PERSISTENCE`
///
/// ### UI Settings (`CHATBOT_UI_*`)
/// - `CHATBOT_UI_POSITION`: bottom-right/bottom-left/top-right/top-left
/// - `CHATBOT_UI_WIDTH`, `CHATBOT_UI_HEIGHT`: CSS lengths
/// - `CHATBOT_UI_ANIMATION_DURATION`: CSS time
/// - `CHATBOT_UI_TYPING_DELAY_MS`: typing indicator delay
/// - `CHATBOT_UI_SCROLL_BEHAVIOR`: smooth/auto/instant
///
/// ### Feature Flags
/// - `CHATBOT_FEATURE_<NAME>` for each flag, e.g.
///   `CHATBOT_FEATURE_VOICE_INPUT`
///
/// ### Analytics Settings
/// - `CHATBOT_ANALYTICS_ENABLED`
pub fn load_from_env() -> Result<ChatbotConfig, ConfigError> {
    apply_env(ChatbotConfig::default())
}

/// Overlay environment variables onto `base`.
pub fn apply_env(mut config: ChatbotConfig) -> Result<ChatbotConfig, ConfigError> {
    let mut changes = Vec::new();

    set_from_env("CHATBOT_API_BASE_URL", &mut config.api.base_url, &mut changes)?;
    set_from_env("CHATBOT_API_MODEL", &mut config.api.model, &mut changes)?;
    set_from_env("CHATBOT_API_MAX_TOKENS", &mut config.api.max_tokens, &mut changes)?;
    set_from_env("CHATBOT_API_TEMPERATURE", &mut config.api.temperature, &mut changes)?;
    set_from_env("CHATBOT_API_TOP_P", &mut config.api.top_p, &mut changes)?;
    set_from_env("CHATBOT_API_KEY_ENV", &mut config.api.api_key_env, &mut changes)?;

    set_bool_from_env(
        "CHATBOT_WEB_SEARCH_ENABLED",
        &mut config.web_search.enabled,
        &mut changes
    )?;

    set_from_env(
        "CHATBOT_MAX_HISTORY_LENGTH",
        &mut config.conversation.max_history_length,
        &mut changes
    )?;
    set_from_env(
        "CHATBOT_CONTEXT_WINDOW",
        &mut config.conversation.context_window,
        &mut changes
    )?;
    set_bool_from_env(
        "CHATBOT_AUTO_SUMMARIZE",
        &mut config.conversation.auto_summarize,
        &mut changes
    )?;
    set_bool_from_env(
        "CHATBOT_PERSISTENCE",
        &mut config.conversation.persistence,
        &mut changes
    )?;

    set_from_env("CHATBOT_UI_POSITION", &mut config.ui.position, &mut changes)?;
    set_from_env("CHATBOT_UI_WIDTH", &mut config.ui.width, &mut changes)?;
    set_from_env("CHATBOT_UI_HEIGHT", &mut config.ui.height, &mut changes)?;
    set_from_env(
        "CHATBOT_UI_ANIMATION_DURATION",
        &mut config.ui.animation_duration,
        &mut changes
    )?;
    set_from_env(
        "CHATBOT_UI_TYPING_DELAY_MS",
        &mut config.ui.typing_delay_ms,
        &mut changes
    )?;
    set_from_env(
        "CHATBOT_UI_SCROLL_BEHAVIOR",
        &mut config.ui.scroll_behavior,
        &mut changes
    )?;

    for name in FEATURE_NAMES {
        let key = format!("CHATBOT_FEATURE_{}", name.to_uppercase());
        if let Some(value) = parse_bool_env(&key)? {
            config.features.set(name, value);
            changes.push(format!("features.{name} = {value}"));
        }
    }

    set_bool_from_env(
        "CHATBOT_ANALYTICS_ENABLED",
        &mut config.analytics.enabled,
        &mut changes
    )?;

    if !changes.is_empty() {
        tracing::info!("Configuration from env: {:?}", changes);
    }

    Ok(config)
}

fn set_from_env<T>(key: &str, slot: &mut T, changes: &mut Vec<String>) -> Result<(), ConfigError>
where
    T: FromStr + Display,
    T::Err: Display
{
    if let Some(value) = parse_env::<T>(key)? {
        changes.push(format!("{key} = {value}"));
        *slot = value;
    }
    Ok(())
}

fn set_bool_from_env(
    key: &str,
    slot: &mut bool,
    changes: &mut Vec<String>
) -> Result<(), ConfigError> {
    if let Some(value) = parse_bool_env(key)? {
        changes.push(format!("{key} = {value}"));
        *slot = value;
    }
    Ok(())
}

fn raw_env(key: &str) -> Result<Option<String>, ConfigError> {
    match env::var(key) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => Ok(Some(raw.trim().to_string())),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidEnvValue {
            key: key.to_string(),
            value: "<non-unicode>".to_string(),
            reason: "value is not valid unicode".to_string()
        })
    }
}

fn parse_env<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display
{
    let Some(raw) = raw_env(key)? else {
        return Ok(None);
    };
    raw.parse::<T>()
        .map(Some)
        .map_err(|e| ConfigError::InvalidEnvValue {
            key: key.to_string(),
            value: raw.clone(),
            reason: e.to_string()
        })
}

fn parse_bool_env(key: &str) -> Result<Option<bool>, ConfigError> {
    let Some(raw) = raw_env(key)? else {
        return Ok(None);
    };
    match raw.to_lowercase().as_str() {
        "true" | "1" => Ok(Some(true)),
        "false" | "0" => Ok(Some(false)),
        _ => Err(ConfigError::InvalidEnvValue {
            key: key.to_string(),
            value: raw,
            reason: "expected true/false/1/0".to_string()
        })
    }
}
