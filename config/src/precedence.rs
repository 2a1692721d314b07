//! # Configuration Precedence
//!
//! Merges chatbot settings from multiple sources with precedence rules.
//!
//! # Precedence Order
//! 1. Explicit overrides (highest priority)
//! 2. Environment variables
//! 3. Configuration file
//! 4. Shipped defaults (lowest priority)
//!
//! A field of a higher source replaces the lower one when it differs from
//! the shipped default. Environment variables are applied as an overlay by
//! [`crate::loader::apply_env`] between the file and the override layers.

use crate::config::{
    AnalyticsConfig, ApiConfig, ChatbotConfig, ConversationConfig, FeatureFlags, UiConfig,
    WebSearchConfig
};
use std::fmt::Display;

/// Merge configuration layers, lowest precedence first.
///
/// ## Usage
/// ```rust,no_run
/// use config::{ChatbotConfig, load_from_file, merge_configs};
/// use std::path::Path;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let from_file = load_from_file(Path::new("chatbot.toml"))?;
///     let overrides = ChatbotConfig::default();
///
///     let _config = merge_configs(
///         ChatbotConfig::default(),
///         [("file", from_file), ("cli", overrides)],
///     );
///     Ok(())
/// }
/// ```
pub fn merge_configs<'a>(
    defaults: ChatbotConfig,
    layers: impl IntoIterator<Item = (&'a str, ChatbotConfig)>
) -> ChatbotConfig {
    layers
        .into_iter()
        .fold(defaults, |base, (source_name, layer)| {
            merge_config(base, layer, source_name)
        })
}

/// Merge one layer over `base`, logging every applied change.
pub fn merge_config(
    mut base: ChatbotConfig,
    override_config: ChatbotConfig,
    source_name: &str
) -> ChatbotConfig {
    let shipped = ChatbotConfig::default();
    let mut changes = Vec::new();

    merge_api(&mut base.api, &override_config.api, &shipped.api, &mut changes);
    merge_web_search(
        &mut base.web_search,
        &override_config.web_search,
        &shipped.web_search,
        &mut changes
    );
    merge_conversation(
        &mut base.conversation,
        &override_config.conversation,
        &shipped.conversation,
        &mut changes
    );
    merge_ui(&mut base.ui, &override_config.ui, &shipped.ui, &mut changes);
    merge_features(
        &mut base.features,
        &override_config.features,
        &shipped.features,
        &mut changes
    );
    merge_analytics(
        &mut base.analytics,
        &override_config.analytics,
        &shipped.analytics,
        &mut changes
    );

    if !changes.is_empty() {
        tracing::info!("Configuration from {}: {:?}", source_name, changes);
    }

    base
}

fn merge_value<T: PartialEq + Clone + Display>(
    base: &mut T,
    override_value: &T,
    shipped: &T,
    path: &str,
    changes: &mut Vec<String>
) {
    if override_value != shipped && *override_value != *base {
        changes.push(format!("{path} = {override_value}"));
        base.clone_from(override_value);
    }
}

fn merge_list<T: PartialEq + Clone>(
    base: &mut Vec<T>,
    override_value: &Vec<T>,
    shipped: &Vec<T>,
    path: &str,
    changes: &mut Vec<String>
) {
    if override_value != shipped && *override_value != *base {
        changes.push(format!("{path} = [{} entries]", override_value.len()));
        base.clone_from(override_value);
    }
}

fn merge_api(
    base: &mut ApiConfig,
    override_config: &ApiConfig,
    shipped: &ApiConfig,
    changes: &mut Vec<String>
) {
    merge_value(
        &mut base.base_url,
        &override_config.base_url,
        &shipped.base_url,
        "api.base_url",
        changes
    );
    merge_value(
        &mut base.model,
        &override_config.model,
        &shipped.model,
        "api.model",
        changes
    );
    merge_value(
        &mut base.api_key_env,
        &override_config.api_key_env,
        &shipped.api_key_env,
        "api.api_key_env",
        changes
    );
    if override_config.api_key.is_some() && override_config.api_key != base.api_key {
        changes.push("api.api_key = ***".to_string());
        base.api_key.clone_from(&override_config.api_key);
    }
    merge_value(
        &mut base.max_tokens,
        &override_config.max_tokens,
        &shipped.max_tokens,
        "api.max_tokens",
        changes
    );
    merge_value(
        &mut base.temperature,
        &override_config.temperature,
        &shipped.temperature,
        "api.temperature",
        changes
    );
    merge_value(
        &mut base.top_p,
        &override_config.top_p,
        &shipped.top_p,
        "api.top_p",
        changes
    );
}

fn merge_web_search(
    base: &mut WebSearchConfig,
    override_config: &WebSearchConfig,
    shipped: &WebSearchConfig,
    changes: &mut Vec<String>
) {
    merge_value(
        &mut base.enabled,
        &override_config.enabled,
        &shipped.enabled,
        "web_search.enabled",
        changes
    );
    merge_list(
        &mut base.providers,
        &override_config.providers,
        &shipped.providers,
        "web_search.providers",
        changes
    );
    merge_list(
        &mut base.trigger_keywords,
        &override_config.trigger_keywords,
        &shipped.trigger_keywords,
        "web_search.trigger_keywords",
        changes
    );
}

fn merge_conversation(
    base: &mut ConversationConfig,
    override_config: &ConversationConfig,
    shipped: &ConversationConfig,
    changes: &mut Vec<String>
) {
    merge_value(
        &mut base.max_history_length,
        &override_config.max_history_length,
        &shipped.max_history_length,
        "conversation.max_history_length",
        changes
    );
    merge_value(
        &mut base.context_window,
        &override_config.context_window,
        &shipped.context_window,
        "conversation.context_window",
        changes
    );
    merge_value(
        &mut base.auto_summarize,
        &override_config.auto_summarize,
        &shipped.auto_summarize,
        "conversation.auto_summarize",
        changes
    );
    merge_value(
        &mut base.persistence,
        &override_config.persistence,
        &shipped.persistence,
        "conversation.persistence",
        changes
    );
}

fn merge_ui(
    base: &mut UiConfig,
    override_config: &UiConfig,
    shipped: &UiConfig,
    changes: &mut Vec<String>
) {
    merge_value(
        &mut base.position,
        &override_config.position,
        &shipped.position,
        "ui.position",
        changes
    );
    merge_value(
        &mut base.width,
        &override_config.width,
        &shipped.width,
        "ui.width",
        changes
    );
    merge_value(
        &mut base.height,
        &override_config.height,
        &shipped.height,
        "ui.height",
        changes
    );
    merge_value(
        &mut base.animation_duration,
        &override_config.animation_duration,
        &shipped.animation_duration,
        "ui.animation_duration",
        changes
    );
    merge_value(
        &mut base.typing_delay_ms,
        &override_config.typing_delay_ms,
        &shipped.typing_delay_ms,
        "ui.typing_delay_ms",
        changes
    );
    merge_value(
        &mut base.scroll_behavior,
        &override_config.scroll_behavior,
        &shipped.scroll_behavior,
        "ui.scroll_behavior",
        changes
    );
}

fn merge_features(
    base: &mut FeatureFlags,
    override_config: &FeatureFlags,
    shipped: &FeatureFlags,
    changes: &mut Vec<String>
) {
    for ((name, value), (_, shipped_value)) in override_config.iter().zip(shipped.iter()) {
        if value != shipped_value && Some(value) != base.is_enabled(name) {
            changes.push(format!("features.{name} = {value}"));
            base.set(name, value);
        }
    }
}

fn merge_analytics(
    base: &mut AnalyticsConfig,
    override_config: &AnalyticsConfig,
    shipped: &AnalyticsConfig,
    changes: &mut Vec<String>
) {
    merge_value(
        &mut base.enabled,
        &override_config.enabled,
        &shipped.enabled,
        "analytics.enabled",
        changes
    );
    merge_list(
        &mut base.track_events,
        &override_config.track_events,
        &shipped.track_events,
        "analytics.track_events",
        changes
    );
}
