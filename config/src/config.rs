//! # Configuration Structures
//!
//! Settings of the Data Pizza chatbot widget: language-model API, web
//! search, conversation, UI, feature flags and analytics.
//!
//! All configuration structures:
//! - Use `serde` for serialization/deserialization
//! - Use `validator` for input validation
//! - Default to the values the widget ships with

use crate::secret::ApiKey;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use strum::{Display, EnumString};
use validator::{Validate, ValidationError};

/// Main configuration structure of the chatbot widget.
///
/// ## Usage
/// ```rust,no_run
/// use config::ChatbotConfig;
///
/// let config = ChatbotConfig::default();
/// println!("Model: {}", config.api.model);
/// ```
///
/// ## Fields
/// - `api`: language-model endpoint and sampling parameters
/// - `web_search`: search providers and trigger keywords
/// - `conversation`: history and context window sizes
/// - `ui`: widget geometry and animation
/// - `features`: capability toggles
/// - `analytics`: tracked event names
///
/// ## Validation
/// All nested configurations must pass their own validation rules.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default, PartialEq)]
pub struct ChatbotConfig {
    /// Language-model API configuration
    #[serde(default)]
    #[validate(nested)]
    pub api: ApiConfig,

    /// Web search configuration
    #[serde(default)]
    #[validate(nested)]
    pub web_search: WebSearchConfig,

    /// Conversation management configuration
    #[serde(default)]
    #[validate(nested)]
    pub conversation: ConversationConfig,

    /// Widget UI configuration
    #[serde(default)]
    #[validate(nested)]
    pub ui: UiConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,

    /// Analytics configuration
    #[serde(default)]
    #[validate(nested)]
    pub analytics: AnalyticsConfig
}

/// Language-model API configuration.
///
/// The key itself is never read from or written to configuration files; it
/// is resolved from the environment variable named by `api_key_env`.
///
/// ## Fields
/// - `base_url`: API base URL (default: "https://api.mistral.ai/v1")
/// - `model`: model id (default: "magistral-medium-2507")
/// - `api_key_env`: variable holding the key (default: "MISTRAL_API_KEY")
/// - `max_tokens`: completion token limit, > 0 (default: 1000)
/// - `temperature`: 0.0-2.0 (default: 0.7)
/// - `top_p`: 0.0-1.0 (default: 0.9)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_api_base_url")]
    #[validate(custom(function = "validate_http_url"))]
    pub base_url: String,

    #[serde(default = "default_api_model")]
    #[validate(length(min = 1, max = 255))]
    pub model: String,

    #[serde(default = "default_api_key_env")]
    #[validate(length(min = 1, max = 255))]
    pub api_key_env: String,

    /// Resolved secret, set by the store
    #[serde(skip)]
    pub api_key: Option<ApiKey>,

    #[serde(default = "default_api_max_tokens")]
    #[validate(range(min = 1))]
    pub max_tokens: u32,

    #[serde(default = "default_api_temperature")]
    #[validate(range(min = 0.0, max = 2.0), custom(function = "validate_finite"))]
    pub temperature: f64,

    #[serde(default = "default_api_top_p")]
    #[validate(range(min = 0.0, max = 1.0), custom(function = "validate_finite"))]
    pub top_p: f64
}

fn default_api_base_url() -> String {
    "https://api.mistral.ai/v1".to_string()
}

fn default_api_model() -> String {
    "magistral-medium-2507".to_string()
}

fn default_api_key_env() -> String {
    "MISTRAL_API_KEY".to_string()
}

fn default_api_max_tokens() -> u32 {
    1000
}

fn default_api_temperature() -> f64 {
    0.7
}

fn default_api_top_p() -> f64 {
    0.9
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            model: default_api_model(),
            api_key_env: default_api_key_env(),
            api_key: None,
            max_tokens: default_api_max_tokens(),
            temperature: default_api_temperature(),
            top_p: default_api_top_p()
        }
    }
}

impl ApiConfig {
    /// Chat-completions endpoint derived from `base_url`.
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Web search configuration.
///
/// ## Fields
/// - `enabled`: search before answering (default: false)
/// - `providers`: search backends, tried in ascending `priority`
/// - `trigger_keywords`: words in a user message that call for a search
///
/// ## Validation
/// Provider priorities must be distinct positive integers and trigger
/// keywords must be unique.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[validate(schema(function = "validate_web_search"))]
pub struct WebSearchConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_search_providers")]
    #[validate(nested)]
    pub providers: Vec<SearchProvider>,

    #[serde(default = "default_trigger_keywords")]
    pub trigger_keywords: Vec<String>
}

/// A web search backend.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct SearchProvider {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(custom(function = "validate_http_url"))]
    pub url: String,

    #[validate(range(min = 1))]
    pub priority: u32
}

fn default_search_providers() -> Vec<SearchProvider> {
    vec![
        SearchProvider {
            name: "DuckDuckGo".to_string(),
            url: "https://api.duckduckgo.com/".to_string(),
            priority: 1
        },
        SearchProvider {
            name: "Brave Search".to_string(),
            url: "https://api.search.brave.com/".to_string(),
            priority: 2
        },
    ]
}

fn default_trigger_keywords() -> Vec<String> {
    [
        "ultimo",
        "recente",
        "attuale",
        "nuovo",
        "aggiornamento",
        "versione",
        "notizie",
        "news",
        "latest",
        "release"
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect()
}

impl Default for WebSearchConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            providers: default_search_providers(),
            trigger_keywords: default_trigger_keywords()
        }
    }
}

impl WebSearchConfig {
    /// Providers ordered by ascending priority.
    pub fn providers_by_priority(&self) -> Vec<&SearchProvider> {
        let mut providers: Vec<_> = self.providers.iter().collect();
        providers.sort_by_key(|p| p.priority);
        providers
    }

    /// Whether `text` should trigger a web search: search is enabled and
    /// one of its words is a trigger keyword (case-insensitive).
    pub fn is_triggered_by(&self, text: &str) -> bool {
        if !self.enabled {
            return false;
        }
        let keywords: HashSet<String> = self
            .trigger_keywords
            .iter()
            .map(|k| k.to_lowercase())
            .collect();
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .any(|word| keywords.contains(&word.to_lowercase()))
    }
}

fn validate_web_search(config: &WebSearchConfig) -> Result<(), ValidationError> {
    let mut priorities = HashSet::new();
    for provider in &config.providers {
        if !priorities.insert(provider.priority) {
            return Err(ValidationError::new("duplicate_provider_priority"));
        }
    }
    validate_unique_names(&config.trigger_keywords)
}

/// Conversation management configuration.
///
/// ## Fields
/// - `max_history_length`: messages kept in history (default: 20)
/// - `context_window`: messages sent with each request (default: 10)
/// - `auto_summarize`: summarize history beyond the window (default: true)
/// - `persistence`: persist conversations (default: false)
///
/// ## Validation
/// `context_window` must not exceed `max_history_length`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[validate(schema(function = "validate_context_window"))]
pub struct ConversationConfig {
    #[serde(default = "default_max_history_length")]
    #[validate(range(min = 1))]
    pub max_history_length: u32,

    #[serde(default = "default_context_window")]
    #[validate(range(min = 1))]
    pub context_window: u32,

    #[serde(default = "default_auto_summarize")]
    pub auto_summarize: bool,

    #[serde(default)]
    pub persistence: bool
}

fn default_max_history_length() -> u32 {
    20
}

fn default_context_window() -> u32 {
    10
}

fn default_auto_summarize() -> bool {
    true
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            max_history_length: default_max_history_length(),
            context_window: default_context_window(),
            auto_summarize: default_auto_summarize(),
            persistence: false
        }
    }
}

fn validate_context_window(config: &ConversationConfig) -> Result<(), ValidationError> {
    if config.context_window > config.max_history_length {
        return Err(ValidationError::new("context_window_exceeds_history"));
    }
    Ok(())
}

/// Corner of the page the widget is anchored to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum WidgetPosition {
    #[default]
    BottomRight,
    BottomLeft,
    TopRight,
    TopLeft
}

/// CSS `scroll-behavior` used when new messages arrive.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Auto,
    Instant
}

/// Widget UI configuration.
///
/// ## Fields
/// - `position`: anchoring corner (default: bottom-right)
/// - `width` / `height`: CSS lengths (default: "384px" / "600px")
/// - `animation_duration`: CSS time (default: "300ms")
/// - `typing_delay_ms`: delay of the typing indicator (default: 100)
/// - `scroll_behavior`: (default: smooth)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct UiConfig {
    #[serde(default)]
    pub position: WidgetPosition,

    #[serde(default = "default_ui_width")]
    #[validate(custom(function = "validate_css_length"))]
    pub width: String,

    #[serde(default = "default_ui_height")]
    #[validate(custom(function = "validate_css_length"))]
    pub height: String,

    #[serde(default = "default_ui_animation_duration")]
    #[validate(custom(function = "validate_css_time"))]
    pub animation_duration: String,

    #[serde(default = "default_ui_typing_delay_ms")]
    pub typing_delay_ms: u64,

    #[serde(default)]
    pub scroll_behavior: ScrollBehavior
}

fn default_ui_width() -> String {
    "384px".to_string()
}

fn default_ui_height() -> String {
    "600px".to_string()
}

fn default_ui_animation_duration() -> String {
    "300ms".to_string()
}

fn default_ui_typing_delay_ms() -> u64 {
    100
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            position: WidgetPosition::default(),
            width: default_ui_width(),
            height: default_ui_height(),
            animation_duration: default_ui_animation_duration(),
            typing_delay_ms: default_ui_typing_delay_ms(),
            scroll_behavior: ScrollBehavior::default()
        }
    }
}

/// Capability toggles of the widget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeatureFlags {
    #[serde(default)]
    pub voice_input: bool,

    #[serde(default = "enabled")]
    pub code_highlighting: bool,

    #[serde(default = "enabled")]
    pub markdown_rendering: bool,

    #[serde(default = "enabled")]
    pub emoji_support: bool,

    #[serde(default)]
    pub file_upload: bool,

    #[serde(default)]
    pub export_chat: bool
}

/// Flag names, in declaration order.
pub const FEATURE_NAMES: [&str; 6] = [
    "voice_input",
    "code_highlighting",
    "markdown_rendering",
    "emoji_support",
    "file_upload",
    "export_chat"
];

fn enabled() -> bool {
    true
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            voice_input: false,
            code_highlighting: true,
            markdown_rendering: true,
            emoji_support: true,
            file_upload: false,
            export_chat: false
        }
    }
}

impl FeatureFlags {
    /// State of the named flag, `None` for an unknown name.
    pub fn is_enabled(&self, name: &str) -> Option<bool> {
        self.iter()
            .find(|(flag, _)| *flag == name)
            .map(|(_, value)| value)
    }

    /// `(name, enabled)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, bool)> {
        FEATURE_NAMES.into_iter().zip([
            self.voice_input,
            self.code_highlighting,
            self.markdown_rendering,
            self.emoji_support,
            self.file_upload,
            self.export_chat
        ])
    }

    /// Set the named flag. Returns `false` for an unknown name.
    pub fn set(&mut self, name: &str, value: bool) -> bool {
        let slot = match name {
            "voice_input" => &mut self.voice_input,
            "code_highlighting" => &mut self.code_highlighting,
            "markdown_rendering" => &mut self.markdown_rendering,
            "emoji_support" => &mut self.emoji_support,
            "file_upload" => &mut self.file_upload,
            "export_chat" => &mut self.export_chat,
            _ => return false
        };
        *slot = value;
        true
    }
}

/// Analytics configuration.
///
/// ## Fields
/// - `enabled`: (default: true)
/// - `track_events`: event names reported by the widget, unique
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct AnalyticsConfig {
    #[serde(default = "enabled")]
    pub enabled: bool,

    #[serde(default = "default_track_events")]
    #[validate(custom(function = "validate_unique_names"))]
    pub track_events: Vec<String>
}

fn default_track_events() -> Vec<String> {
    [
        "chat_opened",
        "message_sent",
        "web_search_toggled",
        "minimize_chat",
        "error_occurred"
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect()
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            track_events: default_track_events()
        }
    }
}

impl AnalyticsConfig {
    /// Whether `event` is reported.
    pub fn tracks(&self, event: &str) -> bool {
        self.enabled && self.track_events.iter().any(|e| e == event)
    }
}

// Range rules compare with `<` and `>`, which NaN always passes.
fn validate_finite(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("Non-finite number"))
    }
}

fn validate_http_url(value: &str) -> Result<(), ValidationError> {
    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => Ok(()),
        _ => Err(ValidationError::new("Invalid http(s) URL"))
    }
}

fn validate_css_length(value: &str) -> Result<(), ValidationError> {
    validate_pattern(value, r"^\d+(\.\d+)?(px|rem|em|vh|vw|%)$", "Invalid CSS length")
}

fn validate_css_time(value: &str) -> Result<(), ValidationError> {
    validate_pattern(value, r"^\d+(\.\d+)?(ms|s)$", "Invalid CSS time")
}

fn validate_pattern(value: &str, pattern: &str, code: &'static str) -> Result<(), ValidationError> {
    match Regex::new(pattern) {
        Ok(re) if re.is_match(value) => Ok(()),
        _ => Err(ValidationError::new(code))
    }
}

fn validate_unique_names(values: &[String]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for value in values {
        if value.trim().is_empty() {
            return Err(ValidationError::new("empty_name"));
        }
        if !seen.insert(value.as_str()) {
            return Err(ValidationError::new("duplicate_name"));
        }
    }
    Ok(())
}
