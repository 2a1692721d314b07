//! # Configuration System
//!
//! Settings and store of the Data Pizza chatbot widget.
//!
//! This crate provides:
//! - Configuration structures for the widget settings
//! - Environment variable loading (12-factor app principles)
//! - Configuration file loading (TOML/YAML)
//! - Configuration precedence (overrides > env > file > defaults)
//! - Configuration validation
//! - The immutable [`ChatbotStore`] bundling settings, knowledge and prompts

pub mod config;
pub mod file_loader;
pub mod loader;
pub mod precedence;
pub mod secret;
pub mod store;
pub mod validation;

pub use config::{
    AnalyticsConfig, ApiConfig, ChatbotConfig, ConversationConfig, FEATURE_NAMES, FeatureFlags,
    ScrollBehavior, SearchProvider, UiConfig, WebSearchConfig, WidgetPosition
};
pub use file_loader::{ConfigFileError, load_from_file, load_from_toml, load_from_yaml};
pub use loader::{apply_env, load_from_env};
pub use precedence::{merge_config, merge_configs};
pub use secret::{ApiKey, resolve_api_key};
pub use store::{ChatbotStore, LoadOptions, resolve_settings};
pub use validation::validate;
pub use validator::Validate;
