//! # Chatbot Store
//!
//! The immutable bundle handed to the widget: resolved settings, the
//! knowledge base and the system prompts rendered from it.
//!
//! Everything is built once by [`ChatbotStore::load`]. Consumers share the
//! result through [`ChatbotStore::into_shared`].

use crate::config::ChatbotConfig;
use crate::file_loader::load_from_file;
use crate::loader::apply_env;
use crate::precedence::merge_config;
use crate::secret::{ApiKey, resolve_api_key};
use crate::validation::validate;
use errors::ConfigError;
use knowledge::{KnowledgeBase, PromptContext, SystemPrompts, load_knowledge};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Inputs of [`ChatbotStore::load`]. Every field is optional.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Settings file (TOML or YAML)
    pub config_path: Option<PathBuf>,

    /// Knowledge base file (JSON, TOML or YAML)
    pub knowledge_path: Option<PathBuf>,

    /// Highest-precedence settings, typically from command-line flags
    pub overrides: Option<ChatbotConfig>,

    /// Key supplied by the caller instead of the environment
    pub api_key: Option<ApiKey>
}

impl LoadOptions {
    pub fn with_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn with_knowledge(mut self, path: impl Into<PathBuf>) -> Self {
        self.knowledge_path = Some(path.into());
        self
    }

    pub fn with_overrides(mut self, overrides: ChatbotConfig) -> Self {
        self.overrides = Some(overrides);
        self
    }

    pub fn with_api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }
}

/// Settings, knowledge base and system prompts of the chatbot.
///
/// ## Usage
/// ```rust,no_run
/// use config::{ChatbotStore, LoadOptions};
/// use knowledge::PromptContext;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = ChatbotStore::load(LoadOptions::default())?.into_shared();
///     println!("Model: {}", store.settings().api.model);
///     println!("{}", store.prompt(PromptContext::General));
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ChatbotStore {
    settings: ChatbotConfig,
    knowledge: KnowledgeBase,
    prompts: SystemPrompts
}

impl ChatbotStore {
    /// Build the store from defaults, the optional files, the environment
    /// and the caller's overrides, then resolve the API key.
    ///
    /// Fails with `MissingSecret` when no key is available.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut settings = resolve_settings(&options)?;
        let key = resolve_api_key(options.api_key, &settings.api.api_key_env)?;
        settings.api.api_key = Some(key);

        let knowledge = load_knowledge(options.knowledge_path.as_deref())?;
        let store = Self::assemble(settings, knowledge)?;

        info!(
            "Chatbot store loaded: model={}, web_search={}, contexts={}",
            store.settings.api.model,
            store.settings.web_search.enabled,
            store.prompts.iter().count()
        );
        Ok(store)
    }

    /// The store built from shipped values only. Reads neither the
    /// environment nor any file.
    pub fn shipped(api_key: ApiKey) -> Result<Self, ConfigError> {
        let mut settings = ChatbotConfig::default();
        settings.api.api_key = Some(api_key);
        Self::assemble(settings, KnowledgeBase::default())
    }

    fn assemble(settings: ChatbotConfig, knowledge: KnowledgeBase) -> Result<Self, ConfigError> {
        let prompts = SystemPrompts::build(&knowledge)?;
        Ok(Self {
            settings,
            knowledge,
            prompts
        })
    }

    pub fn settings(&self) -> &ChatbotConfig {
        &self.settings
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn prompts(&self) -> &SystemPrompts {
        &self.prompts
    }

    pub fn prompt(&self, context: PromptContext) -> &str {
        self.prompts.get(context)
    }

    /// Prompt matching the web search setting.
    pub fn system_prompt(&self) -> &str {
        self.prompts.for_web_search(self.settings.web_search.enabled)
    }

    pub fn api_key(&self) -> Option<&ApiKey> {
        self.settings.api.api_key.as_ref()
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

/// Resolve and validate settings without requiring an API key.
///
/// Precedence, lowest first: shipped defaults, settings file, `CHATBOT_*`
/// environment variables, `options.overrides`.
pub fn resolve_settings(options: &LoadOptions) -> Result<ChatbotConfig, ConfigError> {
    let mut settings = ChatbotConfig::default();

    if let Some(path) = &options.config_path {
        debug!("Loading settings file {}", path.display());
        let from_file = load_from_file(path).map_err(|e| e.at(path))?;
        settings = merge_config(settings, from_file, "file");
    }

    settings = apply_env(settings)?;

    if let Some(overrides) = &options.overrides {
        settings = merge_config(settings, overrides.clone(), "overrides");
    }

    validate(&settings)?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use knowledge::SECTION_NAMES;
    use serial_test::serial;
    use std::collections::HashSet;
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    fn test_key() -> ApiKey {
        ApiKey::new("test-key")
    }

    fn keyed_options() -> LoadOptions {
        LoadOptions::default().with_api_key(test_key())
    }

    #[test]
    #[serial]
    fn test_load_defaults() {
        let store = ChatbotStore::load(keyed_options()).unwrap();
        assert_eq!(store.settings().api.model, "magistral-medium-2507");
        assert_eq!(store.api_key(), Some(&test_key()));
        assert_eq!(store.knowledge(), &KnowledgeBase::default());
        assert_eq!(store.prompts().iter().count(), 4);
    }

    #[test]
    #[serial]
    fn test_load_twice_is_equal() {
        let first = ChatbotStore::load(keyed_options()).unwrap();
        let second = ChatbotStore::load(keyed_options()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_shipped_matches_defaults() {
        let store = ChatbotStore::shipped(test_key()).unwrap();
        assert_eq!(store.settings().conversation.context_window, 10);
        assert_eq!(store.settings().conversation.max_history_length, 20);
        assert!(store.settings().conversation.context_window
            <= store.settings().conversation.max_history_length);
        assert_eq!(store.settings().api.temperature, 0.7);
        assert_eq!(store.settings().api.top_p, 0.9);
    }

    #[test]
    fn test_shipped_provider_priorities_distinct() {
        let store = ChatbotStore::shipped(test_key()).unwrap();
        let priorities: HashSet<_> = store
            .settings()
            .web_search
            .providers
            .iter()
            .map(|p| p.priority)
            .collect();
        assert_eq!(priorities.len(), store.settings().web_search.providers.len());
        assert!(priorities.iter().all(|p| *p > 0));
    }

    #[test]
    fn test_shipped_analytics_events() {
        let store = ChatbotStore::shipped(test_key()).unwrap();
        let events = &store.settings().analytics.track_events;
        let unique: HashSet<_> = events.iter().collect();
        assert_eq!(events.len(), 5);
        assert_eq!(unique.len(), 5);
    }

    #[test]
    fn test_shipped_prompts() {
        let store = ChatbotStore::shipped(test_key()).unwrap();
        let general = store.prompt(PromptContext::General);
        assert!(general.starts_with("Sei un assistente AI esperto di Data Pizza AI framework."));
        assert!(general.contains("Rispondi sempre in italiano."));
        assert!(general.contains("Datapizza AI"));
        assert!(store.prompt(PromptContext::WithWebSearch).contains("Datapizza AI"));
        assert!(!store.prompt(PromptContext::TechnicalHelp).contains("\"framework\""));
    }

    #[test]
    fn test_system_prompt_follows_web_search() {
        let store = ChatbotStore::shipped(test_key()).unwrap();
        assert_eq!(store.system_prompt(), store.prompt(PromptContext::General));
    }

    #[test]
    #[serial]
    fn test_missing_key_fails() {
        let overrides = ChatbotConfig {
            api: crate::config::ApiConfig {
                api_key_env: "CHATBOT_TEST_STORE_KEY".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        unsafe {
            env::remove_var("CHATBOT_TEST_STORE_KEY");
        }

        let result = ChatbotStore::load(LoadOptions::default().with_overrides(overrides));
        assert!(matches!(
            result,
            Err(ConfigError::MissingSecret { ref variable }) if variable == "CHATBOT_TEST_STORE_KEY"
        ));
    }

    #[test]
    #[serial]
    fn test_key_from_named_variable() {
        unsafe {
            env::set_var("CHATBOT_API_KEY_ENV", "CHATBOT_TEST_STORE_KEY");
            env::set_var("CHATBOT_TEST_STORE_KEY", "from-env");
        }

        let store = ChatbotStore::load(LoadOptions::default()).unwrap();
        assert_eq!(store.api_key().map(ApiKey::expose), Some("from-env"));

        unsafe {
            env::remove_var("CHATBOT_API_KEY_ENV");
            env::remove_var("CHATBOT_TEST_STORE_KEY");
        }
    }

    #[test]
    #[serial]
    fn test_env_beats_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chatbot.toml");
        fs::write(&path, "[api]\nmodel = \"file-model\"\nmax_tokens = 400\n").unwrap();
        unsafe {
            env::set_var("CHATBOT_API_MODEL", "env-model");
        }

        let store = ChatbotStore::load(keyed_options().with_config(&path)).unwrap();
        assert_eq!(store.settings().api.model, "env-model");
        assert_eq!(store.settings().api.max_tokens, 400);

        unsafe {
            env::remove_var("CHATBOT_API_MODEL");
        }
    }

    #[test]
    #[serial]
    fn test_overrides_beat_env() {
        unsafe {
            env::set_var("CHATBOT_API_MODEL", "env-model");
        }
        let overrides = ChatbotConfig {
            api: crate::config::ApiConfig {
                model: "cli-model".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let settings = resolve_settings(&LoadOptions::default().with_overrides(overrides)).unwrap();
        assert_eq!(settings.api.model, "cli-model");

        unsafe {
            env::remove_var("CHATBOT_API_MODEL");
        }
    }

    #[test]
    #[serial]
    fn test_invalid_env_rejected() {
        unsafe {
            env::set_var("CHATBOT_API_TEMPERATURE", "warm");
        }

        let result = ChatbotStore::load(keyed_options());
        assert!(matches!(result, Err(ConfigError::InvalidEnvValue { .. })));

        unsafe {
            env::remove_var("CHATBOT_API_TEMPERATURE");
        }
    }

    #[test]
    #[serial]
    fn test_out_of_range_env_fails_validation() {
        unsafe {
            env::set_var("CHATBOT_API_TOP_P", "1.5");
        }

        let result = ChatbotStore::load(keyed_options());
        assert!(matches!(result, Err(ConfigError::Validation { .. })));

        unsafe {
            env::remove_var("CHATBOT_API_TOP_P");
        }
    }

    #[test]
    #[serial]
    fn test_nan_temperature_from_env_rejected() {
        unsafe {
            env::set_var("CHATBOT_API_TEMPERATURE", "NaN");
        }

        let result = ChatbotStore::load(keyed_options());
        assert!(matches!(result, Err(ConfigError::Validation { .. })));

        unsafe {
            env::remove_var("CHATBOT_API_TEMPERATURE");
        }
    }

    #[test]
    #[serial]
    fn test_nan_sampling_from_file_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chatbot.toml");
        fs::write(&path, "[api]\ntemperature = nan\ntop_p = nan\n").unwrap();

        let result = ChatbotStore::load(keyed_options().with_config(&path));
        assert!(matches!(result, Err(ConfigError::Validation { .. })));
    }

    #[test]
    #[serial]
    fn test_missing_config_file() {
        let result = ChatbotStore::load(keyed_options().with_config("/nonexistent/chatbot.toml"));
        assert!(matches!(result, Err(ConfigError::File { .. })));
    }

    #[test]
    #[serial]
    fn test_knowledge_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("knowledge.json");
        let json = serde_json::to_string(&KnowledgeBase::default()).unwrap();
        fs::write(&path, json).unwrap();

        let store = ChatbotStore::load(keyed_options().with_knowledge(&path)).unwrap();
        let shipped = ChatbotStore::shipped(test_key()).unwrap();
        assert_eq!(store.prompts(), shipped.prompts());
    }

    #[test]
    #[serial]
    fn test_custom_knowledge_reaches_prompts() {
        let mut knowledge = KnowledgeBase::default();
        knowledge.framework.name = "Pizza Framework Test".to_string();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("knowledge.yaml");
        fs::write(&path, serde_yaml::to_string(&knowledge).unwrap()).unwrap();

        let store = ChatbotStore::load(keyed_options().with_knowledge(&path)).unwrap();
        assert!(store.prompt(PromptContext::General).contains("Pizza Framework Test"));
        assert!(store.prompt(PromptContext::WithWebSearch).contains("Pizza Framework Test"));
        assert!(!store.prompt(PromptContext::BeginnerFriendly).contains("Pizza Framework Test"));
        assert_eq!(SECTION_NAMES.len(), 9);
    }

    #[test]
    fn test_store_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ChatbotStore>();

        let shared = ChatbotStore::shipped(test_key()).unwrap().into_shared();
        let clone = std::sync::Arc::clone(&shared);
        assert_eq!(clone.settings(), shared.settings());
    }
}
