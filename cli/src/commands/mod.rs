pub mod contexts;
pub mod knowledge;
pub mod prompt;
pub mod show;
pub mod validate;

use clap::{Args, Parser, Subcommand};
use config::{ApiConfig, ChatbotConfig, LoadOptions, WebSearchConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "datapizza-chatbot",
    author,
    version,
    about = "Data Pizza chatbot - settings, knowledge base and system prompts",
    long_about = "Inspect and validate the configuration store of the Data Pizza chatbot \
                  widget.\n\nSettings come from shipped defaults, an optional TOML/YAML file, \
                  CHATBOT_* environment variables and command-line flags, in increasing \
                  precedence."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Show the resolved settings")]
    Show(show::ShowArgs),

    #[command(about = "Build the full store and report whether it is valid")]
    Validate(validate::ValidateArgs),

    #[command(about = "Print the system prompt of one context")]
    Prompt(prompt::PromptArgs),

    #[command(about = "Print the knowledge base or one of its sections")]
    Knowledge(knowledge::KnowledgeArgs),

    #[command(about = "List prompt contexts")]
    Contexts(contexts::ContextsArgs)
}

/// Settings source flags shared by the commands that resolve settings.
#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    /// Settings file (TOML or YAML)
    #[arg(long, value_name = "PATH", env = "CHATBOT_CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Override the model id
    #[arg(long)]
    pub model: Option<String>,

    /// Override the API base URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Override the completion token limit
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Override the sampling temperature (0.0-2.0)
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Enable web search
    #[arg(long)]
    pub web_search: bool
}

impl SettingsArgs {
    /// Flags as an override layer. Unset flags keep the shipped default,
    /// which the merge treats as "no override".
    pub fn overrides(&self) -> ChatbotConfig {
        let shipped = ApiConfig::default();
        ChatbotConfig {
            api: ApiConfig {
                base_url: self.base_url.clone().unwrap_or(shipped.base_url),
                model: self.model.clone().unwrap_or(shipped.model),
                max_tokens: self.max_tokens.unwrap_or(shipped.max_tokens),
                temperature: self.temperature.unwrap_or(shipped.temperature),
                ..ApiConfig::default()
            },
            web_search: WebSearchConfig {
                enabled: self.web_search,
                ..WebSearchConfig::default()
            },
            ..ChatbotConfig::default()
        }
    }

    pub fn load_options(&self) -> LoadOptions {
        let options = LoadOptions::default().with_overrides(self.overrides());
        match &self.config {
            Some(path) => options.with_config(path),
            None => options
        }
    }
}
