//! Validate command - full store construction
//!
//! Builds the store exactly as the widget would, including the API key and
//! the knowledge base, and exits with code 1 when anything is wrong.

use anyhow::Result;
use clap::Args;
use config::ChatbotStore;
use knowledge::PromptContext;
use std::path::PathBuf;

use super::SettingsArgs;
use crate::{output, ux_error};

#[derive(Args)]
pub struct ValidateArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Knowledge base file (JSON, TOML or YAML)
    #[arg(long, value_name = "PATH")]
    pub knowledge: Option<PathBuf>,

    #[command(flatten)]
    pub settings: SettingsArgs
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let mut options = args.settings.load_options();
    options.knowledge_path = args.knowledge;

    let result = ChatbotStore::load(options);

    if args.json {
        let output = match &result {
            Ok(store) => serde_json::json!({
                "valid": true,
                "model": store.settings().api.model,
                "web_search": store.settings().web_search.enabled,
                "prompts": store
                    .prompts()
                    .iter()
                    .map(|(context, prompt)| (context.to_string(), prompt.chars().count()))
                    .collect::<std::collections::BTreeMap<_, _>>()
            }),
            Err(e) => serde_json::json!({
                "valid": false,
                "error": e.to_string()
            })
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        if result.is_err() {
            std::process::exit(1);
        }
        return Ok(());
    }

    let store = match result {
        Ok(store) => store,
        Err(e) => ux_error::from_config_error(&e).exit()
    };

    output::success("Configuration is valid");
    output::field("model", &store.settings().api.model);
    output::field("endpoint", store.settings().api.chat_completions_url());
    output::field(
        "web_search",
        output::bool_str(store.settings().web_search.enabled)
    );
    output::field(
        "general prompt",
        format!(
            "{} chars",
            store.prompt(PromptContext::General).chars().count()
        )
    );
    Ok(())
}
