//! Show command - resolved settings
//!
//! Prints the settings after applying the file, environment and flag
//! layers. Does not require the API key and never prints it.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use config::{ApiKey, ChatbotConfig, resolve_settings};

use super::SettingsArgs;
use crate::{output, ux_error};

#[derive(Args)]
pub struct ShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub settings: SettingsArgs
}

pub fn run(args: ShowArgs) -> Result<()> {
    let settings = match resolve_settings(&args.settings.load_options()) {
        Ok(settings) => settings,
        Err(e) => ux_error::from_config_error(&e).exit()
    };
    let key_present = ApiKey::from_env(&settings.api.api_key_env).is_some();

    if args.json {
        let mut value = serde_json::to_value(&settings)?;
        value["api"]["api_key_present"] = serde_json::Value::Bool(key_present);
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    print_settings(&settings, key_present);
    Ok(())
}

fn print_settings(settings: &ChatbotConfig, key_present: bool) {
    output::header("Chatbot Settings");
    println!();

    output::subheader("API:");
    output::field("base_url", &settings.api.base_url);
    output::field("model", &settings.api.model);
    output::field("max_tokens", settings.api.max_tokens);
    output::field("temperature", settings.api.temperature);
    output::field("top_p", settings.api.top_p);
    let key_status = if key_present {
        "set".green()
    } else {
        "missing".red()
    };
    println!(
        "  {:<22} {} {}",
        "api_key:",
        key_status,
        format!("({})", settings.api.api_key_env).dimmed()
    );

    println!();
    output::subheader("Web search:");
    output::field("enabled", output::bool_str(settings.web_search.enabled));
    for provider in settings.web_search.providers_by_priority() {
        println!(
            "  {}. {} {}",
            provider.priority,
            provider.name,
            provider.url.dimmed()
        );
    }
    output::field(
        "trigger_keywords",
        settings.web_search.trigger_keywords.join(", ")
    );

    println!();
    output::subheader("Conversation:");
    output::field("max_history_length", settings.conversation.max_history_length);
    output::field("context_window", settings.conversation.context_window);
    output::field(
        "auto_summarize",
        output::bool_str(settings.conversation.auto_summarize)
    );
    output::field(
        "persistence",
        output::bool_str(settings.conversation.persistence)
    );

    println!();
    output::subheader("UI:");
    output::field("position", settings.ui.position);
    output::field("width", &settings.ui.width);
    output::field("height", &settings.ui.height);
    output::field("animation_duration", &settings.ui.animation_duration);
    output::field("typing_delay_ms", settings.ui.typing_delay_ms);
    output::field("scroll_behavior", settings.ui.scroll_behavior);

    println!();
    output::subheader("Features:");
    for (name, enabled) in settings.features.iter() {
        output::field(name, output::bool_str(enabled));
    }

    println!();
    output::subheader("Analytics:");
    output::field("enabled", output::bool_str(settings.analytics.enabled));
    output::field("track_events", settings.analytics.track_events.join(", "));

    if !key_present {
        println!();
        output::hint(&format!(
            "export {} before running 'datapizza-chatbot validate'",
            settings.api.api_key_env
        ));
    }
}
