use anyhow::Result;
use clap::Args;
use knowledge::PromptContext;
use strum::IntoEnumIterator;

use crate::output;

#[derive(Args)]
pub struct ContextsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool
}

pub fn run(args: ContextsArgs) -> Result<()> {
    if args.json {
        let output: Vec<_> = PromptContext::iter()
            .map(|context| {
                serde_json::json!({
                    "name": context.to_string(),
                    "embeds_knowledge": context.embeds_knowledge()
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    output::header("Prompt contexts");
    for context in PromptContext::iter() {
        let note = if context.embeds_knowledge() {
            "embeds knowledge base"
        } else {
            "template only"
        };
        output::field(&context.to_string(), note);
    }
    Ok(())
}
