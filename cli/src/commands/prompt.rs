//! Prompt command - print one rendered system prompt

use anyhow::Result;
use clap::Args;
use knowledge::{PromptContext, SystemPrompts, load_knowledge};
use std::path::PathBuf;
use strum::IntoEnumIterator;

use crate::ux_error;

#[derive(Args)]
pub struct PromptArgs {
    /// Context name: general, with_web_search, technical_help, beginner_friendly
    #[arg(value_name = "CONTEXT")]
    pub context: String,

    /// Knowledge base file (JSON, TOML or YAML)
    #[arg(long, value_name = "PATH")]
    pub knowledge: Option<PathBuf>
}

pub fn run(args: PromptArgs) -> Result<()> {
    let Ok(context) = PromptContext::from_name(&args.context) else {
        let valid: Vec<String> = PromptContext::iter().map(|c| c.to_string()).collect();
        ux_error::unknown_context(&args.context, &valid).exit()
    };

    let knowledge = match load_knowledge(args.knowledge.as_deref()) {
        Ok(knowledge) => knowledge,
        Err(e) => ux_error::knowledge_file_error(&e).exit()
    };
    let prompts = SystemPrompts::build(&knowledge)?;

    println!("{}", prompts.get(context));
    Ok(())
}
