//! Knowledge command - print the knowledge base

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use knowledge::{KnowledgeBase, SECTION_NAMES, load_knowledge};
use std::path::PathBuf;

use crate::{output, ux_error};

#[derive(Args)]
pub struct KnowledgeArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Print a single top-level section
    #[arg(long, value_name = "NAME")]
    pub section: Option<String>,

    /// Knowledge base file (JSON, TOML or YAML)
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>
}

pub fn run(args: KnowledgeArgs) -> Result<()> {
    let knowledge = match load_knowledge(args.file.as_deref()) {
        Ok(knowledge) => knowledge,
        Err(e) => ux_error::knowledge_file_error(&e).exit()
    };

    if let Some(name) = &args.section {
        let Some(section) = knowledge.section(name) else {
            ux_error::unknown_section(name, &SECTION_NAMES).exit()
        };
        if args.json {
            println!("{}", serde_json::to_string_pretty(&section)?);
        } else {
            output::header(name);
            println!("{}", serde_yaml::to_string(&section)?);
        }
        return Ok(());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&knowledge)?);
        return Ok(());
    }

    print_summary(&knowledge);
    Ok(())
}

fn print_summary(knowledge: &KnowledgeBase) {
    let framework = &knowledge.framework;
    output::header(&format!("{} {}", framework.name, framework.version));
    println!("{}", framework.description);
    println!("{}", framework.url.dimmed());
    println!();

    output::subheader("Installation:");
    println!("  $ {}", knowledge.quick_start.installation.cyan());
    println!();

    output::subheader("Providers:");
    for (name, profile) in knowledge.providers.iter() {
        println!(
            "  {:<10} {} {}",
            name,
            profile.client,
            format!("({} models)", profile.models.len()).dimmed()
        );
    }
    println!();

    output::subheader("Troubleshooting:");
    for issue in &knowledge.troubleshooting.common_issues {
        println!("  - {}", issue.problem);
        println!("    {}", issue.solution.dimmed());
    }
    println!();

    output::hint(&format!(
        "use --section <NAME> to print one of: {}",
        SECTION_NAMES.join(", ")
    ));
}
