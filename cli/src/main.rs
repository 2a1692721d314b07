use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;
mod output;
pub mod ux_error;

use commands::{Cli, Commands};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show(args) => commands::show::run(args),
        Commands::Validate(args) => commands::validate::run(args),
        Commands::Prompt(args) => commands::prompt::run(args),
        Commands::Knowledge(args) => commands::knowledge::run(args),
        Commands::Contexts(args) => commands::contexts::run(args)
    }
}
