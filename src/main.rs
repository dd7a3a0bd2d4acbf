//! claw-import binary entry point

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use claw_import::cli::{Cli, Commands, ConfigCommands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => commands::completions::handle(shell),
        Some(Commands::Config(ConfigCommands::Show)) => commands::config::handle_show(),
        Some(Commands::Config(ConfigCommands::Path)) => commands::config::handle_path(),
        None => {
            init_logging(cli.convert.verbose);
            commands::convert::handle(&cli.convert)
        }
    }
}

/// Log to stderr; `RUST_LOG` overrides the verbosity flag.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
