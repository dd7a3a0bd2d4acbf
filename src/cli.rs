//! Command-line interface definitions.
//!
//! Lives in the library so `xtask` can render man pages from it.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Convert Claude Code sessions to OpenClaw format
#[derive(Parser, Debug)]
#[command(name = "claw-import")]
#[command(version)]
#[command(about = "Convert a Claude Code JSONL session into an OpenClaw session")]
#[command(
    long_about = "Convert a Claude Code JSONL session into an OpenClaw session.\n\n\
    The transcript is streamed line by line: user and assistant turns are kept, \
    system/progress/snapshot records and local command noise are dropped, and \
    the result is validated after writing. With --register the session is \
    added to the agent's sessions.json."
)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub convert: ConvertArgs,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
    /// Print the config file path
    Path,
}

/// Arguments of the default convert action.
#[derive(Args, Debug, Clone, Default)]
pub struct ConvertArgs {
    /// Claude Code JSONL transcript to convert
    #[arg(value_name = "INPUT", required = true)]
    pub input: Option<PathBuf>,

    /// Output path (legacy positional form of --output)
    #[arg(value_name = "OUTPUT", hide = true)]
    pub legacy_output: Option<PathBuf>,

    /// Session id (legacy positional form of --session-id)
    #[arg(value_name = "SESSION_ID", hide = true)]
    pub legacy_session_id: Option<String>,

    /// Output JSONL path [default: <state dir>/agents/<agent>/sessions/<id>.jsonl]
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Session id [default: random UUID]
    #[arg(short, long, value_name = "ID")]
    pub session_id: Option<String>,

    /// Register the session in the agent's sessions.json
    #[arg(short, long)]
    pub register: bool,

    /// Label for the registry entry
    #[arg(short, long, value_name = "TEXT")]
    pub label: Option<String>,

    /// OpenClaw agent id [default: main]
    #[arg(long, value_name = "ID")]
    pub agent: Option<String>,

    /// Working directory for the session header [default: /home/user]
    #[arg(long, value_name = "PATH")]
    pub cwd: Option<String>,

    /// Detect the model and print stats without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Keep local command messages
    #[arg(long)]
    pub no_filter_commands: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl ConvertArgs {
    /// Explicit output path: `--output`, else the legacy positional.
    pub fn output_path(&self) -> Option<PathBuf> {
        self.output.clone().or_else(|| self.legacy_output.clone())
    }

    /// Explicit session id: `--session-id`, else the legacy positional.
    pub fn session_id(&self) -> Option<String> {
        self.session_id
            .clone()
            .or_else(|| self.legacy_session_id.clone())
    }
}
