//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Solidafy FileSync CLI
#[derive(Parser, Debug)]
#[command(name = "solidafy-filesync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Stream configuration file (JSON or YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Inline stream configuration JSON
    #[arg(long, global = true)]
    pub config_json: Option<String>,

    /// State file (JSON)
    #[arg(short, long, global = true)]
    pub state: Option<PathBuf>,

    /// Inline state JSON
    #[arg(long, global = true)]
    pub state_json: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the files the next sync would pick up, without recording them
    Plan {
        /// Source to list (local path or cloud URL)
        /// Supports: /path, s3://bucket/path, r2://bucket/path, gs://bucket/path, az://container/path
        #[arg(long)]
        source: String,

        /// Stream name (overrides the config)
        #[arg(long)]
        stream: Option<String>,
    },

    /// Sync new and changed files and persist the cursor state
    Sync {
        /// Source to list (local path or cloud URL)
        #[arg(long)]
        source: String,

        /// Stream name (overrides the config)
        #[arg(long)]
        stream: Option<String>,

        /// Emit and save state every N files (0 = only at the end)
        #[arg(long, default_value = "0")]
        checkpoint_interval: usize,

        /// Maximum files to sync in this run (0 = unlimited)
        #[arg(long, default_value = "0")]
        max_files: usize,
    },

    /// Print the persisted cursor state of a stream
    State {
        /// Stream name (overrides the config)
        #[arg(long)]
        stream: Option<String>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}
