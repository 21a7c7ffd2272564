//! CLI definition using clap

use carpark_types::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "carpark")]
#[command(version)]
#[command(about = "Interactive parking lot simulator")]
#[command(long_about = None)]
pub struct Cli {
    /// Defaults to `run` reading from stdin
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Fee per started hour. Uses config value if not specified.
    #[arg(long, global = true)]
    pub fee_per_hour: Option<u64>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive command loop
    Run {
        /// Read commands from a file instead of stdin
        #[arg(long, short = 's')]
        script: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set fee per hour
        #[arg(long)]
        set_fee: Option<u64>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set the prompt string
        #[arg(long)]
        set_prompt: Option<String>,

        /// Show or hide the startup hint
        #[arg(long)]
        set_hint: Option<bool>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
