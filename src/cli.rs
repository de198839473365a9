use std::path::PathBuf;

use clap::Parser;

/// Copy .lua and .manifest files from a source tree into install folders.
#[derive(Debug, Parser)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Source folder, skips the first question when it exists
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub source: Option<PathBuf>,

    /// Replace existing destination files without asking
    #[arg(short = 'y', long)]
    pub overwrite: bool,

    /// Write the final summary as JSON to this file
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub report: Option<PathBuf>,

    /// Exit right after the summary instead of waiting for Enter
    #[arg(long)]
    pub no_pause: bool,

    /// Diagnostics verbosity on stderr (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: clap_complete_command::Shell,
    },
}
