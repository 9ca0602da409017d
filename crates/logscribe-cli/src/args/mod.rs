mod commands;
mod common;
mod enums;

pub use commands::*;
pub use common::*;
pub use enums::*;

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "logscribe")]
#[command(about = "Readable transcripts and API-ready exports of Claude Code session logs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Root directory holding one log folder per project [default: ~/.claude/projects]
    #[arg(long, global = true, env = "LOGSCRIBE_PROJECTS_DIR", value_name = "PATH")]
    pub projects_dir: Option<String>,

    /// Configuration file [default: <config dir>/logscribe/config.toml]
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}
