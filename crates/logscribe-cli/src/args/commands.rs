use super::{SelectionArgs, SuppressTarget, parse_max_length};
use clap::{Args, Subcommand};

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Print a readable transcript of one or more sessions")]
    Show(ShowArgs),

    #[command(about = "Export sessions as API-ready message arrays (JSON)")]
    Export(ExportArgs),

    #[command(about = "List sessions of a project directory or matching an id prefix")]
    Sessions(SessionsArgs),

    #[command(about = "Summarize sessions (ids, message and tool call counts)")]
    Info(InfoArgs),
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Session id prefix, log file path or project directory
    #[arg(required = true, value_name = "REF")]
    pub references: Vec<String>,

    /// Show thinking blocks in full
    #[arg(long)]
    pub thinking: bool,

    /// Show tool calls and tool results in full
    #[arg(long)]
    pub tools: bool,

    /// Show system notes in full
    #[arg(long)]
    pub system: bool,

    /// Drop a block kind entirely, without a placeholder (repeatable)
    #[arg(long, value_name = "KIND")]
    pub suppress: Vec<SuppressTarget>,

    /// Prefix each record with its timestamp
    #[arg(long)]
    pub timestamps: bool,

    /// Print a session summary before the transcript
    #[arg(long)]
    pub metadata: bool,

    /// Cut long bodies (default length 1000)
    #[arg(long)]
    pub truncate: bool,

    /// Cut bodies longer than N characters (implies --truncate)
    #[arg(long, value_name = "N", value_parser = parse_max_length)]
    pub max_length: Option<usize>,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[arg(required = true, value_name = "REF")]
    pub references: Vec<String>,

    /// Single-line JSON instead of pretty-printed (always on for several references,
    /// which are written one document per line)
    #[arg(long)]
    pub compact: bool,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

#[derive(Debug, Args)]
pub struct SessionsArgs {
    /// Project directory or session id prefix [default: current directory]
    #[arg(value_name = "REF")]
    pub reference: Option<String>,

    /// Show at most N sessions
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Oldest first
    #[arg(long)]
    pub reverse: bool,

    /// Ignore sub-agent logs (agent-*.jsonl)
    #[arg(long)]
    pub exclude_agents: bool,
}

#[derive(Debug, Args)]
pub struct InfoArgs {
    #[arg(required = true, value_name = "REF")]
    pub references: Vec<String>,

    #[command(flatten)]
    pub selection: SelectionArgs,
}
