use clap::Args;

/// Largest value accepted by `--max-length`
pub const MAX_LENGTH_LIMIT: usize = 1_000_000;

#[derive(Debug, Clone, Default, Args)]
pub struct SelectionArgs {
    /// Ignore sub-agent logs (agent-*.jsonl) unless the reference names one
    #[arg(long)]
    pub exclude_agents: bool,

    /// Pick the most recently modified session when several match
    #[arg(long)]
    pub latest: bool,
}

pub fn parse_max_length(value: &str) -> Result<usize, String> {
    let n: usize = value
        .parse()
        .map_err(|_| format!("'{}' is not a positive integer", value))?;
    if !(1..=MAX_LENGTH_LIMIT).contains(&n) {
        return Err(format!("must be between 1 and {}", MAX_LENGTH_LIMIT));
    }
    Ok(n)
}
