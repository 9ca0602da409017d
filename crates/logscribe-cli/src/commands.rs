use anyhow::Result;

use super::args::{Cli, Commands};
use super::handlers;
use crate::context::ExecutionContext;

/// Outcome of one invocation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// References that could not be processed
    pub failures: usize,
}

impl RunReport {
    pub fn has_failures(&self) -> bool {
        self.failures > 0
    }
}

pub fn run(cli: Cli) -> Result<RunReport> {
    crate::logging::init(cli.log_level);
    let ctx = ExecutionContext::load(&cli)?;

    let failures = match &cli.command {
        Commands::Show(args) => handlers::show::handle(&ctx, args),
        Commands::Export(args) => handlers::export::handle(&ctx, args),
        Commands::Sessions(args) => handlers::sessions::handle(&ctx, args),
        Commands::Info(args) => handlers::info::handle(&ctx, args),
    };

    Ok(RunReport { failures })
}
