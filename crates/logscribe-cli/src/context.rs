use anyhow::Result;
use logscribe_core::resolve_projects_dir;
use logscribe_providers::{ResolveOptions, SessionResolver};
use std::path::PathBuf;

use crate::args::{Cli, OutputFormat, SelectionArgs};
use crate::config::Config;

/// Settings shared by every command of one invocation.
#[derive(Debug)]
pub struct ExecutionContext {
    pub config: Config,
    pub projects_root: PathBuf,
    pub format: OutputFormat,
}

impl ExecutionContext {
    pub fn load(cli: &Cli) -> Result<Self> {
        let config = Config::load(cli.config.as_deref())?;
        let explicit = cli
            .projects_dir
            .as_deref()
            .or(config.projects_dir.as_deref());
        let projects_root = resolve_projects_dir(explicit)?;
        tracing::debug!(root = %projects_root.display(), "using projects root");

        Ok(Self {
            config,
            projects_root,
            format: cli.format,
        })
    }

    pub fn resolver(&self, selection: &SelectionArgs) -> SessionResolver {
        SessionResolver::new(
            &self.projects_root,
            ResolveOptions {
                exclude_agents: selection.exclude_agents || self.config.exclude_agents,
                auto_pick_newest: selection.latest || self.config.auto_pick_newest,
            },
        )
    }
}
