use anyhow::Result;
use logscribe_types::{SessionOrder, sort_sessions};

use crate::args::{OutputFormat, SelectionArgs, SessionsArgs};
use crate::context::ExecutionContext;
use crate::views::{SessionListView, format_session_line};
use crate::ui;

pub fn handle(ctx: &ExecutionContext, args: &SessionsArgs) -> usize {
    match list(ctx, args) {
        Ok(()) => 0,
        Err(e) => {
            ui::error(format!("{:#}", e));
            1
        }
    }
}

fn list(ctx: &ExecutionContext, args: &SessionsArgs) -> Result<()> {
    let reference = args.reference.as_deref().unwrap_or(".");
    let resolver = ctx.resolver(&SelectionArgs {
        exclude_agents: args.exclude_agents,
        latest: false,
    });

    let mut sessions = resolver
        .list_sessions(reference)
        .map_err(|e| anyhow::anyhow!("{}: {}", reference, e))?;

    if let Some(limit) = args.limit {
        sessions.truncate(limit);
    }
    if args.reverse {
        sort_sessions(&mut sessions, SessionOrder::OldestFirst);
    }

    match ctx.format {
        OutputFormat::Json => {
            let view = SessionListView {
                sessions: &sessions,
            };
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        OutputFormat::Plain if sessions.is_empty() => {
            ui::note(format!("No sessions found for '{}'", reference));
        }
        OutputFormat::Plain => {
            for session in &sessions {
                println!("{}", format_session_line(session));
            }
        }
    }
    Ok(())
}
