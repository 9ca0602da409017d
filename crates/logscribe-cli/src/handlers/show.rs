use logscribe_engine::{DisplayPolicy, TranscriptRenderer, Visibility, summarize_file};
use logscribe_providers::{Error, open_records};
use std::path::Path;

use super::resolve_reference;
use crate::args::{ShowArgs, SuppressTarget};
use crate::config::{Config, DEFAULT_MAX_LENGTH};
use crate::context::ExecutionContext;
use crate::{ui, views};

pub fn handle(ctx: &ExecutionContext, args: &ShowArgs) -> usize {
    let resolver = ctx.resolver(&args.selection);
    let policy = display_policy(&ctx.config, args);
    let several = args.references.len() > 1;
    let mut failures = 0;

    for reference in &args.references {
        let Some(path) = resolve_reference(&resolver, reference) else {
            failures += 1;
            continue;
        };

        if several {
            println!("==> {} <==", path.display());
        }
        if let Err(e) = show_file(&path, &policy, args.metadata) {
            ui::error(format!("{}: {}", reference, e));
            failures += 1;
        }
        if several {
            println!();
        }
    }

    failures
}

fn show_file(
    path: &Path,
    policy: &DisplayPolicy,
    metadata: bool,
) -> logscribe_providers::Result<()> {
    if metadata {
        let meta = summarize_file(path)?;
        println!("{}", views::format_metadata(path, &meta));
        println!("{}", "-".repeat(60));
    }

    let mut renderer = TranscriptRenderer::new(policy.clone());
    let mut first = true;
    for record in open_records(path)? {
        let record = record.map_err(|e| Error::io(path, e))?;
        if let Some(text) = renderer.render_record(&record) {
            if !first {
                println!();
            }
            println!("{}", text);
            first = false;
        }
    }
    Ok(())
}

/// Combine config defaults with command-line flags; flags win and
/// `--suppress` wins over `--thinking`/`--tools`/`--system`.
pub(crate) fn display_policy(config: &Config, args: &ShowArgs) -> DisplayPolicy {
    let display = &config.display;
    let pick = |configured: Visibility, show_flag: bool| {
        if show_flag {
            Visibility::Show
        } else {
            configured
        }
    };

    let mut policy = DisplayPolicy {
        thinking: pick(display.thinking, args.thinking),
        tool_calls: pick(display.tool_calls, args.tools),
        tool_results: pick(display.tool_results, args.tools),
        system: pick(display.system, args.system),
        timestamps: args.timestamps || display.timestamps,
        max_length: None,
    };

    for target in &args.suppress {
        match target {
            SuppressTarget::Thinking => policy.thinking = Visibility::Suppress,
            SuppressTarget::ToolCalls => policy.tool_calls = Visibility::Suppress,
            SuppressTarget::ToolResults => policy.tool_results = Visibility::Suppress,
            SuppressTarget::System => policy.system = Visibility::Suppress,
        }
    }

    let truncate = args.truncate || args.max_length.is_some() || display.truncate;
    if truncate {
        policy.max_length = Some(
            args.max_length
                .or(display.max_length)
                .unwrap_or(DEFAULT_MAX_LENGTH),
        );
    }

    policy
}
