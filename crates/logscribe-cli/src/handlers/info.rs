use anyhow::Result;
use logscribe_engine::summarize_file;
use std::path::Path;

use super::resolve_reference;
use crate::args::{InfoArgs, OutputFormat};
use crate::context::ExecutionContext;
use crate::views::{InfoView, format_metadata};
use crate::ui;

pub fn handle(ctx: &ExecutionContext, args: &InfoArgs) -> usize {
    let resolver = ctx.resolver(&args.selection);
    let mut failures = 0;
    let mut printed = 0;

    for reference in &args.references {
        let Some(path) = resolve_reference(&resolver, reference) else {
            failures += 1;
            continue;
        };

        if printed > 0 && ctx.format == OutputFormat::Plain {
            println!();
        }
        match print_info(&path, ctx.format) {
            Ok(()) => printed += 1,
            Err(e) => {
                ui::error(format!("{}: {:#}", reference, e));
                failures += 1;
            }
        }
    }

    failures
}

fn print_info(path: &Path, format: OutputFormat) -> Result<()> {
    let metadata = summarize_file(path)?;
    match format {
        OutputFormat::Plain => println!("{}", format_metadata(path, &metadata)),
        OutputFormat::Json => {
            let view = InfoView {
                path,
                metadata: &metadata,
            };
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
    }
    Ok(())
}
