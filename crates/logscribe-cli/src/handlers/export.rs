use anyhow::Result;
use logscribe_engine::{ApiExport, export_file};
use std::path::Path;

use super::resolve_reference;
use crate::args::ExportArgs;
use crate::context::ExecutionContext;
use crate::ui;

pub fn handle(ctx: &ExecutionContext, args: &ExportArgs) -> usize {
    let resolver = ctx.resolver(&args.selection);
    // Several documents are written one per line.
    let compact = args.compact || args.references.len() > 1;
    let mut failures = 0;

    for reference in &args.references {
        let Some(path) = resolve_reference(&resolver, reference) else {
            failures += 1;
            continue;
        };

        match export_one(&path, compact) {
            Ok(export) => warn_about_gaps(&path, &export),
            Err(e) => {
                ui::error(format!("{}: {:#}", reference, e));
                failures += 1;
            }
        }
    }

    failures
}

fn export_one(path: &Path, compact: bool) -> Result<ApiExport> {
    let export = export_file(path)?;
    let json = if compact {
        serde_json::to_string(&export)?
    } else {
        serde_json::to_string_pretty(&export)?
    };
    println!("{}", json);
    Ok(export)
}

fn warn_about_gaps(path: &Path, export: &ApiExport) {
    if export.has_summary {
        ui::warning(format!(
            "{}: history was compacted upstream (summary record present); earlier turns are not in the export",
            path.display()
        ));
    }
    if export.skipped_unparseable > 0 {
        ui::warning(format!(
            "{}: skipped {} undecodable line(s)",
            path.display(),
            export.skipped_unparseable
        ));
    }
}
