pub mod export;
pub mod info;
pub mod sessions;
pub mod show;

use logscribe_providers::{ResolutionResult, SessionResolver};
use std::path::PathBuf;

use crate::{ui, views};

/// Resolve one reference to a log file.
///
/// `None` means the reference was reported on stderr (candidates, not found
/// or error) and counts as a failure.
pub(crate) fn resolve_reference(resolver: &SessionResolver, reference: &str) -> Option<PathBuf> {
    match resolver.resolve(reference) {
        ResolutionResult::DirectFile { path } | ResolutionResult::SingleMatch { path, .. } => {
            tracing::debug!(reference, path = %path.display(), "resolved reference");
            Some(path)
        }
        ResolutionResult::Candidates { sessions } => {
            ui::note(views::format_candidates(reference, &sessions));
            None
        }
        ResolutionResult::NotFound { input } => {
            ui::error(format!(
                "no session found for '{}' (projects root: {})",
                input,
                resolver.projects_root().display()
            ));
            None
        }
        ResolutionResult::Error { input, error } => {
            ui::error(format!("{}: {}", input, error));
            None
        }
    }
}
