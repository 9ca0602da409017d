use crate::{Error, Result};
use chrono::{DateTime, Utc};
use logscribe_core::{
    absolute_path, encode_project_dir_name, has_transcript_extension, is_agent_file_name,
    is_agent_reference, normalize_path, validate_session_prefix,
};
use logscribe_types::{SessionInfo, SessionOrder, sort_sessions};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::io::find_first_session_id;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Leave `agent-*.jsonl` files out of scans
    pub exclude_agents: bool,
    /// Pick the newest session instead of reporting candidates
    pub auto_pick_newest: bool,
}

/// Outcome of resolving one user-supplied reference.
#[derive(Debug)]
pub enum ResolutionResult {
    /// Reference named a log file directly
    DirectFile { path: PathBuf },
    /// Exactly one session matched (or the newest was picked)
    SingleMatch { path: PathBuf, session: SessionInfo },
    /// Several sessions matched, newest first
    Candidates { sessions: Vec<SessionInfo> },
    NotFound { input: String },
    Error { input: String, error: Error },
}

/// What a reference points at before candidate reduction.
enum Target {
    File(PathBuf),
    Missing,
    Sessions(Vec<SessionInfo>),
}

/// Maps references (paths, project directories, session-id prefixes) to
/// session log files under a projects root.
///
/// Every call rescans the filesystem.
pub struct SessionResolver {
    projects_root: PathBuf,
    options: ResolveOptions,
}

impl SessionResolver {
    pub fn new(projects_root: impl Into<PathBuf>, options: ResolveOptions) -> Self {
        Self {
            projects_root: projects_root.into(),
            options,
        }
    }

    pub fn projects_root(&self) -> &Path {
        &self.projects_root
    }

    pub fn resolve(&self, reference: &str) -> ResolutionResult {
        match self.locate(reference) {
            Ok(Target::File(path)) => ResolutionResult::DirectFile { path },
            Ok(Target::Missing) => ResolutionResult::NotFound {
                input: reference.to_string(),
            },
            Ok(Target::Sessions(sessions)) => self.reduce(reference, sessions),
            Err(error) => ResolutionResult::Error {
                input: reference.to_string(),
                error,
            },
        }
    }

    /// All sessions a reference refers to, newest first, without reduction.
    pub fn list_sessions(&self, reference: &str) -> Result<Vec<SessionInfo>> {
        match self.locate(reference)? {
            Target::File(path) => Ok(session_info(&path, self.options.exclude_agents)?
                .into_iter()
                .collect()),
            Target::Missing => Ok(Vec::new()),
            Target::Sessions(sessions) => Ok(sessions),
        }
    }

    fn locate(&self, reference: &str) -> Result<Target> {
        if has_transcript_extension(Path::new(reference)) {
            let path = absolute_path(reference)?;
            tracing::debug!(path = %path.display(), "reference is a log file path");
            return locate_file(path);
        }

        if reference.contains('/') || reference.contains(std::path::MAIN_SEPARATOR) {
            let path = absolute_path(reference)?;
            return match std::fs::metadata(&path) {
                Ok(meta) if meta.is_dir() => self.scan_project(&path).map(Target::Sessions),
                Ok(_) => locate_file(path),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Target::Missing),
                Err(e) => Err(Error::io(path, e)),
            };
        }

        if Path::new(reference).is_dir() {
            return self.scan_project(Path::new(reference)).map(Target::Sessions);
        }

        validate_session_prefix(reference)?;
        self.scan_prefix(reference).map(Target::Sessions)
    }

    fn reduce(&self, reference: &str, mut sessions: Vec<SessionInfo>) -> ResolutionResult {
        sort_sessions(&mut sessions, SessionOrder::NewestFirst);
        if sessions.is_empty() {
            return ResolutionResult::NotFound {
                input: reference.to_string(),
            };
        }
        if sessions.len() == 1 || self.options.auto_pick_newest {
            let session = sessions.swap_remove(0);
            return ResolutionResult::SingleMatch {
                path: session.path.clone(),
                session,
            };
        }
        ResolutionResult::Candidates { sessions }
    }

    /// Sessions of the project rooted at `dir`.
    fn scan_project(&self, dir: &Path) -> Result<Vec<SessionInfo>> {
        let project_root = normalize_path(dir);
        let folder = self
            .projects_root
            .join(encode_project_dir_name(&project_root));
        tracing::debug!(
            project = %project_root.display(),
            folder = %folder.display(),
            "scanning project folder"
        );
        let mut sessions = scan_folder(&folder, self.options.exclude_agents, |_| true)?;
        sort_sessions(&mut sessions, SessionOrder::NewestFirst);
        Ok(sessions)
    }

    /// Sessions in every project whose id starts with `prefix` (case-insensitive).
    fn scan_prefix(&self, prefix: &str) -> Result<Vec<SessionInfo>> {
        if !self.projects_root.is_dir() {
            tracing::debug!(root = %self.projects_root.display(), "projects root does not exist");
            return Ok(Vec::new());
        }

        let exclude_agents = self.options.exclude_agents && !is_agent_reference(prefix);
        let needle = prefix.to_ascii_lowercase();
        let matches = |session_id: &str| session_id.to_ascii_lowercase().starts_with(&needle);

        let mut sessions = Vec::new();
        for entry in WalkDir::new(&self.projects_root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            sessions.extend(scan_folder(entry.path(), exclude_agents, matches)?);
        }

        sort_sessions(&mut sessions, SessionOrder::NewestFirst);
        Ok(sessions)
    }
}

fn locate_file(path: PathBuf) -> Result<Target> {
    match std::fs::metadata(&path) {
        Ok(meta) if meta.is_file() => {
            std::fs::File::open(&path).map_err(|e| Error::io(&path, e))?;
            Ok(Target::File(path))
        }
        Ok(_) => Ok(Target::Missing),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Target::Missing),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// List log files directly inside one project folder.
///
/// A missing folder holds zero sessions.
fn scan_folder(
    folder: &Path,
    exclude_agents: bool,
    keep: impl Fn(&str) -> bool,
) -> Result<Vec<SessionInfo>> {
    if !folder.is_dir() {
        return Ok(Vec::new());
    }

    let mut sessions = Vec::new();
    for entry in WalkDir::new(folder).min_depth(1).max_depth(1) {
        let entry = entry?;
        let path = entry.path();
        if !has_transcript_extension(path) || !path.is_file() {
            continue;
        }
        let Some(session_id) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if !keep(session_id) {
            continue;
        }
        if let Some(info) = session_info(path, exclude_agents)? {
            sessions.push(info);
        }
    }
    Ok(sessions)
}

/// Build the listing entry for one log file, or `None` when it is an agent
/// file and agents are excluded.
fn session_info(path: &Path, exclude_agents: bool) -> Result<Option<SessionInfo>> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let is_agent = is_agent_file_name(&file_name);
    if is_agent && exclude_agents {
        return Ok(None);
    }

    let metadata = std::fs::metadata(path).map_err(|e| Error::io(path, e))?;
    let modified_time: DateTime<Utc> = metadata
        .modified()
        .map(DateTime::<Utc>::from)
        .map_err(|e| Error::io(path, e))?;

    let parent_session_id = if is_agent {
        match find_first_session_id(path) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "could not read parent session id"
                );
                None
            }
        }
    } else {
        None
    };

    Ok(Some(SessionInfo {
        path: path.to_path_buf(),
        session_id: path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
        project_dir_name: path
            .parent()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        modified_time,
        size_bytes: metadata.len(),
        is_agent,
        parent_session_id,
    }))
}
