use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, Error>;

/// File extension of session transcripts (without the dot)
pub const TRANSCRIPT_EXTENSION: &str = "jsonl";

/// File name prefix marking a sub-agent transcript
pub const AGENT_FILE_PREFIX: &str = "agent-";

/// Environment variable overriding the projects root directory
pub const PROJECTS_DIR_ENV: &str = "LOGSCRIBE_PROJECTS_DIR";

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Config(String),
    InvalidReference { reference: String, reason: String },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Config error: {}", msg),
            Error::InvalidReference { reference, reason } => {
                write!(f, "Invalid session reference '{}': {}", reference, reason)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Config(_) | Error::InvalidReference { .. } => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

/// Resolve the root directory holding one sub-directory per project:
/// 1. Explicit path (with tilde expansion)
/// 2. LOGSCRIBE_PROJECTS_DIR environment variable (with tilde expansion)
/// 3. ~/.claude/projects
pub fn resolve_projects_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var(PROJECTS_DIR_ENV) {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(home) = dirs::home_dir() {
        return Ok(home.join(".claude").join("projects"));
    }

    Err(Error::Config(
        "Could not determine projects directory: no home directory found".to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~"
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home);
    }
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

/// Make a user-supplied path absolute against the current directory without
/// touching the filesystem beyond reading the cwd.
pub fn absolute_path(path: &str) -> Result<PathBuf> {
    let expanded = expand_tilde(path);
    Ok(std::path::absolute(expanded)?)
}

/// Normalize a path for comparison (resolve to absolute, canonicalize if possible)
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        }
    })
}

/// Encode a project root into the folder name used under the projects root.
///
/// Every character outside `[A-Za-z0-9]` becomes `-`:
/// `/Users/foo/my.app` -> `-Users-foo-my-app`
pub fn encode_project_dir_name(project_root: &Path) -> String {
    project_root
        .to_string_lossy()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

/// Check whether a file name follows the sub-agent naming convention.
pub fn is_agent_file_name(file_name: &str) -> bool {
    file_name.starts_with(AGENT_FILE_PREFIX)
}

/// Check whether a path carries the transcript extension.
pub fn has_transcript_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == TRANSCRIPT_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_replaces_every_non_alphanumeric() {
        assert_eq!(
            encode_project_dir_name(Path::new("/Users/foo/my.app")),
            "-Users-foo-my-app"
        );
        assert_eq!(
            encode_project_dir_name(Path::new("/home/a_b/c d/x-y")),
            "-home-a-b-c-d-x-y"
        );
    }

    #[test]
    fn test_encode_non_ascii_letters_become_hyphens() {
        assert_eq!(encode_project_dir_name(Path::new("/tmp/café")), "-tmp-caf-");
    }

    #[test]
    fn test_agent_file_name() {
        assert!(is_agent_file_name("agent-1a2b3c.jsonl"));
        assert!(!is_agent_file_name("7f2abd2d-agent.jsonl"));
    }

    #[test]
    fn test_transcript_extension() {
        assert!(has_transcript_extension(Path::new("/a/b.jsonl")));
        assert!(!has_transcript_extension(Path::new("/a/b.json")));
        assert!(!has_transcript_extension(Path::new("/a/jsonl")));
    }
}
