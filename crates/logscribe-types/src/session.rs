use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// One session log file discovered on disk.
///
/// Built fresh by every directory scan; never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    pub path: PathBuf,
    /// File name without the `.jsonl` extension
    pub session_id: String,
    /// Encoded project folder the file lives in
    pub project_dir_name: String,
    pub modified_time: DateTime<Utc>,
    pub size_bytes: u64,
    /// File name carries the sub-agent prefix
    pub is_agent: bool,
    /// Session that spawned this agent (agent files only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_session_id: Option<String>,
}

/// Order for session listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionOrder {
    /// Most recently modified first
    #[default]
    NewestFirst,
    /// Oldest first (display only)
    OldestFirst,
}

/// Sort sessions newest first; equal timestamps fall back to path order so
/// listings are stable.
pub fn sort_sessions(sessions: &mut [SessionInfo], order: SessionOrder) {
    sessions.sort_by(|a, b| {
        b.modified_time
            .cmp(&a.modified_time)
            .then_with(|| a.path.cmp(&b.path))
    });
    if order == SessionOrder::OldestFirst {
        sessions.reverse();
    }
}

/// Summary counts computed in one streaming pass over a session file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct SessionMetadata {
    pub session_id: Option<String>,
    pub project_path: Option<String>,
    pub started_at: Option<String>,
    /// Human, assistant and system records
    pub message_count: usize,
    pub tool_call_count: usize,
    pub has_sub_agents: bool,
}
