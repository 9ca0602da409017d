use logscribe_types::{SessionInfo, SessionMetadata};
use serde::Serialize;
use std::path::Path;

/// JSON shape of `info` output: the file plus its metadata.
#[derive(Debug, Serialize)]
pub struct InfoView<'a> {
    pub path: &'a Path,
    #[serde(flatten)]
    pub metadata: &'a SessionMetadata,
}

/// JSON shape of `sessions` output.
#[derive(Debug, Serialize)]
pub struct SessionListView<'a> {
    pub sessions: &'a [SessionInfo],
}

pub fn format_metadata(path: &Path, meta: &SessionMetadata) -> String {
    let or_unknown = |v: &Option<String>| v.clone().unwrap_or_else(|| "(unknown)".to_string());
    [
        format!("File:       {}", path.display()),
        format!("Session:    {}", or_unknown(&meta.session_id)),
        format!("Project:    {}", or_unknown(&meta.project_path)),
        format!("Started:    {}", or_unknown(&meta.started_at)),
        format!("Messages:   {}", meta.message_count),
        format!("Tool calls: {}", meta.tool_call_count),
        format!(
            "Sub-agents: {}",
            if meta.has_sub_agents { "yes" } else { "no" }
        ),
    ]
    .join("\n")
}

pub fn format_session_line(session: &SessionInfo) -> String {
    let mut line = format!(
        "{}  {:>10}  {}",
        session.modified_time.format("%Y-%m-%d %H:%M:%S"),
        format_size(session.size_bytes),
        session.session_id
    );
    if session.is_agent {
        match &session.parent_session_id {
            Some(parent) => line.push_str(&format!("  (agent of {})", parent)),
            None => line.push_str("  (agent)"),
        }
    }
    line
}

pub fn format_candidates(reference: &str, sessions: &[SessionInfo]) -> String {
    let mut out = format!(
        "Multiple sessions match '{}' (newest first):\n",
        reference
    );
    for session in sessions {
        out.push_str("  ");
        out.push_str(&format_session_line(session));
        out.push_str(&format!("  [{}]\n", session.project_dir_name));
    }
    out.push_str("Use a longer prefix, a file path, or --latest to pick the newest.");
    out
}

fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use insta::assert_snapshot;
    use std::path::PathBuf;

    fn info(id: &str, size: u64, parent: Option<&str>) -> SessionInfo {
        SessionInfo {
            path: PathBuf::from(format!("/root/-w/{id}.jsonl")),
            session_id: id.to_string(),
            project_dir_name: "-w".to_string(),
            modified_time: Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 0).unwrap(),
            size_bytes: size,
            is_agent: id.starts_with("agent-"),
            parent_session_id: parent.map(str::to_string),
        }
    }

    #[test]
    fn test_metadata_block() {
        let meta = SessionMetadata {
            session_id: Some("7f2abd2d".to_string()),
            project_path: Some("/work/app".to_string()),
            started_at: None,
            message_count: 12,
            tool_call_count: 4,
            has_sub_agents: true,
        };
        assert_snapshot!(format_metadata(Path::new("/p/7f2abd2d.jsonl"), &meta), @r"
File:       /p/7f2abd2d.jsonl
Session:    7f2abd2d
Project:    /work/app
Started:    (unknown)
Messages:   12
Tool calls: 4
Sub-agents: yes
");
    }

    #[test]
    fn test_candidate_listing() {
        let sessions = vec![info("abc-1", 512, None), info("agent-abc", 2048, Some("abc-1"))];
        assert_snapshot!(format_candidates("abc", &sessions), @r"
Multiple sessions match 'abc' (newest first):
  2025-03-01 12:30:00       512 B  abc-1  [-w]
  2025-03-01 12:30:00      2.0 KB  agent-abc  (agent of abc-1)  [-w]
Use a longer prefix, a file path, or --latest to pick the newest.
");
    }
}
