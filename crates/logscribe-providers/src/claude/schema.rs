use serde::Deserialize;
use serde_json::Value;

/// Envelope shared by every line of a Claude Code session log.
///
/// All fields are optional: the set of record types keeps growing upstream
/// and unmodelled ones must still decode.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawRecord {
    #[serde(rename = "type", default)]
    pub record_type: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub cwd: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub is_sidechain: Option<bool>,
    #[serde(default)]
    pub message: Option<RawMessage>,

    /// `system` records: note text
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub subtype: Option<String>,

    /// `summary` records
    #[serde(default)]
    pub summary: Option<String>,

    /// `user` records carrying tool output: record-level result wrapper
    #[serde(default)]
    pub tool_use_result: Option<Value>,
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct RawMessage {
    #[serde(default)]
    pub content: Option<Value>,
}

impl RawRecord {
    /// Whether the record-level tool result wrapper reports a failure.
    pub fn tool_result_error(&self) -> bool {
        match &self.tool_use_result {
            Some(Value::Object(map)) => ["is_error", "isError"]
                .iter()
                .any(|key| map.get(*key).and_then(Value::as_bool) == Some(true)),
            Some(Value::String(text)) => text.starts_with("Error"),
            _ => false,
        }
    }
}
