use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value, json};

/// Number of characters of an undecodable line kept for display.
pub const PREVIEW_CHARS: usize = 100;

/// One decoded line of a session log.
///
/// Every physical input line produces exactly one `Record`, including lines
/// that are blank or not valid JSON (see [`RecordKind::Unparseable`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// 1-based line number in the source file
    pub line_number: usize,
    pub kind: RecordKind,
    pub session_id: Option<String>,
    pub timestamp: Option<String>,
    /// Working directory the assistant was running in
    pub cwd: Option<String>,
    /// Network request this chunk belongs to (assistant turns only)
    pub request_id: Option<String>,
    /// True when the record was produced by a delegated sub-agent
    pub is_sidechain: bool,
}

impl Record {
    /// Create a record with no envelope fields set.
    pub fn new(line_number: usize, kind: RecordKind) -> Self {
        Self {
            line_number,
            kind,
            session_id: None,
            timestamp: None,
            cwd: None,
            request_id: None,
            is_sidechain: false,
        }
    }

    /// Human, assistant and system records are conversation turns;
    /// summaries, parse failures and unmodelled records are not.
    pub fn is_turn(&self) -> bool {
        matches!(
            self.kind,
            RecordKind::Human(_) | RecordKind::Assistant(_) | RecordKind::SystemNote(_)
        )
    }

    pub fn is_unparseable(&self) -> bool {
        matches!(self.kind, RecordKind::Unparseable(_))
    }
}

/// Discriminant of a record plus its kind-specific payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordKind {
    /// `type: "user"`
    Human(Turn),
    /// `type: "assistant"`
    Assistant(Turn),
    /// `type: "system"`
    SystemNote(SystemNote),
    /// `type: "summary"` (history was compacted upstream)
    Summary(SummaryNote),
    /// Line could not be decoded
    Unparseable(ParseFailure),
    /// A record type this crate does not model (e.g. `file-history-snapshot`)
    Other { record_type: String },
}

/// Message payload of a human or assistant record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Turn {
    pub content: MessageContent,
    /// Error flag carried by the record-level tool result wrapper
    pub tool_result_error: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SystemNote {
    pub text: String,
    pub level: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryNote {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseFailure {
    pub error: String,
    /// The original line, unchanged
    pub raw: String,
}

impl ParseFailure {
    /// First [`PREVIEW_CHARS`] characters of the original line.
    pub fn preview(&self) -> String {
        self.raw.chars().take(PREVIEW_CHARS).collect()
    }
}

/// Message content: either a bare string or a list of typed parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl Default for MessageContent {
    fn default() -> Self {
        MessageContent::Parts(Vec::new())
    }
}

impl MessageContent {
    /// Promote string content to a single text part.
    pub fn into_parts(self) -> Vec<ContentPart> {
        match self {
            MessageContent::Text(text) => vec![ContentPart::Text { text }],
            MessageContent::Parts(parts) => parts,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            MessageContent::Text(text) => text.is_empty(),
            MessageContent::Parts(parts) => parts.is_empty(),
        }
    }
}

/// One typed part of a message.
///
/// Parts this crate does not understand, and known parts whose fields do not
/// match the expected shape, are kept verbatim in [`ContentPart::Unknown`] so
/// they survive export unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentPart {
    Text {
        text: String,
    },
    Thinking {
        thinking: String,
        signature: Option<String>,
    },
    ToolUse {
        id: String,
        name: String,
        input: Value,
    },
    ToolResult {
        tool_use_id: String,
        content: Option<ToolResultContent>,
        is_error: bool,
    },
    Image {
        source: Value,
    },
    Unknown(Value),
}

/// Content of a `tool_result` part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolResultContent {
    Text(String),
    Parts(Vec<ContentPart>),
    Other(Value),
}

#[derive(Deserialize)]
struct TextFields {
    text: String,
}

#[derive(Deserialize)]
struct ThinkingFields {
    thinking: String,
    #[serde(default)]
    signature: Option<String>,
}

#[derive(Deserialize)]
struct ToolUseFields {
    id: String,
    name: String,
    #[serde(default)]
    input: Value,
}

#[derive(Deserialize)]
struct ToolResultFields {
    tool_use_id: String,
    #[serde(default)]
    content: Option<ToolResultContent>,
    #[serde(default)]
    is_error: Option<bool>,
}

#[derive(Deserialize)]
struct ImageFields {
    #[serde(default)]
    source: Value,
}

impl ContentPart {
    /// Interpret a raw JSON part. Never fails: anything unrecognised becomes
    /// [`ContentPart::Unknown`].
    pub fn from_value(value: Value) -> Self {
        let part_type = value.get("type").and_then(Value::as_str).unwrap_or_default();
        let parsed = match part_type {
            "text" => serde_json::from_value::<TextFields>(value.clone())
                .ok()
                .map(|f| ContentPart::Text { text: f.text }),
            "thinking" => serde_json::from_value::<ThinkingFields>(value.clone())
                .ok()
                .map(|f| ContentPart::Thinking {
                    thinking: f.thinking,
                    signature: f.signature,
                }),
            "tool_use" => serde_json::from_value::<ToolUseFields>(value.clone())
                .ok()
                .map(|f| ContentPart::ToolUse {
                    id: f.id,
                    name: f.name,
                    input: f.input,
                }),
            "tool_result" => serde_json::from_value::<ToolResultFields>(value.clone())
                .ok()
                .map(|f| ContentPart::ToolResult {
                    tool_use_id: f.tool_use_id,
                    content: f.content,
                    is_error: f.is_error.unwrap_or(false),
                }),
            "image" => serde_json::from_value::<ImageFields>(value.clone())
                .ok()
                .map(|f| ContentPart::Image { source: f.source }),
            _ => None,
        };
        parsed.unwrap_or(ContentPart::Unknown(value))
    }

    /// Render back to the wire shape.
    pub fn to_value(&self) -> Value {
        match self {
            ContentPart::Text { text } => json!({ "type": "text", "text": text }),
            ContentPart::Thinking {
                thinking,
                signature,
            } => {
                let mut map = Map::new();
                map.insert("type".to_string(), json!("thinking"));
                map.insert("thinking".to_string(), json!(thinking));
                if let Some(signature) = signature {
                    map.insert("signature".to_string(), json!(signature));
                }
                Value::Object(map)
            }
            ContentPart::ToolUse { id, name, input } => json!({
                "type": "tool_use",
                "id": id,
                "name": name,
                "input": input,
            }),
            ContentPart::ToolResult {
                tool_use_id,
                content,
                is_error,
            } => {
                let mut map = Map::new();
                map.insert("type".to_string(), json!("tool_result"));
                map.insert("tool_use_id".to_string(), json!(tool_use_id));
                if let Some(content) = content {
                    map.insert(
                        "content".to_string(),
                        serde_json::to_value(content).unwrap_or(Value::Null),
                    );
                }
                if *is_error {
                    map.insert("is_error".to_string(), json!(true));
                }
                Value::Object(map)
            }
            ContentPart::Image { source } => json!({ "type": "image", "source": source }),
            ContentPart::Unknown(value) => value.clone(),
        }
    }

    /// Wire `type` tag of this part (`"unknown"` when the raw value has none).
    pub fn type_name(&self) -> &str {
        match self {
            ContentPart::Text { .. } => "text",
            ContentPart::Thinking { .. } => "thinking",
            ContentPart::ToolUse { .. } => "tool_use",
            ContentPart::ToolResult { .. } => "tool_result",
            ContentPart::Image { .. } => "image",
            ContentPart::Unknown(value) => value
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("unknown"),
        }
    }
}

impl<'de> Deserialize<'de> for ContentPart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(ContentPart::from_value)
    }
}

impl Serialize for ContentPart {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_value().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_content_deserializes_as_text() {
        let content: MessageContent = serde_json::from_value(json!("hello")).unwrap();
        assert_eq!(content, MessageContent::Text("hello".to_string()));
        assert_eq!(
            content.into_parts(),
            vec![ContentPart::Text {
                text: "hello".to_string()
            }]
        );
    }

    #[test]
    fn test_unknown_part_is_preserved_verbatim() {
        let raw = json!({ "type": "server_tool_use", "id": "srv_1", "extra": [1, 2] });
        let part = ContentPart::from_value(raw.clone());
        assert_eq!(part, ContentPart::Unknown(raw.clone()));
        assert_eq!(part.type_name(), "server_tool_use");
        assert_eq!(serde_json::to_value(&part).unwrap(), raw);
    }

    #[test]
    fn test_known_part_with_wrong_shape_falls_back_to_unknown() {
        let raw = json!({ "type": "text", "text": 42 });
        assert_eq!(ContentPart::from_value(raw.clone()), ContentPart::Unknown(raw));
    }

    #[test]
    fn test_tool_result_with_nested_parts() {
        let raw = json!({
            "type": "tool_result",
            "tool_use_id": "toolu_1",
            "content": [
                { "type": "text", "text": "line" },
                { "type": "image", "source": { "type": "base64", "data": "AAAA" } }
            ],
            "is_error": true
        });
        let part = ContentPart::from_value(raw.clone());
        match &part {
            ContentPart::ToolResult {
                tool_use_id,
                content: Some(ToolResultContent::Parts(parts)),
                is_error,
            } => {
                assert_eq!(tool_use_id, "toolu_1");
                assert_eq!(parts.len(), 2);
                assert_eq!(parts[1].type_name(), "image");
                assert!(*is_error);
            }
            other => panic!("unexpected part: {other:?}"),
        }
        assert_eq!(part.to_value(), raw);
    }

    #[test]
    fn test_thinking_signature_survives_serialization() {
        let raw = json!({ "type": "thinking", "thinking": "hmm", "signature": "sig" });
        let part = ContentPart::from_value(raw.clone());
        assert_eq!(part.to_value(), raw);
    }

    #[test]
    fn test_parse_failure_preview_is_char_bounded() {
        let failure = ParseFailure {
            error: "bad".to_string(),
            raw: "é".repeat(150),
        };
        assert_eq!(failure.preview().chars().count(), PREVIEW_CHARS);
    }
}
