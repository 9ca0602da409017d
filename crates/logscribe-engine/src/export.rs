use logscribe_providers::{Error, Result, open_records};
use logscribe_types::{ContentPart, MessageContent, Record, RecordKind, Turn};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Message content in the shape it had on input: a string or a list of parts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiContent {
    Text(String),
    Blocks(Vec<ContentPart>),
}

impl From<MessageContent> for ApiContent {
    fn from(content: MessageContent) -> Self {
        match content {
            MessageContent::Text(text) => ApiContent::Text(text),
            MessageContent::Parts(parts) => ApiContent::Blocks(parts),
        }
    }
}

impl ApiContent {
    fn into_parts(self) -> Vec<ContentPart> {
        match self {
            ApiContent::Text(text) => vec![ContentPart::Text { text }],
            ApiContent::Blocks(parts) => parts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiMessage {
    pub role: Role,
    pub content: ApiContent,
}

/// Reassembled conversation ready for an API request body.
///
/// Only `messages` is serialized; the flags feed stderr warnings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApiExport {
    pub messages: Vec<ApiMessage>,
    /// History was compacted upstream, so earlier turns are missing
    #[serde(skip)]
    pub has_summary: bool,
    /// Undecodable lines left out of the export
    #[serde(skip)]
    pub skipped_unparseable: usize,
}

/// Assistant chunks sharing one request id, not yet emitted.
#[derive(Debug)]
struct PendingTurn {
    request_id: Option<String>,
    content: MessageContent,
}

impl PendingTurn {
    fn accepts(&self, request_id: Option<&str>) -> bool {
        matches!((self.request_id.as_deref(), request_id), (Some(open), Some(next)) if open == next)
    }
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    Accumulating(PendingTurn),
}

/// Merges streamed assistant chunks back into whole API turns.
///
/// Assistant records with the same request id collapse into one message;
/// consecutive human records collapse into one message.
#[derive(Debug, Default)]
pub struct ChunkReassembler {
    state: State,
    export: ApiExport,
}

impl ChunkReassembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: Record) {
        if record.is_sidechain {
            return;
        }

        match record.kind {
            RecordKind::Assistant(Turn { content, .. }) => {
                self.push_assistant(record.request_id, content)
            }
            RecordKind::Human(Turn { content, .. }) => self.push_human(content),
            RecordKind::Summary(_) => self.export.has_summary = true,
            RecordKind::Unparseable(_) => self.export.skipped_unparseable += 1,
            RecordKind::SystemNote(_) | RecordKind::Other { .. } => {}
        }
    }

    pub fn finish(mut self) -> ApiExport {
        self.flush();
        self.export
    }

    fn push_assistant(&mut self, request_id: Option<String>, content: MessageContent) {
        if let State::Accumulating(pending) = &mut self.state
            && pending.accepts(request_id.as_deref())
        {
            let mut parts = std::mem::take(&mut pending.content).into_parts();
            parts.extend(content.into_parts());
            pending.content = MessageContent::Parts(parts);
            return;
        }

        self.flush();
        self.state = State::Accumulating(PendingTurn {
            request_id,
            content,
        });
    }

    fn push_human(&mut self, content: MessageContent) {
        self.flush();

        if let Some(last) = self.export.messages.last_mut()
            && last.role == Role::User
        {
            let previous = std::mem::replace(&mut last.content, ApiContent::Blocks(Vec::new()));
            let mut parts = previous.into_parts();
            parts.extend(content.into_parts());
            last.content = ApiContent::Blocks(parts);
            return;
        }

        self.export.messages.push(ApiMessage {
            role: Role::User,
            content: content.into(),
        });
    }

    fn flush(&mut self) {
        if let State::Accumulating(pending) = std::mem::take(&mut self.state) {
            self.export.messages.push(ApiMessage {
                role: Role::Assistant,
                content: pending.content.into(),
            });
        }
    }
}

/// Reassemble a complete record stream.
pub fn reassemble(records: impl IntoIterator<Item = Record>) -> ApiExport {
    let mut reassembler = ChunkReassembler::new();
    for record in records {
        reassembler.push(record);
    }
    reassembler.finish()
}

/// Stream a session file through the reassembler.
pub fn export_file(path: &Path) -> Result<ApiExport> {
    let mut reassembler = ChunkReassembler::new();
    for record in open_records(path)? {
        reassembler.push(record.map_err(|e| Error::io(path, e))?);
    }
    Ok(reassembler.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use logscribe_providers::decode_line;
    use serde_json::json;

    fn records(lines: &[serde_json::Value]) -> Vec<Record> {
        lines
            .iter()
            .enumerate()
            .map(|(i, line)| decode_line(&line.to_string(), i + 1))
            .collect()
    }

    fn text(t: &str) -> ContentPart {
        ContentPart::Text {
            text: t.to_string(),
        }
    }

    #[test]
    fn test_chunks_with_same_request_id_merge_in_order() {
        let export = reassemble(records(&[
            json!({"type": "user", "message": {"content": "go"}}),
            json!({"type": "assistant", "requestId": "r1", "message": {"content": [{"type": "thinking", "thinking": "t"}]}}),
            json!({"type": "assistant", "requestId": "r1", "message": {"content": [{"type": "text", "text": "a"}]}}),
            json!({"type": "assistant", "requestId": "r1", "message": {"content": [{"type": "tool_use", "id": "x", "name": "Bash", "input": {}}]}}),
        ]));

        assert_eq!(export.messages.len(), 2);
        let ApiContent::Blocks(parts) = &export.messages[1].content else {
            panic!("expected blocks");
        };
        assert_eq!(
            parts.iter().map(ContentPart::type_name).collect::<Vec<_>>(),
            vec!["thinking", "text", "tool_use"]
        );
    }

    #[test]
    fn test_new_request_id_starts_new_turn() {
        let export = reassemble(records(&[
            json!({"type": "assistant", "requestId": "r1", "message": {"content": [{"type": "text", "text": "a"}]}}),
            json!({"type": "assistant", "requestId": "r2", "message": {"content": [{"type": "text", "text": "b"}]}}),
        ]));
        assert_eq!(export.messages.len(), 2);
        assert!(export.messages.iter().all(|m| m.role == Role::Assistant));
    }

    #[test]
    fn test_missing_request_id_never_merges() {
        let export = reassemble(records(&[
            json!({"type": "assistant", "message": {"content": "a"}}),
            json!({"type": "assistant", "message": {"content": "b"}}),
        ]));
        assert_eq!(
            export.messages,
            vec![
                ApiMessage {
                    role: Role::Assistant,
                    content: ApiContent::Text("a".to_string())
                },
                ApiMessage {
                    role: Role::Assistant,
                    content: ApiContent::Text("b".to_string())
                },
            ]
        );
    }

    #[test]
    fn test_consecutive_human_records_merge() {
        let export = reassemble(records(&[
            json!({"type": "user", "message": {"content": "first"}}),
            json!({"type": "user", "message": {"content": [{"type": "text", "text": "second"}]}}),
        ]));
        assert_eq!(
            export.messages,
            vec![ApiMessage {
                role: Role::User,
                content: ApiContent::Blocks(vec![text("first"), text("second")]),
            }]
        );
    }

    #[test]
    fn test_sidechain_does_not_interrupt_accumulation() {
        let export = reassemble(records(&[
            json!({"type": "assistant", "requestId": "r1", "message": {"content": [{"type": "text", "text": "a"}]}}),
            json!({"type": "user", "isSidechain": true, "message": {"content": "sub"}}),
            json!({"type": "assistant", "requestId": "r1", "message": {"content": [{"type": "text", "text": "b"}]}}),
        ]));
        assert_eq!(
            export.messages,
            vec![ApiMessage {
                role: Role::Assistant,
                content: ApiContent::Blocks(vec![text("a"), text("b")]),
            }]
        );
    }

    #[test]
    fn test_skipped_records_are_counted() {
        let mut input = records(&[
            json!({"type": "summary", "summary": "earlier work"}),
            json!({"type": "system", "content": "note"}),
            json!({"type": "file-history-snapshot"}),
            json!({"type": "user", "message": {"content": "hi"}}),
        ]);
        input.push(decode_line("not-json", 5));

        let export = reassemble(input);
        assert!(export.has_summary);
        assert_eq!(export.skipped_unparseable, 1);
        assert_eq!(export.messages.len(), 1);
    }

    #[test]
    fn test_serialized_shape_hides_flags() {
        let mut input = records(&[
            json!({"type": "summary", "summary": "s"}),
            json!({"type": "user", "message": {"content": "hi"}}),
            json!({"type": "assistant", "requestId": "r", "message": {"content": [{"type": "text", "text": "yo"}, {"type": "server_tool_use", "id": "s1"}]}}),
        ]);
        input.push(decode_line("{", 4));

        let value = serde_json::to_value(reassemble(input)).unwrap();
        assert_eq!(
            value,
            json!({"messages": [
                {"role": "user", "content": "hi"},
                {"role": "assistant", "content": [
                    {"type": "text", "text": "yo"},
                    {"type": "server_tool_use", "id": "s1"}
                ]}
            ]})
        );
    }

    #[test]
    fn test_export_refeeds_to_same_sequence() {
        let export = reassemble(records(&[
            json!({"type": "user", "message": {"content": "go"}}),
            json!({"type": "assistant", "requestId": "r1", "message": {"content": [{"type": "text", "text": "a"}]}}),
            json!({"type": "assistant", "requestId": "r1", "message": {"content": [{"type": "tool_use", "id": "t", "name": "Read", "input": {"path": "x"}}]}}),
            json!({"type": "user", "message": {"content": [{"type": "tool_result", "tool_use_id": "t", "content": "ok"}]}}),
            json!({"type": "assistant", "requestId": "r2", "message": {"content": "done"}}),
        ]));

        let refed: Vec<serde_json::Value> = serde_json::to_value(&export).unwrap()["messages"]
            .as_array()
            .unwrap()
            .iter()
            .enumerate()
            .map(|(i, message)| {
                json!({
                    "type": message["role"],
                    "requestId": format!("again-{i}"),
                    "message": {"content": message["content"]}
                })
            })
            .collect();

        assert_eq!(reassemble(records(&refed)).messages, export.messages);
    }

    #[test]
    fn test_export_file_streams_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("s.jsonl");
        std::fs::write(
            &path,
            "{\"type\":\"user\",\"message\":{\"content\":\"hi\"}}\n\n{\"type\":\"assistant\",\"message\":{\"content\":\"yo\"}}\n",
        )
        .unwrap();

        let export = export_file(&path).unwrap();
        assert_eq!(export.messages.len(), 2);
        assert_eq!(export.skipped_unparseable, 1);
    }
}
