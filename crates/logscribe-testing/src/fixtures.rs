//! Session log line builders.
//!
//! Lines are produced in the on-disk shape written by Claude Code so tests
//! exercise the real decoder.

use serde_json::{Value, json};

/// Fluent builder for the lines of one session log.
#[derive(Debug, Clone)]
pub struct SessionBuilder {
    session_id: String,
    cwd: Option<String>,
    sidechain: bool,
    clock: u32,
    lines: Vec<String>,
}

impl SessionBuilder {
    pub fn new(session_id: &str) -> Self {
        Self {
            session_id: session_id.to_string(),
            cwd: None,
            sidechain: false,
            clock: 0,
            lines: Vec::new(),
        }
    }

    /// Working directory recorded on every subsequent record.
    pub fn cwd(mut self, cwd: &str) -> Self {
        self.cwd = Some(cwd.to_string());
        self
    }

    /// Mark every subsequent record as produced by a sub-agent.
    pub fn sidechain(mut self, sidechain: bool) -> Self {
        self.sidechain = sidechain;
        self
    }

    /// Human turn with plain string content.
    pub fn user(self, text: &str) -> Self {
        self.record("user", None, json!({ "role": "user", "content": text }))
    }

    /// Human turn with a list of parts.
    pub fn user_parts(self, parts: Vec<Value>) -> Self {
        self.record("user", None, json!({ "role": "user", "content": parts }))
    }

    /// One streamed assistant chunk.
    pub fn assistant(self, request_id: &str, parts: Vec<Value>) -> Self {
        self.record(
            "assistant",
            Some(request_id),
            json!({ "role": "assistant", "content": parts }),
        )
    }

    pub fn system(mut self, text: &str, level: &str) -> Self {
        let mut value = self.envelope("system");
        value["content"] = json!(text);
        value["level"] = json!(level);
        self.lines.push(value.to_string());
        self
    }

    pub fn summary(mut self, text: &str) -> Self {
        self.lines
            .push(json!({ "type": "summary", "summary": text, "leafUuid": "leaf-1" }).to_string());
        self
    }

    /// Append a raw line exactly as given (e.g. malformed JSON).
    pub fn raw(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn to_jsonl(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }

    fn record(mut self, record_type: &str, request_id: Option<&str>, message: Value) -> Self {
        let mut value = self.envelope(record_type);
        value["message"] = message;
        if let Some(request_id) = request_id {
            value["requestId"] = json!(request_id);
        }
        self.lines.push(value.to_string());
        self
    }

    fn envelope(&mut self, record_type: &str) -> Value {
        self.clock += 1;
        let mut value = json!({
            "type": record_type,
            "sessionId": self.session_id,
            "uuid": format!("{}-{}", self.session_id, self.clock),
            "timestamp": format!("2025-01-01T00:{:02}:{:02}Z", self.clock / 60, self.clock % 60),
            "isSidechain": self.sidechain,
        });
        if let Some(cwd) = &self.cwd {
            value["cwd"] = json!(cwd);
        }
        value
    }
}

pub fn text(text: &str) -> Value {
    json!({ "type": "text", "text": text })
}

pub fn thinking(text: &str) -> Value {
    json!({ "type": "thinking", "thinking": text, "signature": "sig" })
}

pub fn tool_use(id: &str, name: &str, input: Value) -> Value {
    json!({ "type": "tool_use", "id": id, "name": name, "input": input })
}

pub fn tool_result(tool_use_id: &str, content: Value, is_error: bool) -> Value {
    json!({ "type": "tool_result", "tool_use_id": tool_use_id, "content": content, "is_error": is_error })
}

pub fn image() -> Value {
    json!({ "type": "image", "source": { "type": "base64", "media_type": "image/png", "data": "iVBORw0KGgo=" } })
}
