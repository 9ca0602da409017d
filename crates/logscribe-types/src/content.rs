use serde::Serialize;
use serde_json::Value;

/// Normalized display/export unit extracted from a [`crate::Record`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Thinking {
        text: String,
    },
    AssistantText {
        text: String,
    },
    HumanText {
        text: String,
    },
    ToolCall {
        name: String,
        id: String,
        input: Value,
        is_sub_agent: bool,
    },
    /// Aggregated output of one tool invocation.
    ToolResult {
        id: String,
        text: String,
        is_error: bool,
        /// The result was delivered as more than one sub-part
        has_multiple_parts: bool,
        /// At least one sub-part (e.g. an image) was replaced by a marker
        has_non_text_parts: bool,
    },
    SystemNote {
        text: String,
        level: Option<String>,
    },
    Summary {
        text: String,
    },
    ParseError {
        line_number: usize,
        error: String,
        preview: String,
    },
}

impl ContentBlock {
    /// Short human-readable name of the block kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ContentBlock::Thinking { .. } => "thinking",
            ContentBlock::AssistantText { .. } => "assistant text",
            ContentBlock::HumanText { .. } => "user text",
            ContentBlock::ToolCall { .. } => "tool call",
            ContentBlock::ToolResult { .. } => "tool result",
            ContentBlock::SystemNote { .. } => "system note",
            ContentBlock::Summary { .. } => "summary",
            ContentBlock::ParseError { .. } => "parse error",
        }
    }
}
