use logscribe_types::{
    ContentBlock, ContentPart, MessageContent, Record, RecordKind, ToolResultContent, Turn,
    is_sub_agent_tool,
};
use serde_json::Value;

/// Extract display blocks from a record, in source order.
pub fn extract_blocks(record: &Record) -> Vec<ContentBlock> {
    match &record.kind {
        RecordKind::Assistant(turn) => assistant_blocks(turn),
        RecordKind::Human(turn) => human_blocks(turn),
        RecordKind::SystemNote(note) => vec![ContentBlock::SystemNote {
            text: note.text.clone(),
            level: note.level.clone(),
        }],
        RecordKind::Summary(summary) => vec![ContentBlock::Summary {
            text: summary.text.clone(),
        }],
        RecordKind::Unparseable(failure) => vec![ContentBlock::ParseError {
            line_number: record.line_number,
            error: failure.error.clone(),
            preview: failure.preview(),
        }],
        RecordKind::Other { .. } => Vec::new(),
    }
}

fn assistant_blocks(turn: &Turn) -> Vec<ContentBlock> {
    let parts = match &turn.content {
        MessageContent::Text(text) => {
            return vec![ContentBlock::AssistantText { text: text.clone() }];
        }
        MessageContent::Parts(parts) => parts,
    };

    parts
        .iter()
        .filter_map(|part| match part {
            ContentPart::Thinking { thinking, .. } => Some(ContentBlock::Thinking {
                text: thinking.clone(),
            }),
            ContentPart::Text { text } => Some(ContentBlock::AssistantText { text: text.clone() }),
            ContentPart::ToolUse { id, name, input } => Some(ContentBlock::ToolCall {
                name: name.clone(),
                id: id.clone(),
                input: input.clone(),
                is_sub_agent: is_sub_agent_tool(name),
            }),
            _ => None,
        })
        .collect()
}

fn human_blocks(turn: &Turn) -> Vec<ContentBlock> {
    let parts = match &turn.content {
        MessageContent::Text(text) => {
            return vec![ContentBlock::HumanText { text: text.clone() }];
        }
        MessageContent::Parts(parts) => parts,
    };

    parts
        .iter()
        .enumerate()
        .filter_map(|(index, part)| match part {
            ContentPart::Text { text } => Some(ContentBlock::HumanText { text: text.clone() }),
            ContentPart::ToolResult {
                tool_use_id,
                content,
                is_error,
            } => Some(tool_result_block(
                tool_use_id,
                content.as_ref(),
                *is_error || turn.tool_result_error,
            )),
            ContentPart::Image { .. } => Some(ContentBlock::HumanText {
                text: format!("[image #{}]", index + 1),
            }),
            _ => None,
        })
        .collect()
}

fn tool_result_block(
    id: &str,
    content: Option<&ToolResultContent>,
    is_error: bool,
) -> ContentBlock {
    let mut has_multiple_parts = false;
    let mut has_non_text_parts = false;

    let text = match content {
        None => String::new(),
        Some(ToolResultContent::Text(text)) => text.clone(),
        Some(ToolResultContent::Parts(parts)) => {
            has_multiple_parts = parts.len() > 1;
            let mut sections = Vec::with_capacity(parts.len() * 2);
            for (index, part) in parts.iter().enumerate() {
                let n = index + 1;
                if has_multiple_parts {
                    sections.push(format!("[Content Block {}]", n));
                }
                match part {
                    ContentPart::Text { text } => sections.push(text.clone()),
                    other => {
                        has_non_text_parts = true;
                        sections.push(format!("[{} #{}]", other.type_name(), n));
                    }
                }
            }
            sections.join("\n")
        }
        Some(ToolResultContent::Other(Value::Null)) => String::new(),
        Some(ToolResultContent::Other(value)) => value.to_string(),
    };

    ContentBlock::ToolResult {
        id: id.to_string(),
        text,
        is_error,
        has_multiple_parts,
        has_non_text_parts,
    }
}
