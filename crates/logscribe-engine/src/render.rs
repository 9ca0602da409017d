use crate::policy::{DisplayPolicy, Visibility};
use logscribe_providers::extract_blocks;
use logscribe_types::{ContentBlock, Record};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;

const UNKNOWN_TOOL: &str = "unknown tool";

/// Per-file state carried between records while rendering.
#[derive(Debug, Default)]
pub struct RenderContext {
    tool_names: HashMap<String, String>,
}

impl RenderContext {
    pub fn register_tool(&mut self, id: &str, name: &str) {
        self.tool_names.insert(id.to_string(), name.to_string());
    }

    pub fn tool_name(&self, id: &str) -> Option<&str> {
        self.tool_names.get(id).map(String::as_str)
    }
}

/// Renders the records of one session file as plain text.
///
/// Create one renderer per file: tool results are named after the tool call
/// that produced them, which is looked up in this renderer's context.
#[derive(Debug)]
pub struct TranscriptRenderer {
    policy: DisplayPolicy,
    context: RenderContext,
}

impl TranscriptRenderer {
    pub fn new(policy: DisplayPolicy) -> Self {
        Self {
            policy,
            context: RenderContext::default(),
        }
    }

    /// Render one record; `None` when nothing of it is visible.
    pub fn render_record(&mut self, record: &Record) -> Option<String> {
        let sections: Vec<String> = extract_blocks(record)
            .into_iter()
            .filter_map(|block| self.render_block(block))
            .collect();

        if sections.is_empty() {
            return None;
        }

        let body = sections.join("\n\n");
        match (&record.timestamp, self.policy.timestamps) {
            (Some(ts), true) => Some(format!("[{}]\n{}", ts, body)),
            _ => Some(body),
        }
    }

    fn render_block(&mut self, block: ContentBlock) -> Option<String> {
        match block {
            ContentBlock::HumanText { text } => Some(self.section("USER:", &text)),
            ContentBlock::AssistantText { text } => Some(self.section("ASSISTANT:", &text)),
            ContentBlock::Summary { text } => Some(self.section("SUMMARY:", &text)),
            ContentBlock::ParseError {
                line_number,
                error,
                preview,
            } => Some(format!(
                "PARSE ERROR (line {}): {}\n{}",
                line_number, error, preview
            )),
            ContentBlock::Thinking { text } => match self.policy.thinking {
                Visibility::Show => Some(self.section("THINKING:", &text)),
                Visibility::Hide => Some(format!(
                    "[thinking hidden: {} chars]",
                    text.chars().count()
                )),
                Visibility::Suppress => None,
            },
            ContentBlock::ToolCall {
                name,
                id,
                input,
                is_sub_agent,
            } => {
                self.context.register_tool(&id, &name);
                let sub_agent = if is_sub_agent { " (sub-agent)" } else { "" };
                match self.policy.tool_calls {
                    Visibility::Show => Some(self.section(
                        &format!("TOOL CALL: {} [{}]{}", name, id, sub_agent),
                        &format_input(&input),
                    )),
                    Visibility::Hide => Some(format!("[tool call hidden: {}{}]", name, sub_agent)),
                    Visibility::Suppress => None,
                }
            }
            ContentBlock::ToolResult {
                id, text, is_error, ..
            } => {
                let name = self.context.tool_name(&id).unwrap_or(UNKNOWN_TOOL).to_string();
                match self.policy.tool_results {
                    Visibility::Show => {
                        let status = if is_error { " (error)" } else { "" };
                        Some(self.section(&format!("TOOL RESULT: {}{}", name, status), &text))
                    }
                    Visibility::Hide => Some(format!(
                        "[tool result hidden: {} ({}), {} chars]",
                        name,
                        if is_error { "error" } else { "success" },
                        text.chars().count()
                    )),
                    Visibility::Suppress => None,
                }
            }
            ContentBlock::SystemNote { text, level } => match self.policy.system {
                Visibility::Show => {
                    let header = match level {
                        Some(level) => format!("SYSTEM ({}):", level),
                        None => "SYSTEM:".to_string(),
                    };
                    Some(self.section(&header, &text))
                }
                Visibility::Hide => Some(format!(
                    "[system note hidden: {} chars]",
                    text.chars().count()
                )),
                Visibility::Suppress => None,
            },
        }
    }

    fn section(&self, header: &str, body: &str) -> String {
        format!("{}\n{}", header, truncate_body(body, self.policy.max_length))
    }
}

fn format_input(input: &Value) -> String {
    serde_json::to_string_pretty(input).unwrap_or_else(|_| input.to_string())
}

/// Cut `text` to `max_length` characters, appending a trailer that reports
/// how much was dropped.
pub fn truncate_body(text: &str, max_length: Option<usize>) -> Cow<'_, str> {
    let Some(max) = max_length else {
        return Cow::Borrowed(text);
    };
    let total = text.chars().count();
    if total <= max {
        return Cow::Borrowed(text);
    }

    let head: String = text.chars().take(max).collect();
    Cow::Owned(format!(
        "{}...\n[{} characters truncated, {} total]",
        head,
        total - max,
        total
    ))
}
