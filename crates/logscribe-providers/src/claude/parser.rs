use logscribe_types::{
    MessageContent, ParseFailure, Record, RecordKind, SummaryNote, SystemNote, Turn,
};
use serde_json::Value;

use super::schema::RawRecord;

/// Decode one physical line into a [`Record`].
///
/// Never fails: blank lines, invalid JSON, non-object values and turns whose
/// content has an impossible shape all become [`RecordKind::Unparseable`]
/// carrying the original text.
pub fn decode_line(line: &str, line_number: usize) -> Record {
    decode_envelope(line, line_number).unwrap_or_else(|error| {
        Record::new(
            line_number,
            RecordKind::Unparseable(ParseFailure {
                error,
                raw: line.to_string(),
            }),
        )
    })
}

fn decode_envelope(line: &str, line_number: usize) -> Result<Record, String> {
    if line.trim().is_empty() {
        return Err("empty line".to_string());
    }

    let value: Value = serde_json::from_str(line).map_err(|e| e.to_string())?;
    if !value.is_object() {
        return Err(format!("expected a JSON object, found {}", json_kind(&value)));
    }

    let raw: RawRecord = serde_json::from_value(value).map_err(|e| e.to_string())?;
    let kind = decode_kind(&raw)?;

    Ok(Record {
        line_number,
        kind,
        session_id: raw.session_id,
        timestamp: raw.timestamp,
        cwd: raw.cwd,
        request_id: raw.request_id,
        is_sidechain: raw.is_sidechain.unwrap_or(false),
    })
}

fn decode_kind(raw: &RawRecord) -> Result<RecordKind, String> {
    let record_type = raw.record_type.as_deref().unwrap_or_default();
    let kind = match record_type {
        "user" => RecordKind::Human(decode_turn(raw)?),
        "assistant" => RecordKind::Assistant(decode_turn(raw)?),
        "system" => RecordKind::SystemNote(SystemNote {
            text: system_text(raw),
            level: raw.level.clone(),
        }),
        "summary" => RecordKind::Summary(SummaryNote {
            text: raw.summary.clone().unwrap_or_default(),
        }),
        "" => return Err("missing record type".to_string()),
        other => RecordKind::Other {
            record_type: other.to_string(),
        },
    };
    Ok(kind)
}

fn decode_turn(raw: &RawRecord) -> Result<Turn, String> {
    let content = match raw.message.as_ref().and_then(|m| m.content.clone()) {
        None | Some(Value::Null) => MessageContent::default(),
        Some(value) => serde_json::from_value::<MessageContent>(value)
            .map_err(|_| "message content is neither a string nor a list of parts".to_string())?,
    };

    Ok(Turn {
        content,
        tool_result_error: raw.tool_result_error(),
    })
}

fn system_text(raw: &RawRecord) -> String {
    match &raw.content {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => raw.subtype.clone().unwrap_or_default(),
        Some(other) => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
