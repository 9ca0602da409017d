//! Custom assertions for logscribe-specific validation.
//!
//! Provides high-level assertions that make tests more readable:
//! - Exported message role sequences
//! - Session listing order
//! - Metadata fields

use anyhow::{Context, Result};
use serde_json::Value;

/// Assert that an export document has exactly these roles, in order.
pub fn assert_message_roles(json: &Value, expected: &[&str]) -> Result<()> {
    let messages = json["messages"]
        .as_array()
        .context("Expected 'messages' array in JSON")?;

    let roles: Vec<&str> = messages
        .iter()
        .map(|m| m["role"].as_str().unwrap_or("<missing>"))
        .collect();

    if roles != expected {
        anyhow::bail!("Expected roles {:?}, got {:?}", expected, roles);
    }

    Ok(())
}

/// Assert that a session listing contains these ids, in order.
pub fn assert_session_ids(json: &Value, expected: &[&str]) -> Result<()> {
    let sessions = json["sessions"]
        .as_array()
        .context("Expected 'sessions' array in JSON")?;

    let ids: Vec<&str> = sessions
        .iter()
        .map(|s| s["session_id"].as_str().unwrap_or("<missing>"))
        .collect();

    if ids != expected {
        anyhow::bail!("Expected sessions {:?}, got {:?}", expected, ids);
    }

    Ok(())
}

/// Assert that a metadata document reports the given counts.
pub fn assert_metadata_counts(json: &Value, messages: u64, tool_calls: u64) -> Result<()> {
    let message_count = json["message_count"]
        .as_u64()
        .context("Expected 'message_count' in JSON")?;
    let tool_call_count = json["tool_call_count"]
        .as_u64()
        .context("Expected 'tool_call_count' in JSON")?;

    if (message_count, tool_call_count) != (messages, tool_calls) {
        anyhow::bail!(
            "Expected {} messages and {} tool calls, got {} and {}",
            messages,
            tool_calls,
            message_count,
            tool_call_count
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assert_message_roles() {
        let doc = json!({"messages": [{"role": "user"}, {"role": "assistant"}]});
        assert!(assert_message_roles(&doc, &["user", "assistant"]).is_ok());
        assert!(assert_message_roles(&doc, &["assistant"]).is_err());
    }

    #[test]
    fn test_assert_session_ids() {
        let doc = json!({"sessions": [{"session_id": "b"}, {"session_id": "a"}]});
        assert!(assert_session_ids(&doc, &["b", "a"]).is_ok());
        assert!(assert_session_ids(&doc, &["a", "b"]).is_err());
        assert!(assert_session_ids(&json!({}), &[]).is_err());
    }

    #[test]
    fn test_assert_metadata_counts() {
        let doc = json!({"message_count": 3, "tool_call_count": 1});
        assert!(assert_metadata_counts(&doc, 3, 1).is_ok());
        assert!(assert_metadata_counts(&doc, 2, 1).is_err());
    }
}
