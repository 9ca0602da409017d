use crate::path::{AGENT_FILE_PREFIX, Error, Result};

/// Longest session-id prefix accepted from user input
pub const MAX_PREFIX_LEN: usize = 128;

/// Validate a session-id prefix before it is used for any lookup.
///
/// Only `[A-Za-z0-9_-]` is allowed.
pub fn validate_session_prefix(prefix: &str) -> Result<()> {
    let invalid = |reason: &str| Error::InvalidReference {
        reference: prefix.to_string(),
        reason: reason.to_string(),
    };

    if prefix.is_empty() {
        return Err(invalid("session id prefix is empty"));
    }

    if prefix.len() > MAX_PREFIX_LEN {
        return Err(invalid(&format!(
            "session id prefix is longer than {} characters",
            MAX_PREFIX_LEN
        )));
    }

    if let Some(bad) = prefix
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(invalid(&format!(
            "character {:?} is not allowed (use letters, digits, '-' or '_', or pass a path)",
            bad
        )));
    }

    Ok(())
}

/// Check whether a reference targets a sub-agent session by its own id.
pub fn is_agent_reference(reference: &str) -> bool {
    reference
        .get(..AGENT_FILE_PREFIX.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(AGENT_FILE_PREFIX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_uuid_prefixes() {
        assert!(validate_session_prefix("7f2abd2d").is_ok());
        assert!(validate_session_prefix("7f2abd2d-7cfc-4447-9ddd-3ca8d14e02e9").is_ok());
        assert!(validate_session_prefix("agent-a1b2_c3").is_ok());
    }

    #[test]
    fn test_rejects_shell_metacharacters() {
        for bad in ["abc;rm", "a b", "$(x)", "a*", "x'y", "a\nb"] {
            let err = validate_session_prefix(bad).unwrap_err();
            assert!(matches!(err, Error::InvalidReference { .. }), "{bad}");
        }
    }

    #[test]
    fn test_rejects_empty_and_oversized() {
        assert!(validate_session_prefix("").is_err());
        assert!(validate_session_prefix(&"a".repeat(MAX_PREFIX_LEN + 1)).is_err());
    }

    #[test]
    fn test_agent_reference_is_case_insensitive() {
        assert!(is_agent_reference("agent-abc"));
        assert!(is_agent_reference("AGENT-abc"));
        assert!(!is_agent_reference("agen"));
        assert!(!is_agent_reference("7f2abd2d"));
    }
}
