use serde::{Deserialize, Serialize};

/// How a hideable block kind is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Header and full body
    Show,
    /// One-line indicator naming what was hidden
    #[default]
    Hide,
    /// Nothing at all
    Suppress,
}

/// Display settings for one transcript.
///
/// Human text, assistant text, summaries and parse errors are not listed:
/// they are always shown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayPolicy {
    pub thinking: Visibility,
    pub tool_calls: Visibility,
    pub tool_results: Visibility,
    pub system: Visibility,
    pub timestamps: bool,
    /// Cut shown bodies longer than this many characters
    pub max_length: Option<usize>,
}
