// Error types
pub mod error;

// Claude Code session logs
pub mod claude;

pub use claude::{
    RecordReader, ResolutionResult, ResolveOptions, SessionResolver, decode_line,
    extract_blocks, find_first_session_id, open_records,
};

pub use error::{Error, Result};
