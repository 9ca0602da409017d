pub mod discovery;
pub mod io;
pub mod normalize;
pub mod parser;
pub(crate) mod schema;

pub use self::discovery::{ResolutionResult, ResolveOptions, SessionResolver};
pub use self::io::{RecordReader, find_first_session_id, open_records};
pub use self::normalize::extract_blocks;
pub use self::parser::decode_line;
