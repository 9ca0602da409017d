// Engine module - processing between decoded records and CLI presentation

pub mod export;
pub mod policy;
pub mod render;
pub mod summary;

pub use export::{
    ApiContent, ApiExport, ApiMessage, ChunkReassembler, Role, export_file, reassemble,
};
pub use policy::{DisplayPolicy, Visibility};
pub use render::{RenderContext, TranscriptRenderer, truncate_body};
pub use summary::{MetadataAggregator, summarize_file, summarize_records};
