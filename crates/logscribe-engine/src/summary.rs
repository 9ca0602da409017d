use logscribe_providers::{Error, Result, extract_blocks, open_records};
use logscribe_types::{ContentBlock, Record, SessionMetadata};
use std::path::Path;

/// Folds records into [`SessionMetadata`] one at a time.
#[derive(Debug, Default)]
pub struct MetadataAggregator {
    metadata: SessionMetadata,
}

impl MetadataAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, record: &Record) {
        let meta = &mut self.metadata;

        if meta.session_id.is_none() {
            meta.session_id = record.session_id.clone();
        }
        if meta.project_path.is_none() {
            meta.project_path = record.cwd.clone();
        }
        if meta.started_at.is_none() {
            meta.started_at = record.timestamp.clone();
        }

        if record.is_turn() {
            meta.message_count += 1;
        }
        if record.is_sidechain {
            meta.has_sub_agents = true;
        }

        for block in extract_blocks(record) {
            if let ContentBlock::ToolCall { is_sub_agent, .. } = block {
                meta.tool_call_count += 1;
                meta.has_sub_agents |= is_sub_agent;
            }
        }
    }

    pub fn finish(self) -> SessionMetadata {
        self.metadata
    }
}

pub fn summarize_records<'a>(records: impl IntoIterator<Item = &'a Record>) -> SessionMetadata {
    let mut aggregator = MetadataAggregator::new();
    for record in records {
        aggregator.observe(record);
    }
    aggregator.finish()
}

/// Summarize a session file in one streaming pass.
pub fn summarize_file(path: &Path) -> Result<SessionMetadata> {
    let mut aggregator = MetadataAggregator::new();
    for record in open_records(path)? {
        aggregator.observe(&record.map_err(|e| Error::io(path, e))?);
    }
    Ok(aggregator.finish())
}
