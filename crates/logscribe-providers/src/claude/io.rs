use crate::{Error, Result};
use logscribe_types::{ParseFailure, Record, RecordKind};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::parser::decode_line;

/// Lines inspected when looking for the first session id of a file
pub const SESSION_ID_SCAN_LIMIT: usize = 1000;

/// Streaming iterator yielding one [`Record`] per physical line.
///
/// Lines that are not valid UTF-8 become unparseable records; only genuine
/// read failures are returned as `Err`. Callers should stop at the first
/// error.
pub struct RecordReader<R> {
    reader: R,
    buf: Vec<u8>,
    line_number: usize,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_number: 0,
        }
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = std::io::Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                self.line_number += 1;
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                    if self.buf.last() == Some(&b'\r') {
                        self.buf.pop();
                    }
                }

                let record = match std::str::from_utf8(&self.buf) {
                    Ok(line) => decode_line(line, self.line_number),
                    Err(err) => Record::new(
                        self.line_number,
                        RecordKind::Unparseable(ParseFailure {
                            error: format!("invalid UTF-8: {}", err),
                            raw: String::from_utf8_lossy(&self.buf).into_owned(),
                        }),
                    ),
                };
                Some(Ok(record))
            }
            Err(err) => Some(Err(err)),
        }
    }
}

/// Open a session log for streaming.
pub fn open_records(path: &Path) -> Result<RecordReader<BufReader<File>>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    Ok(RecordReader::new(BufReader::new(file)))
}

/// Stream a file until the first record carrying a session id.
///
/// Stops after [`SESSION_ID_SCAN_LIMIT`] lines.
pub fn find_first_session_id(path: &Path) -> Result<Option<String>> {
    for record in open_records(path)?.take(SESSION_ID_SCAN_LIMIT) {
        let record = record.map_err(|e| Error::io(path, e))?;
        if let Some(session_id) = record.session_id {
            return Ok(Some(session_id));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read_all(bytes: &[u8]) -> Vec<Record> {
        RecordReader::new(Cursor::new(bytes.to_vec()))
            .collect::<std::io::Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_one_record_per_line_including_malformed() {
        let input = b"{\"type\":\"user\",\"message\":{\"content\":\"a\"}}\n\nnot-json\n{\"type\":\"summary\",\"summary\":\"s\"}";
        let records = read_all(input);
        assert_eq!(records.len(), 4);
        assert_eq!(
            records.iter().map(|r| r.line_number).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );
        assert!(records[1].is_unparseable());
        assert!(records[2].is_unparseable());
    }

    #[test]
    fn test_crlf_terminators_are_stripped() {
        let records = read_all(b"{\"type\":\"user\",\"message\":{\"content\":\"a\"}}\r\nbad\r\n");
        assert_eq!(records.len(), 2);
        assert!(!records[0].is_unparseable());
        match &records[1].kind {
            RecordKind::Unparseable(failure) => assert_eq!(failure.raw, "bad"),
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_utf8_is_a_record_not_an_error() {
        let records = read_all(b"\xff\xfe\n{\"type\":\"system\",\"content\":\"x\"}\n");
        assert_eq!(records.len(), 2);
        match &records[0].kind {
            RecordKind::Unparseable(failure) => assert!(failure.error.contains("UTF-8")),
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(read_all(b"").is_empty());
    }

    #[test]
    fn test_find_first_session_id_skips_records_without_one() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("agent-1.jsonl");
        std::fs::write(
            &path,
            "garbage\n{\"type\":\"summary\",\"summary\":\"s\"}\n{\"type\":\"user\",\"sessionId\":\"P\",\"message\":{\"content\":\"x\"}}\n{\"type\":\"user\",\"sessionId\":\"Q\"}\n",
        )
        .unwrap();
        assert_eq!(find_first_session_id(&path).unwrap().as_deref(), Some("P"));
    }

    #[test]
    fn test_find_first_session_id_missing_file_names_path() {
        let err = find_first_session_id(Path::new("/nonexistent/agent-x.jsonl")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/agent-x.jsonl"));
    }
}
