//! In-memory transcript source and record sink.
//!
//! Useful for tests and for embedding the scorer in another process.

use std::sync::{Arc, RwLock};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::report::PatternRecord;
use crate::domain::transcript::RawRecord;
use crate::ports::{RecordSink, TranscriptSource};

/// Serves a fixed set of records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTranscriptSource {
    records: Vec<RawRecord>,
}

impl InMemoryTranscriptSource {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self { records }
    }
}

impl TranscriptSource for InMemoryTranscriptSource {
    fn load(&self) -> Result<Vec<RawRecord>, DomainError> {
        Ok(self.records.clone())
    }
}

/// Collects written records; clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordSink {
    records: Arc<RwLock<Vec<PatternRecord>>>,
}

impl InMemoryRecordSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, in write order.
    pub fn records(&self) -> Vec<PatternRecord> {
        self.records
            .read()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordSink for InMemoryRecordSink {
    fn write_all(&self, records: &[PatternRecord]) -> Result<usize, DomainError> {
        let mut guard = self.records.write().map_err(|_| {
            DomainError::new(ErrorCode::SinkUnavailable, "In-memory sink lock poisoned")
        })?;
        guard.extend_from_slice(records);
        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::classification::{Classification, Pattern};
    use crate::domain::scoring::ScoreVector;

    #[test]
    fn source_returns_records_unchanged() {
        let records = vec![RawRecord::new("u1", "c1", "user", "hi")];
        let source = InMemoryTranscriptSource::new(records.clone());
        assert_eq!(source.load().unwrap(), records);
    }

    #[test]
    fn sink_clones_share_buffer() {
        let sink = InMemoryRecordSink::new();
        let handle = sink.clone();
        let record = PatternRecord::new(
            "u1",
            ScoreVector::zero(),
            Classification::new(Pattern::F, 0.9),
        );
        sink.write_all(&[record.clone()]).unwrap();
        assert_eq!(handle.records(), vec![record]);
        assert_eq!(handle.len(), 1);
    }
}
