//! RecordSink port for pattern record output

use crate::domain::{foundation::DomainError, report::PatternRecord};

/// Persists the pattern records of one batch.
pub trait RecordSink: Send + Sync {
    /// Write all records, in order. Returns the number written.
    fn write_all(&self, records: &[PatternRecord]) -> Result<usize, DomainError>;
}
