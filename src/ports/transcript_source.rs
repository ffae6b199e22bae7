//! TranscriptSource port for raw record input

use crate::domain::{foundation::DomainError, transcript::RawRecord};

/// Supplies the raw chat records of one batch.
pub trait TranscriptSource: Send + Sync {
    /// Load every record in source order.
    ///
    /// Records that cannot be decoded are skipped by the implementation,
    /// not reported as errors.
    fn load(&self) -> Result<Vec<RawRecord>, DomainError>;
}
