//! JSON-lines transcript reader

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::errors::SourceError;
use crate::domain::foundation::DomainError;
use crate::domain::transcript::RawRecord;
use crate::ports::TranscriptSource;

/// Reads one [`RawRecord`] per line from a file.
///
/// Blank lines are ignored. Lines that are not UTF-8 or not valid JSON
/// objects are logged and skipped, so one bad line never fails the batch.
#[derive(Debug, Clone)]
pub struct JsonlTranscriptSource {
    path: PathBuf,
}

impl JsonlTranscriptSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_records(&self) -> Result<Vec<RawRecord>, SourceError> {
        if !self.path.exists() {
            return Err(SourceError::NotFound(self.path.clone()));
        }
        let file = File::open(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;

        let mut records = Vec::new();
        let mut skipped = 0usize;
        for (index, bytes) in BufReader::new(file).split(b'\n').enumerate() {
            let bytes = bytes.map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;
            let line = match String::from_utf8(bytes) {
                Ok(line) => line,
                Err(e) => {
                    skipped += 1;
                    warn!(line = index + 1, error = %e, "Skipping transcript line that is not UTF-8");
                    continue;
                }
            };
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<RawRecord>(trimmed) {
                Ok(record) => records.push(record),
                Err(e) => {
                    skipped += 1;
                    warn!(line = index + 1, error = %e, "Skipping unreadable transcript line");
                }
            }
        }

        debug!(
            path = %self.path.display(),
            records = records.len(),
            skipped,
            "Transcript loaded"
        );
        Ok(records)
    }
}

impl TranscriptSource for JsonlTranscriptSource {
    fn load(&self) -> Result<Vec<RawRecord>, DomainError> {
        Ok(self.read_records()?)
    }
}
