//! JSON-lines pattern record writer

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

use super::errors::SinkError;
use crate::domain::foundation::DomainError;
use crate::domain::report::PatternRecord;
use crate::ports::RecordSink;

/// Writes one [`PatternRecord`] per line, to a file or to stdout.
#[derive(Debug, Clone, Default)]
pub struct JsonlRecordSink {
    path: Option<PathBuf>,
}

impl JsonlRecordSink {
    pub fn to_file(path: impl AsRef<Path>) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
        }
    }

    pub fn to_stdout() -> Self {
        Self { path: None }
    }

    fn encode<W: Write>(records: &[PatternRecord], out: &mut W) -> Result<(), SinkError> {
        let target = PathBuf::from("<stdout>");
        for record in records {
            let line = serde_json::to_string(record).map_err(|source| SinkError::Serialization {
                id: record.id.clone(),
                source,
            })?;
            writeln!(out, "{}", line).map_err(|source| SinkError::Io {
                path: target.clone(),
                source,
            })?;
        }
        out.flush().map_err(|source| SinkError::Io {
            path: target,
            source,
        })
    }

    fn write_file(path: &Path, records: &[PatternRecord]) -> Result<(), SinkError> {
        let io_err = |source| SinkError::Io {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent).map_err(io_err)?;
                parent
            }
            None => Path::new("."),
        };

        // The temp file is removed on drop unless persisted
        let mut temp = NamedTempFile::new_in(dir).map_err(io_err)?;
        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            Self::encode(records, &mut writer).map_err(|e| match e {
                SinkError::Io { source, .. } => io_err(source),
                other => other,
            })?;
        }
        temp.persist(path).map_err(|e| io_err(e.error))?;
        Ok(())
    }
}

impl RecordSink for JsonlRecordSink {
    fn write_all(&self, records: &[PatternRecord]) -> Result<usize, DomainError> {
        match &self.path {
            Some(path) => {
                Self::write_file(path, records)?;
                debug!(path = %path.display(), records = records.len(), "Pattern records written");
            }
            None => {
                let stdout = io::stdout();
                let mut lock = stdout.lock();
                Self::encode(records, &mut lock)?;
            }
        }
        Ok(records.len())
    }
}
