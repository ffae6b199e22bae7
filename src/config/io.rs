//! Input/output configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Transcript input and record output locations
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IoConfig {
    /// JSON-lines transcript file
    #[serde(default)]
    pub input: PathBuf,

    /// JSON-lines record file; stdout when unset
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl IoConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.input.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("io.input"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_missing() {
        assert_eq!(
            IoConfig::default().validate(),
            Err(ValidationError::MissingRequired("io.input"))
        );
    }

    #[test]
    fn output_is_optional() {
        let config = IoConfig {
            input: PathBuf::from("transcripts.jsonl"),
            output: None,
        };
        assert!(config.validate().is_ok());
    }
}
