//! Rubric compilation and loading errors.

use thiserror::Error;

use super::dimension::Dimension;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised while loading or compiling a scoring rubric.
///
/// Scoring itself never fails; every problem is caught when the rubric is
/// compiled.
#[derive(Debug, Error)]
pub enum RubricError {
    #[error("Dimension {dimension}: cue '{cue}' has invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        dimension: Dimension,
        cue: String,
        pattern: String,
        reason: String,
    },

    #[error("Dimension {dimension}: cue '{cue}' contains an empty term")]
    EmptyTerm { dimension: Dimension, cue: String },

    #[error("Dimension {dimension}: cue '{cue}' is defined more than once")]
    DuplicateCue { dimension: Dimension, cue: String },

    #[error("Dimension {dimension}: ladder references unknown cue '{cue}'")]
    UnknownCue { dimension: Dimension, cue: String },

    #[error("Dimension {dimension}: ladder score {score} exceeds 3")]
    ScoreOutOfRange { dimension: Dimension, score: u8 },

    #[error("Rubric has no table for dimension {0}")]
    MissingDimension(Dimension),

    #[error("Rubric defines dimension {0} more than once")]
    DuplicateDimension(Dimension),

    #[error("Failed to parse rubric: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Failed to read rubric file: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RubricError> for DomainError {
    fn from(err: RubricError) -> Self {
        let error = DomainError::new(ErrorCode::InvalidRubric, err.to_string());
        match &err {
            RubricError::InvalidPattern { dimension, cue, .. }
            | RubricError::EmptyTerm { dimension, cue }
            | RubricError::DuplicateCue { dimension, cue }
            | RubricError::UnknownCue { dimension, cue } => error
                .with_detail("dimension", dimension.to_string())
                .with_detail("cue", cue.clone()),
            RubricError::ScoreOutOfRange { dimension, .. }
            | RubricError::MissingDimension(dimension)
            | RubricError::DuplicateDimension(dimension) => {
                error.with_detail("dimension", dimension.to_string())
            }
            RubricError::Parse(_) | RubricError::Io(_) => error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_cue_names_dimension_and_cue() {
        let err = RubricError::UnknownCue {
            dimension: Dimension::E2,
            cue: "risk".to_string(),
        };
        assert_eq!(err.to_string(), "Dimension E2: ladder references unknown cue 'risk'");
    }

    #[test]
    fn converts_to_invalid_rubric_domain_error() {
        let err: DomainError = RubricError::DuplicateCue {
            dimension: Dimension::P4,
            cue: "role".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::InvalidRubric);
        assert_eq!(err.details.get("dimension").map(String::as_str), Some("P4"));
        assert_eq!(err.details.get("cue").map(String::as_str), Some("role"));

        let err: DomainError = RubricError::MissingDimension(Dimension::R1).into();
        assert_eq!(err.code, ErrorCode::InvalidRubric);
        assert!(!err.details.contains_key("cue"));
    }

    #[test]
    fn missing_dimension_displays_code() {
        assert_eq!(
            RubricError::MissingDimension(Dimension::R1).to_string(),
            "Rubric has no table for dimension R1"
        );
    }
}
