//! PatternModel port - the swappable classifier seam.

use crate::domain::{
    classification::Classification,
    foundation::DomainError,
    scoring::ScoreVector,
};

/// Maps a twelve-dimension score vector to a pattern.
///
/// The rule classifier is the baseline implementation; a learned model that
/// reads the same feature vector ([`ScoreVector::values`]) can replace it
/// without changing the output record shape.
pub trait PatternModel: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Classify one vector. Implementations must return a confidence in (0, 1].
    fn classify(&self, scores: &ScoreVector) -> Result<Classification, DomainError>;
}
