//! Scoring module - Dimension scorers and score aggregation.
//!
//! # Components
//!
//! - `Dimension` / `DimensionGroup` - The twelve P/M/E/R dimensions
//! - `DimensionScore` / `ScoreVector` - Clamped scores and their aggregates
//! - `Rubric` - Keyword/pattern tables and threshold ladders as data
//! - `RubricScorer` - Compiled rubric; scores a human-message list
//!
//! All scoring is pure: identical messages always produce identical scores,
//! and an empty message list scores zero on every dimension.

mod defaults;
mod dimension;
mod errors;
mod rubric;
mod score;
mod scorer;

pub use dimension::{Dimension, DimensionGroup};
pub use errors::RubricError;
pub use rubric::{Condition, CueKind, CueSet, DimensionRubric, Rubric, Rung, ScoringMode, Signal};
pub use score::{DimensionScore, ScoreAggregate, ScoreVector};
pub use scorer::{DimensionScorer, Features, RubricScorer};
