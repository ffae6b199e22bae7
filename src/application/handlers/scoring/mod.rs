//! Scoring handlers - batch scoring and classification.

mod granularity;
mod score_batch;

pub use granularity::Granularity;
pub use score_batch::{ScoreBatchCommand, ScoreBatchHandler, ScoreBatchResult};
