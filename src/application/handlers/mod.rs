//! Command handlers.

pub mod scoring;

pub use scoring::{Granularity, ScoreBatchCommand, ScoreBatchHandler, ScoreBatchResult};
