//! Report module - Output records and batch summaries.

mod record;
mod summary;

pub use record::PatternRecord;
pub use summary::{BatchSummary, PatternShare};
