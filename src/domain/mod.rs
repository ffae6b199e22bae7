//! Domain layer containing scoring logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors)
//! - `transcript` - Record grouping into per-user transcripts
//! - `scoring` - Twelve-dimension rubric scoring and aggregation
//! - `classification` - Pattern A-F decision list and its evaluation
//! - `report` - Output records and batch summaries

pub mod classification;
pub mod foundation;
pub mod report;
pub mod scoring;
pub mod transcript;
