//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PatternModel` - Classifier over score vectors
//! - `TranscriptSource` - Raw record input
//! - `RecordSink` - Pattern record output

mod pattern_model;
mod record_sink;
mod transcript_source;

pub use pattern_model::PatternModel;
pub use record_sink::RecordSink;
pub use transcript_source::TranscriptSource;
