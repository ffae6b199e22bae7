//! Adapters - Implementations of port interfaces.
//!
//! - `jsonl` - JSON-lines transcript source and pattern record sink
//! - `memory` - In-memory source and sink for tests and embedding

pub mod jsonl;
pub mod memory;

pub use jsonl::{JsonlRecordSink, JsonlTranscriptSource, SinkError, SourceError};
pub use memory::{InMemoryRecordSink, InMemoryTranscriptSource};
