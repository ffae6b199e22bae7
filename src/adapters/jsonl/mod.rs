//! JSON-lines adapters for transcript input and pattern record output.

mod errors;
mod reader;
mod writer;

pub use errors::{SinkError, SourceError};
pub use reader::JsonlTranscriptSource;
pub use writer::JsonlRecordSink;
