//! Transcript module - Message extraction.
//!
//! Turns raw transcript rows into per-user, per-conversation message lists
//! and isolates the human-authored text that every scorer consumes.

mod extractor;
mod message;

pub use extractor::{Extraction, ExtractionStats, MessageExtractor, RawRecord};
pub use message::{human_texts, Conversation, Message, Sender, UserTranscript};
