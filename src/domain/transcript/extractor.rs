//! Grouping of raw transcript records into per-user transcripts.
//!
//! Malformed records (missing user, sender, or text, or an unrecognized
//! sender tag) are dropped and counted rather than reported as errors, so a
//! single bad row never fails a batch.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

use super::message::{Conversation, Message, Sender, UserTranscript};
use crate::domain::foundation::{ConversationId, UserId};

/// One transcript row as delivered by the I/O layer.
///
/// Every field is optional on the wire; the extractor decides what is usable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(
        default,
        alias = "hash_id",
        alias = "user_id",
        deserialize_with = "string_or_number"
    )]
    pub group_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Identifiers arrive as strings or as bare JSON numbers; numbers are kept in
/// their decimal form.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Unsigned(u64),
        Signed(i64),
        Float(f64),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|id| match id {
        RawId::Text(s) => s,
        RawId::Unsigned(n) => n.to_string(),
        RawId::Signed(n) => n.to_string(),
        RawId::Float(n) => n.to_string(),
    }))
}

impl RawRecord {
    /// Convenience constructor used by tests and in-memory callers.
    pub fn new(
        group_id: impl Into<String>,
        conversation_id: impl Into<String>,
        sender: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            group_id: Some(group_id.into()),
            conversation_id: Some(conversation_id.into()),
            sender: Some(sender.into()),
            text: Some(text.into()),
            timestamp: None,
        }
    }
}

/// Counters describing one extraction pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    pub records_seen: usize,
    pub records_dropped: usize,
    pub users: usize,
    pub conversations: usize,
}

/// Result of grouping a batch of records.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub transcripts: Vec<UserTranscript>,
    pub stats: ExtractionStats,
}

/// Groups raw records by user and conversation, preserving first-seen order.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageExtractor;

impl MessageExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Builds a message from a record, or `None` if the record is unusable.
    fn to_message(record: &RawRecord) -> Option<(UserId, ConversationId, Message)> {
        let user_id = UserId::new(record.group_id.clone()?).ok()?;
        let sender = Sender::normalize(record.sender.as_deref()?)?;
        let text = record.text.clone()?;

        let conversation_id = record
            .conversation_id
            .clone()
            .and_then(|id| ConversationId::new(id).ok())
            .unwrap_or_else(ConversationId::fallback);

        let mut message = Message::new(sender, text);
        if let Some(ts) = &record.timestamp {
            message = message.with_timestamp(ts.clone());
        }
        Some((user_id, conversation_id, message))
    }

    /// Groups records into user transcripts.
    pub fn extract(&self, records: &[RawRecord]) -> Extraction {
        let mut transcripts: Vec<UserTranscript> = Vec::new();
        let mut user_index: HashMap<UserId, usize> = HashMap::new();
        let mut conversation_index: HashMap<(usize, ConversationId), usize> = HashMap::new();
        let mut stats = ExtractionStats {
            records_seen: records.len(),
            ..Default::default()
        };

        for record in records {
            let Some((user_id, conversation_id, message)) = Self::to_message(record) else {
                stats.records_dropped += 1;
                continue;
            };

            let idx = *user_index.entry(user_id.clone()).or_insert_with(|| {
                transcripts.push(UserTranscript::new(user_id.clone(), Vec::new()));
                transcripts.len() - 1
            });
            let transcript = &mut transcripts[idx];

            let key = (idx, conversation_id);
            match conversation_index
                .get(&key)
                .and_then(|&c| transcript.conversation_at_mut(c))
            {
                Some(conversation) => conversation.push(message),
                None => {
                    stats.conversations += 1;
                    let position = transcript
                        .push_conversation(Conversation::new(key.1.clone(), vec![message]));
                    conversation_index.insert(key, position);
                }
            }
        }

        stats.users = transcripts.len();
        if stats.records_dropped > 0 {
            warn!(
                dropped = stats.records_dropped,
                seen = stats.records_seen,
                "Dropped malformed transcript records"
            );
        }
        debug!(
            users = stats.users,
            conversations = stats.conversations,
            "Grouped transcript records"
        );

        Extraction { transcripts, stats }
    }

    /// Ordered, non-empty human texts from a flat list of records.
    ///
    /// Records from any user are included; callers pass one user's rows.
    pub fn human_texts(&self, records: &[RawRecord]) -> Vec<String> {
        records
            .iter()
            .filter_map(Self::to_message)
            .filter(|(_, _, m)| m.is_scorable())
            .map(|(_, _, m)| m.text().to_string())
            .collect()
    }
}
