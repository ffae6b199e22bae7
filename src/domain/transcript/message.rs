//! Message, conversation, and per-user transcript types.
//!
//! Messages are immutable once created. Conversations keep messages in the
//! order they were recorded; a user transcript keeps conversations in the
//! order they were first seen.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::foundation::{ConversationId, UserId, ValidationError};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// The human participant. The only signal source for scoring.
    User,
    /// The AI assistant.
    Assistant,
}

impl Sender {
    /// Normalizes a raw sender tag into the human/assistant dichotomy.
    ///
    /// Returns `None` for tags that are neither.
    pub fn normalize(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "user" | "human" => Some(Self::User),
            "assistant" | "ai" | "bot" | "model" => Some(Self::Assistant),
            _ => None,
        }
    }

    /// Returns true for the human participant.
    pub fn is_human(&self) -> bool {
        matches!(self, Self::User)
    }
}

impl FromStr for Sender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s)
            .ok_or_else(|| ValidationError::invalid_format("sender", format!("unrecognized sender '{}'", s)))
    }
}

/// A single transcript message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    sender: Sender,
    text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
}

impl Message {
    /// Creates a message without a timestamp.
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp: None,
        }
    }

    /// Shorthand for a human-authored message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    /// Shorthand for an assistant-authored message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, text)
    }

    /// Attaches the source timestamp, kept verbatim.
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }

    /// True when the message is human-authored and has non-whitespace text.
    pub fn is_scorable(&self) -> bool {
        self.sender.is_human() && !self.text.trim().is_empty()
    }
}

/// Filters a message sequence down to scorable human texts, preserving order.
pub fn human_texts<'a, I>(messages: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a Message>,
{
    messages
        .into_iter()
        .filter(|m| m.is_scorable())
        .map(|m| m.text())
        .collect()
}

/// Ordered messages belonging to one user and one conversation id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    id: ConversationId,
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new(id: ConversationId, messages: Vec<Message>) -> Self {
        Self { id, messages }
    }

    pub fn id(&self) -> &ConversationId {
        &self.id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub(crate) fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Non-empty human texts of this conversation, in order.
    pub fn human_texts(&self) -> Vec<&str> {
        human_texts(&self.messages)
    }
}

/// All conversations of one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserTranscript {
    user_id: UserId,
    conversations: Vec<Conversation>,
}

impl UserTranscript {
    pub fn new(user_id: UserId, conversations: Vec<Conversation>) -> Self {
        Self {
            user_id,
            conversations,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub(crate) fn conversation_at_mut(&mut self, index: usize) -> Option<&mut Conversation> {
        self.conversations.get_mut(index)
    }

    /// Appends a conversation and returns its position.
    pub(crate) fn push_conversation(&mut self, conversation: Conversation) -> usize {
        self.conversations.push(conversation);
        self.conversations.len() - 1
    }

    /// Total number of messages across conversations, any sender.
    pub fn message_count(&self) -> usize {
        self.conversations.iter().map(|c| c.messages().len()).sum()
    }

    /// Non-empty human texts across all conversations, conversations in
    /// first-seen order and messages in recorded order.
    pub fn human_texts(&self) -> Vec<&str> {
        human_texts(self.conversations.iter().flat_map(|c| c.messages()))
    }
}
