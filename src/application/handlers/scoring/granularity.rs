//! Which entity a pattern record describes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// One record per user over all of their human messages.
    #[default]
    User,
    /// One record per conversation, id `"<user>/<conversation>"`.
    Conversation,
    /// One record per user: each non-empty conversation scored alone, then
    /// averaged per dimension with half-to-even rounding.
    ConversationMean,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Conversation => "conversation",
            Self::ConversationMean => "conversation_mean",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "conversation" => Ok(Self::Conversation),
            "conversation_mean" | "conversation-mean" => Ok(Self::ConversationMean),
            other => Err(ValidationError::invalid_format(
                "granularity",
                format!("unknown granularity '{}'", other),
            )),
        }
    }
}
