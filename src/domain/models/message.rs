#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Author;
use super::RecommendationPayload;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Payload(RecommendationPayload),
}

/// One entry of the conversation log. The log is owned by whoever wrote the
/// conversation file; this program only reads it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: MessageContent,
}

impl Message {
    #[cfg(test)]
    pub fn user(text: &str) -> Message {
        return Message {
            role: Role::User,
            content: MessageContent::Text(text.to_string()),
        };
    }

    #[cfg(test)]
    pub fn assistant(payload: RecommendationPayload) -> Message {
        return Message {
            role: Role::Assistant,
            content: MessageContent::Payload(payload),
        };
    }

    pub fn author(&self) -> Author {
        match self.role {
            Role::User => return Author::User,
            Role::Assistant => return Author::Assistant,
        }
    }

    /// Content as a recommendation payload. Plain text becomes a single
    /// string item.
    pub fn payload(&self) -> RecommendationPayload {
        match &self.content {
            MessageContent::Text(text) => return RecommendationPayload::from_text(text),
            MessageContent::Payload(payload) => return payload.clone(),
        }
    }
}
