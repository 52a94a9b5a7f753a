use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Sentinel id carried by the in-progress session.
pub const CURRENT_SESSION_ID: &str = "current";

/// Current instant, truncated to millisecond precision.
///
/// Stored timestamps and the historical ids derived from them are written
/// with millisecond precision; truncating at the source keeps both views of
/// the same instant equal after a storage round trip.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    Bot,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub content: String,
    #[serde(default = "now")]
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(kind: MessageKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            timestamp: now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageKind::User, content)
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(MessageKind::Bot, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageKind::System, content)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub pdf_name: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub pdf_text: Option<String>,
    #[serde(default = "now")]
    pub timestamp: DateTime<Utc>,
    /// Id of the historical entry this session was adopted from, until the
    /// first mutation after the switch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
}

impl Session {
    /// A fresh, empty in-progress session.
    pub fn new_current() -> Self {
        Self {
            id: CURRENT_SESSION_ID.to_string(),
            messages: Vec::new(),
            pdf_name: None,
            pdf_text: None,
            timestamp: now(),
            source_id: None,
        }
    }

    pub fn is_current(&self) -> bool {
        self.id == CURRENT_SESSION_ID
    }

    /// Empty sessions (no messages and no attached document) are never
    /// persisted or archived.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.pdf_name.as_deref().unwrap_or("").is_empty()
    }

    /// Compares the conversation payload only, ignoring id and timestamps.
    pub fn same_content(&self, other: &Session) -> bool {
        self.messages == other.messages
            && self.pdf_name == other.pdf_name
            && self.pdf_text == other.pdf_text
    }

    /// First user message, used as a preview label in history listings.
    pub fn first_user_message(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.kind == MessageKind::User)
            .map(|m| m.content.as_str())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new_current()
    }
}

// Older records store "" for a missing document.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
