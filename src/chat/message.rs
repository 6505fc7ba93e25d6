//! Chat messages, message ids and the in-memory transcript

use crate::agents::AgentPersona;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Agent,
    System,
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Agent => write!(f, "agent"),
            Self::System => write!(f, "system"),
        }
    }
}

/// One entry of the transcript
///
/// Messages are immutable once built; the transcript only appends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub author: Author,
    /// Persona that answered, for agent messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<AgentPersona>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ChatMessage {
    pub fn user(id: String, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            author: Author::User,
            agent: None,
            created_at: Utc::now(),
            is_error: false,
        }
    }

    pub fn agent(id: String, persona: AgentPersona, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            author: Author::Agent,
            agent: Some(persona),
            created_at: Utc::now(),
            is_error: false,
        }
    }

    pub fn system(id: String, content: impl Into<String>, is_error: bool) -> Self {
        Self {
            id,
            content: content.into(),
            author: Author::System,
            agent: None,
            created_at: Utc::now(),
            is_error,
        }
    }

    /// Label shown in front of the message text
    pub fn label(&self) -> String {
        match (&self.author, &self.agent) {
            (Author::User, _) => "👤 You".to_string(),
            (Author::Agent, Some(persona)) => persona.to_string(),
            (Author::Agent, None) => "💡 Agent".to_string(),
            (Author::System, _) if self.is_error => "⚠️ System".to_string(),
            (Author::System, _) => "🔒 System".to_string(),
        }
    }
}

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_RANDOM_LEN: usize = 10;

/// Generates transcript-unique message ids
///
/// Ids have the shape `<prefix>-<unix millis>-<random base36>`. The
/// millisecond part never goes backwards for a given generator, even if
/// the wall clock does, and ids issued within the same millisecond are
/// remembered so a random collision is re-rolled instead of returned.
#[derive(Debug, Default)]
pub struct MessageIdGenerator {
    last_millis: i64,
    issued_this_millis: HashSet<String>,
}

impl MessageIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the next id for `prefix` (`user`, `sys`, or an agent name)
    ///
    /// # Examples
    ///
    /// ```
    /// use dhraviq::chat::message::MessageIdGenerator;
    ///
    /// let mut ids = MessageIdGenerator::new();
    /// let a = ids.next_id("user");
    /// let b = ids.next_id("user");
    /// assert!(a.starts_with("user-"));
    /// assert_ne!(a, b);
    /// ```
    pub fn next_id(&mut self, prefix: &str) -> String {
        let now = Utc::now().timestamp_millis();
        if now > self.last_millis {
            self.last_millis = now;
            self.issued_this_millis.clear();
        }

        loop {
            let id = format!("{}-{}-{}", prefix, self.last_millis, random_suffix());
            if self.issued_this_millis.insert(id.clone()) {
                return id;
            }
        }
    }
}

fn random_suffix() -> String {
    let mut rng = rand::rng();
    (0..ID_RANDOM_LEN)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// Ordered, append-only list of messages for one conversation
#[derive(Debug, Default, Clone)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    ids: HashSet<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one message; a message whose id is already present is dropped
    ///
    /// Returns `true` when the message was appended.
    pub fn push(&mut self, message: ChatMessage) -> bool {
        if !self.ids.insert(message.id.clone()) {
            tracing::warn!(id = %message.id, "Duplicate message id, message dropped");
            return false;
        }
        self.messages.push(message);
        true
    }

    /// Append every message of a resolved turn in one update
    ///
    /// Returns how many messages were appended.
    pub fn extend_turn(&mut self, messages: Vec<ChatMessage>) -> usize {
        let mut appended = 0;
        for message in messages {
            if self.push(message) {
                appended += 1;
            }
        }
        appended
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.ids.clear();
    }

    /// Serialize the transcript as pretty JSON
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(&self.messages)?)
    }
}
