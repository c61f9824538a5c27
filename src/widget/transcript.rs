// src/widget/transcript.rs
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TRANSCRIPT: AtomicU64 = AtomicU64::new(0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Agent,
    /// Transient placeholder shown while a reply is pending.
    Typing,
    Error,
}

impl Role {
    /// CSS suffix used for the bubble class (`twb-{role}`).
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Agent => "agent",
            Role::Typing => "typing",
            Role::Error => "error",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable handle to one message. Handles from one transcript never match
/// messages of another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId {
    transcript: u64,
    seq: u64,
}

impl MessageId {
    /// Sequence number within the owning transcript.
    pub fn index(self) -> u64 {
        self.seq
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    /// Raw text; escaping happens when the transcript is rendered.
    pub text: String,
}

/// Ordered list of messages; the source of truth for what the widget shows.
#[derive(Clone, Debug)]
pub struct Transcript {
    messages: Vec<Message>,
    nonce: u64,
    next_seq: u64,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            nonce: NEXT_TRANSCRIPT.fetch_add(1, Ordering::Relaxed),
            next_seq: 0,
        }
    }

    /// Append a message and return its handle.
    pub fn push(&mut self, role: Role, text: impl Into<String>) -> MessageId {
        let id = MessageId {
            transcript: self.nonce,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.messages.push(Message {
            id,
            role,
            text: text.into(),
        });
        id
    }

    /// Replace the role and text of the typing placeholder `id` in place. When
    /// the handle is unknown or no longer a placeholder, the message is appended
    /// instead and the new handle is returned.
    pub fn resolve(&mut self, id: MessageId, role: Role, text: impl Into<String>) -> MessageId {
        let placeholder = self
            .messages
            .iter_mut()
            .find(|m| m.id == id && m.role == Role::Typing);
        match placeholder {
            Some(message) => {
                message.role = role;
                message.text = text.into();
                id
            }
            None => self.push(role, text),
        }
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Whether the "ask a question" prompt should occupy the message list.
    pub fn shows_prompt(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of typing placeholders still waiting for a reply.
    pub fn pending(&self) -> usize {
        self.messages.iter().filter(|m| m.role == Role::Typing).count()
    }
}
