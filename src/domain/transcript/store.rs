//! Append-only transcript store

use super::message::Message;

/// Ordered log of canonical messages, the single source of truth the
/// presentation layer renders. Insertion order is chronological order is
/// render order.
///
/// Messages are never reordered or removed, and there is no
/// deduplication: an upload the server accepted twice legitimately
/// creates two entries.
#[derive(Debug, Default)]
pub struct TranscriptStore {
    messages: Vec<Message>,
}

impl TranscriptStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Append a message. O(1) amortized.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// The full ordered sequence
    pub fn all(&self) -> &[Message] {
        &self.messages
    }

    /// The most recently appended message
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
