//! Canonical transcript message

use std::fmt;

/// Intent assigned to a retrieved-query message. Marks the message as a
/// question rather than a stored note.
pub const QUESTION_INTENT: &str = "question";

/// Which server response shape a message was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageStatus {
    /// A note was stored by the service
    Pushed,
    /// Notes were retrieved for a spoken query
    Retrieved,
}

impl MessageStatus {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pushed => "pushed",
            Self::Retrieved => "retrieved",
        }
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One retrieved match nested under a question message.
///
/// Optional fields reflect what the server actually sent. Absence is
/// preserved here; defaulting happens only at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchEntry {
    pub text: String,
    pub intent: Option<String>,
    pub tags: Option<Vec<String>>,
    pub timestamp: Option<String>,
}

/// The canonical message record, the only thing the transcript renders.
/// Immutable once created.
///
/// Exactly one of the plain note text or the nested results list is the
/// primary payload, selected by `status`. For a retrieved message the
/// message's own text stands for the spoken query.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    text: String,
    timestamp: String,
    intent: String,
    tags: Vec<String>,
    status: MessageStatus,
    results: Option<Vec<MatchEntry>>,
}

impl Message {
    /// Build a message for a stored note.
    ///
    /// `timestamp` is the server's upload time, preserving
    /// server-authoritative ordering.
    pub fn pushed(
        text: impl Into<String>,
        timestamp: impl Into<String>,
        intent: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            text: text.into(),
            timestamp: timestamp.into(),
            intent: intent.into(),
            tags,
            status: MessageStatus::Pushed,
            results: None,
        }
    }

    /// Build a message for a question and its retrieved matches.
    ///
    /// `timestamp` is the client-observed time, since the server does not
    /// timestamp queries. The intent is fixed to [`QUESTION_INTENT`] and
    /// the message carries no tags of its own.
    pub fn retrieved(
        query_text: impl Into<String>,
        timestamp: impl Into<String>,
        results: Vec<MatchEntry>,
    ) -> Self {
        Self {
            text: query_text.into(),
            timestamp: timestamp.into(),
            intent: QUESTION_INTENT.to_string(),
            tags: Vec::new(),
            status: MessageStatus::Retrieved,
            results: Some(results),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// ISO-8601 timestamp string
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn intent(&self) -> &str {
        &self.intent
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn status(&self) -> MessageStatus {
        self.status
    }

    /// Nested matches; present only for retrieved messages
    pub fn results(&self) -> Option<&[MatchEntry]> {
        self.results.as_deref()
    }
}
