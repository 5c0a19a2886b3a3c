//! Response normalizer
//!
//! Maps the two server response shapes into the one canonical message
//! record the transcript renders. A query and its N answers collapse into
//! a single message rather than N+1, which keeps transcript ordering
//! monotonic.

use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;

use crate::application::ports::UploadResult;
use crate::domain::transcript::{MatchEntry, Message};

/// Errors from normalization
#[derive(Debug, Clone, Error)]
pub enum NormalizeError {
    #[error("Stored response contained no notes")]
    EmptyStoredNotes,
}

/// Build the canonical message for a parsed upload result.
///
/// `now` is the client-observed time, used only for retrieved messages;
/// stored notes keep the server's upload timestamp.
pub fn normalize(result: UploadResult, now: DateTime<Utc>) -> Result<Message, NormalizeError> {
    match result {
        UploadResult::Stored { mut notes } => {
            if notes.is_empty() {
                return Err(NormalizeError::EmptyStoredNotes);
            }
            let note = notes.remove(0);

            // Prefer the formatted content; an absent or empty field falls
            // back to the raw transcription.
            let text = note
                .formatted_content
                .filter(|content| !content.is_empty())
                .unwrap_or(note.transcription);

            Ok(Message::pushed(
                text,
                note.uploaded_at,
                note.metadata.intent,
                note.metadata.tags,
            ))
        }
        UploadResult::Retrieved {
            transcription,
            notes,
        } => {
            let results = notes
                .into_iter()
                .map(|note| MatchEntry {
                    text: note.text,
                    intent: note.intent,
                    tags: note.tags,
                    timestamp: note.timestamp,
                })
                .collect();

            Ok(Message::retrieved(
                transcription,
                now.to_rfc3339_opts(SecondsFormat::Secs, true),
                results,
            ))
        }
    }
}
