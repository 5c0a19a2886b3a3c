//! Transcript domain types
//!
//! The canonical message record and the append-only store the
//! presentation layer renders from.

pub mod message;
pub mod store;

pub use message::{MatchEntry, Message, MessageStatus, QUESTION_INTENT};
pub use store::TranscriptStore;
