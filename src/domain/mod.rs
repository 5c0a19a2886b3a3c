//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod capture;
pub mod config;
pub mod error;
pub mod transcript;

// Re-export common types
pub use capture::{
    AudioMimeType, AudioPayload, CaptureSession, CaptureState, InvalidStateTransition,
};
pub use config::AppConfig;
pub use error::*;
pub use transcript::{MatchEntry, Message, MessageStatus, TranscriptStore};
