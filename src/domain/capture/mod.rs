//! Capture domain types
//!
//! The recording session lifecycle entity and the finalized audio payload
//! value object.

pub mod payload;
pub mod session;

pub use payload::{AudioMimeType, AudioPayload};
pub use session::{CaptureSession, CaptureState, InvalidStateTransition};
