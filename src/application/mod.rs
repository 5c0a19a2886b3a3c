//! Application layer - Use cases and port interfaces
//!
//! Contains the core capture pipeline and trait definitions
//! for external system interactions.

pub mod controller;
pub mod normalize;
pub mod ports;

// Re-export use cases
pub use controller::{CaptureController, ControllerError, ADD_VOICE_ENDPOINT};
pub use normalize::{normalize, NormalizeError};
