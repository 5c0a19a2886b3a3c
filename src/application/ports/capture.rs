//! Audio capture port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::capture::AudioPayload;

/// Capture errors
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    #[error("Microphone access denied. Please allow microphone permissions.")]
    PermissionDenied,

    #[error("No audio input device available")]
    NoInputDevice,

    #[error("Failed to open capture stream: {0}")]
    StreamFailed(String),

    #[error("A capture session is already in progress")]
    AlreadyCapturing,

    #[error("No capture session in progress")]
    NotCapturing,

    #[error("No audio was captured")]
    EmptyCapture,
}

/// Port for microphone capture.
///
/// Hides the device callback plumbing (fragment-available,
/// stream-stopped) behind two operations. At most one session is active
/// at a time; the device stream is released on every exit path.
#[async_trait]
pub trait AudioCapture: Send + Sync {
    /// Request microphone access and begin buffering fragments.
    ///
    /// Fails with [`CaptureError::PermissionDenied`] if the platform
    /// refuses access; no session is created in that case.
    async fn start(&self) -> Result<(), CaptureError>;

    /// Finalize the current session: close the device stream, release the
    /// hardware, concatenate buffered fragments and yield the payload.
    async fn stop(&self) -> Result<AudioPayload, CaptureError>;

    /// Check if a session is currently active
    fn is_capturing(&self) -> bool;
}
