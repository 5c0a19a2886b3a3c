//! Capture controller use case
//!
//! The orchestrating state machine. Owns the recording lifecycle, drives
//! capture, upload and normalization, and appends the resulting message
//! to the transcript. One controller instance per recording surface,
//! constructed with explicit dependencies.

use chrono::Utc;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::domain::capture::{CaptureSession, CaptureState, InvalidStateTransition};
use crate::domain::transcript::{Message, TranscriptStore};

use super::normalize::{normalize, NormalizeError};
use super::ports::{AudioCapture, CaptureError, UploadClient, UploadError};

/// Endpoint path for voice-note uploads
pub const ADD_VOICE_ENDPOINT: &str = "/add-voice";

/// Errors from the capture use case.
///
/// Every failure is also recorded on the session as the transient Error
/// state; the variants here let diagnostics distinguish a contract
/// violation by the server from a plain transport failure.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    InvalidState(#[from] InvalidStateTransition),

    #[error("{0}")]
    Capture(#[from] CaptureError),

    #[error("Upload failed: {0}")]
    Upload(#[from] UploadError),

    #[error("Unusable server response: {0}")]
    Normalize(#[from] NormalizeError),
}

/// Capture controller use case.
///
/// State machine: Idle -> Recording -> Processing -> Idle on success,
/// with any failure landing in the transient, dismissable Error state.
/// Transitions are strictly sequential; `start` is rejected outside Idle
/// and `stop` is a no-op outside Recording, so no two sessions ever
/// overlap.
pub struct CaptureController<C, U>
where
    C: AudioCapture,
    U: UploadClient,
{
    capture: C,
    upload: U,
    session: Mutex<CaptureSession>,
    transcript: Mutex<TranscriptStore>,
}

impl<C, U> CaptureController<C, U>
where
    C: AudioCapture,
    U: UploadClient,
{
    /// Create a new controller instance
    pub fn new(capture: C, upload: U) -> Self {
        Self {
            capture,
            upload,
            session: Mutex::new(CaptureSession::new()),
            transcript: Mutex::new(TranscriptStore::new()),
        }
    }

    /// Get the current lifecycle state
    pub async fn state(&self) -> CaptureState {
        self.session.lock().await.state()
    }

    /// Get the current error message, if in the Error state
    pub async fn error_message(&self) -> Option<String> {
        self.session
            .lock()
            .await
            .error_message()
            .map(str::to_string)
    }

    /// Snapshot of the full transcript in render order
    pub async fn transcript(&self) -> Vec<Message> {
        self.transcript.lock().await.all().to_vec()
    }

    /// Number of messages in the transcript
    pub async fn transcript_len(&self) -> usize {
        self.transcript.lock().await.len()
    }

    /// Begin a recording session.
    ///
    /// Rejected with no observable effect while not Idle. A device
    /// failure transitions to Error with a human-readable message.
    pub async fn start(&self) -> Result<(), ControllerError> {
        {
            let mut session = self.session.lock().await;
            session.start_recording()?;
        }

        if let Err(e) = self.capture.start().await {
            let mut session = self.session.lock().await;
            let _ = session.fail(e.to_string());
            return Err(e.into());
        }

        Ok(())
    }

    /// Stop the current recording and run the session to completion:
    /// finalize the payload, upload it, normalize the response and append
    /// the message to the transcript.
    ///
    /// A no-op outside Recording. On any failure the session resources
    /// are already released by the capture adapter, no partial message is
    /// appended, and the controller lands in Error.
    pub async fn stop(&self) -> Result<(), ControllerError> {
        {
            let mut session = self.session.lock().await;
            if !session.is_recording() {
                return Ok(());
            }
            session.begin_processing()?;
        }

        match self.process_recording().await {
            Ok(message) => {
                self.transcript.lock().await.append(message);
                let mut session = self.session.lock().await;
                session.complete()?;
                Ok(())
            }
            Err(e) => {
                let mut session = self.session.lock().await;
                let _ = session.fail(e.to_string());
                Err(e)
            }
        }
    }

    /// Clear a transient error, returning to Idle.
    /// A no-op outside the Error state.
    pub async fn dismiss(&self) {
        let mut session = self.session.lock().await;
        let _ = session.dismiss();
    }

    /// Finalize, upload and normalize. Runs to completion once started;
    /// there is no mid-upload cancellation.
    async fn process_recording(&self) -> Result<Message, ControllerError> {
        let payload = self.capture.stop().await?;
        let result = self.upload.upload(&payload, ADD_VOICE_ENDPOINT).await?;
        let message = normalize(result, Utc::now())?;
        Ok(message)
    }
}
