//! Capture session state machine

use std::fmt;
use thiserror::Error;

/// Capture lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    Recording,
    Processing,
    Error,
}

impl CaptureState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Processing => "processing",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for CaptureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidStateTransition {
    pub current_state: CaptureState,
    pub action: String,
}

/// Capture session entity.
/// Manages state transitions for one record-then-upload cycle.
///
/// State machine:
///   IDLE -> RECORDING (start_recording)
///   RECORDING -> PROCESSING (begin_processing)
///   PROCESSING -> IDLE (complete)
///   RECORDING | PROCESSING -> ERROR (fail)
///   ERROR -> IDLE (dismiss)
///
/// ERROR is transient and user-dismissable, not terminal. The error
/// message is held here so the presentation layer can read it alongside
/// the state.
#[derive(Debug, Default)]
pub struct CaptureSession {
    state: CaptureState,
    error_message: Option<String>,
}

impl CaptureSession {
    /// Create a new session in idle state
    pub fn new() -> Self {
        Self {
            state: CaptureState::Idle,
            error_message: None,
        }
    }

    /// Get the current state
    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Get the current error message, if any
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Check if currently idle
    pub fn is_idle(&self) -> bool {
        self.state == CaptureState::Idle
    }

    /// Check if currently recording
    pub fn is_recording(&self) -> bool {
        self.state == CaptureState::Recording
    }

    /// Check if currently processing
    pub fn is_processing(&self) -> bool {
        self.state == CaptureState::Processing
    }

    /// Transition from IDLE to RECORDING
    pub fn start_recording(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != CaptureState::Idle {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "start recording".to_string(),
            });
        }
        self.state = CaptureState::Recording;
        Ok(())
    }

    /// Transition from RECORDING to PROCESSING
    pub fn begin_processing(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != CaptureState::Recording {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "begin processing".to_string(),
            });
        }
        self.state = CaptureState::Processing;
        Ok(())
    }

    /// Transition from PROCESSING to IDLE
    pub fn complete(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != CaptureState::Processing {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "complete processing".to_string(),
            });
        }
        self.state = CaptureState::Idle;
        Ok(())
    }

    /// Transition to ERROR with a human-readable message.
    /// Valid from RECORDING and PROCESSING, where a session can fail.
    pub fn fail(
        &mut self,
        message: impl Into<String>,
    ) -> Result<(), InvalidStateTransition> {
        match self.state {
            CaptureState::Recording | CaptureState::Processing => {
                self.state = CaptureState::Error;
                self.error_message = Some(message.into());
                Ok(())
            }
            _ => Err(InvalidStateTransition {
                current_state: self.state,
                action: "fail".to_string(),
            }),
        }
    }

    /// Transition from ERROR back to IDLE, clearing the message
    pub fn dismiss(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != CaptureState::Error {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "dismiss error".to_string(),
            });
        }
        self.state = CaptureState::Idle;
        self.error_message = None;
        Ok(())
    }
}
