//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the microphone, the voice-note service, and the
//! config file on disk.

pub mod capture;
pub mod config;
pub mod upload;

// Re-export adapters
pub use capture::CpalCapture;
pub use config::XdgConfigStore;
pub use upload::HttpUploadClient;
