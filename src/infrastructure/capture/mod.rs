//! Microphone capture adapters

pub mod cpal_capture;

pub use cpal_capture::CpalCapture;
