//! Trunq CLI library
//!
//! Record voice notes from the terminal and push them to a Trunq
//! voice-note service. Statements are stored as notes; questions come
//! back with the matching notes already retrieved.
//!
//! Layered architecture:
//! - `domain`: session lifecycle, transcript and configuration types
//! - `application`: use cases and ports (capture, upload, config)
//! - `infrastructure`: cpal, HTTP and XDG adapters
//! - `cli`: argument parsing, interactive loop and output formatting

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
