//! CLI layer

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod presenter;

pub use app::{load_merged_config, run_capture};
pub use args::{CaptureOptions, Cli, Commands, ConfigAction};
pub use presenter::Presenter;
