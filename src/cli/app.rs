//! Interactive capture application

use chrono::Utc;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::application::ports::{AudioCapture, ConfigStore, UploadClient};
use crate::application::CaptureController;
use crate::cli::args::CaptureOptions;
use crate::cli::presenter::Presenter;
use crate::domain::capture::CaptureState;
use crate::domain::config::AppConfig;
use crate::infrastructure::capture::CpalCapture;
use crate::infrastructure::config::XdgConfigStore;
use crate::infrastructure::upload::HttpUploadClient;

/// Load the config file and merge CLI/env overrides on top.
/// An unreadable config file degrades to the built-in defaults.
pub async fn load_merged_config(overrides: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());
    file_config.merge(overrides)
}

/// Run the interactive capture loop. Returns the process exit code.
pub async fn run_capture(options: CaptureOptions) -> u8 {
    let capture = CpalCapture::new();
    let upload = HttpUploadClient::new(options.base_url.clone(), options.timeout);
    let controller = CaptureController::new(capture, upload);
    let mut presenter = Presenter::new();

    presenter.info(&format!("Voice-note service: {}", options.base_url));
    presenter.info("Enter: start/stop recording | t: transcript | d: dismiss error | q: quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            // Stdin closed, e.g. piped input ran out
            Ok(None) => break,
            Err(e) => {
                presenter.error(&format!("Failed to read input: {}", e));
                return 1;
            }
        };

        match line.trim() {
            "" => toggle(&controller, &mut presenter).await,
            "t" => {
                let transcript = controller.transcript().await;
                presenter.transcript(&transcript, Utc::now());
            }
            "d" => {
                controller.dismiss().await;
            }
            "q" => break,
            other => presenter.warn(&format!("Unknown command: {:?}", other)),
        }
    }

    0
}

/// Advance the session on Enter: start when idle, finish when recording.
async fn toggle<C, U>(controller: &CaptureController<C, U>, presenter: &mut Presenter)
where
    C: AudioCapture,
    U: UploadClient,
{
    match controller.state().await {
        CaptureState::Idle => match controller.start().await {
            Ok(()) => presenter.success("Recording... press Enter to stop"),
            Err(e) => presenter.error(&e.to_string()),
        },
        CaptureState::Recording => {
            presenter.start_spinner("Processing your recording...");
            match controller.stop().await {
                Ok(()) => {
                    presenter.spinner_success("Saved");
                    if let Some(message) = controller.transcript().await.last() {
                        presenter.message(message, Utc::now());
                    }
                }
                Err(e) => {
                    presenter.spinner_fail(&e.to_string());
                    presenter.info("Press 'd' then Enter to dismiss the error");
                }
            }
        }
        CaptureState::Processing => {
            presenter.warn("Still processing the previous recording");
        }
        CaptureState::Error => {
            if let Some(message) = controller.error_message().await {
                presenter.error(&message);
            }
            presenter.info("Press 'd' then Enter to dismiss the error");
        }
    }
}
