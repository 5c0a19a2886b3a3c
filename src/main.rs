use std::process::ExitCode;

use clap::Parser;

use trunq::cli::{self, Cli, Commands, Presenter};
use trunq::domain::config::AppConfig;
use trunq::infrastructure::config::XdgConfigStore;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();

    let code = match args.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            let presenter = Presenter::new();
            cli::config_cmd::handle_config_command(&store, action, &presenter).await
        }
        None => {
            let overrides = AppConfig {
                base_url: args.base_url,
                timeout_secs: args.timeout,
            };
            let config = cli::load_merged_config(overrides).await;
            let options = cli::CaptureOptions {
                base_url: config.base_url_or_default().to_string(),
                timeout: config.timeout_or_default(),
            };
            cli::run_capture(options).await
        }
    };

    ExitCode::from(code)
}
