//! CLI argument definitions

use std::time::Duration;

use clap::{Parser, Subcommand};

/// Configuration keys accepted by `config set` and `config get`
pub const VALID_CONFIG_KEYS: &[&str] = &["base_url", "timeout_secs"];

/// Capture voice notes from your terminal
#[derive(Parser, Debug)]
#[command(name = "trunq")]
#[command(version)]
#[command(about = "Record voice notes and questions, pushed to your Trunq service")]
pub struct Cli {
    /// Base URL of the voice-note service
    #[arg(long, value_name = "URL", env = "TRUNQ_API_URL", global = true)]
    pub base_url: Option<String>,

    /// Upload timeout in seconds
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create a config file with default values
    Init,
    /// Set a configuration value
    Set {
        /// Configuration key (base_url, timeout_secs)
        key: String,
        /// Value to set
        value: String,
    },
    /// Get a configuration value
    Get {
        /// Configuration key (base_url, timeout_secs)
        key: String,
    },
    /// List all configuration values
    List,
    /// Print the config file path
    Path,
}

/// Resolved options for a capture session
#[derive(Debug, Clone)]
pub struct CaptureOptions {
    pub base_url: String,
    pub timeout: Duration,
}

/// Check whether a key names a known configuration setting
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_no_args() {
        let cli = Cli::parse_from(["trunq"]);
        assert!(cli.command.is_none());
        assert!(cli.timeout.is_none());
    }

    #[test]
    fn parse_base_url_flag() {
        let cli = Cli::parse_from(["trunq", "--base-url", "http://localhost:9000"]);
        assert_eq!(cli.base_url, Some("http://localhost:9000".to_string()));
    }

    #[test]
    fn parse_timeout_flag() {
        let cli = Cli::parse_from(["trunq", "--timeout", "10"]);
        assert_eq!(cli.timeout, Some(10));
    }

    #[test]
    fn parse_config_set() {
        let cli = Cli::parse_from(["trunq", "config", "set", "base_url", "http://x"]);
        match cli.command {
            Some(Commands::Config {
                action: ConfigAction::Set { key, value },
            }) => {
                assert_eq!(key, "base_url");
                assert_eq!(value, "http://x");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parse_config_path() {
        let cli = Cli::parse_from(["trunq", "config", "path"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Path
            })
        ));
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("base_url"));
        assert!(is_valid_config_key("timeout_secs"));
        assert!(!is_valid_config_key("api_key"));
    }
}
