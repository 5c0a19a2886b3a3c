//! Config subcommand handling

use crate::application::ports::ConfigStore;
use crate::cli::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use crate::cli::presenter::Presenter;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Handle a `config` subcommand. Returns the process exit code.
pub async fn handle_config_command<S: ConfigStore>(
    store: &S,
    action: ConfigAction,
    presenter: &Presenter,
) -> u8 {
    let result = match action {
        ConfigAction::Init => init(store, presenter).await,
        ConfigAction::Set { key, value } => set(store, &key, &value, presenter).await,
        ConfigAction::Get { key } => get(store, &key, presenter).await,
        ConfigAction::List => list(store, presenter).await,
        ConfigAction::Path => {
            presenter.output(&store.path().to_string_lossy());
            Ok(())
        }
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            presenter.error(&e.to_string());
            1
        }
    }
}

async fn init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Created config file at {}",
        store.path().display()
    ));
    Ok(())
}

async fn set<S: ConfigStore>(
    store: &S,
    key: &str,
    value: &str,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;
    store.save(&config).await?;
    presenter.success(&format!("Set {} = {}", key, value));
    Ok(())
}

async fn get<S: ConfigStore>(
    store: &S,
    key: &str,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    let config = store.load().await?;
    let value = read_value(&config, key)?;
    presenter.output(&value);
    Ok(())
}

async fn list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;
    for key in VALID_CONFIG_KEYS {
        let value = read_value(&config, key)?;
        presenter.key_value(key, &value);
    }
    Ok(())
}

/// Validate and apply a value to a config field
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "base_url" => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "base_url cannot be empty".to_string(),
                });
            }
            if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
                return Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "base_url must start with http:// or https://".to_string(),
                });
            }
            config.base_url = Some(trimmed.trim_end_matches('/').to_string());
            Ok(())
        }
        "timeout_secs" => {
            let secs: u64 = value.parse().map_err(|_| ConfigError::ValidationError {
                key: key.to_string(),
                message: format!("expected a positive integer, got {:?}", value),
            })?;
            if secs == 0 {
                return Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "timeout_secs must be at least 1".to_string(),
                });
            }
            config.timeout_secs = Some(secs);
            Ok(())
        }
        _ => Err(unknown_key(key)),
    }
}

/// Read a config field as a display string, "(not set)" when absent
fn read_value(config: &AppConfig, key: &str) -> Result<String, ConfigError> {
    if !is_valid_config_key(key) {
        return Err(unknown_key(key));
    }

    let value = match key {
        "base_url" => config.base_url.clone(),
        "timeout_secs" => config.timeout_secs.map(|v| v.to_string()),
        _ => unreachable!(),
    };

    Ok(value.unwrap_or_else(|| "(not set)".to_string()))
}

fn unknown_key(key: &str) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("unknown key, expected one of: {}", VALID_CONFIG_KEYS.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_base_url_strips_trailing_slash() {
        let mut config = AppConfig::empty();
        apply_value(&mut config, "base_url", "http://localhost:9000/").unwrap();
        assert_eq!(config.base_url, Some("http://localhost:9000".to_string()));
    }

    #[test]
    fn apply_base_url_rejects_bare_host() {
        let mut config = AppConfig::empty();
        let err = apply_value(&mut config, "base_url", "localhost:9000").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn apply_timeout_parses_integer() {
        let mut config = AppConfig::empty();
        apply_value(&mut config, "timeout_secs", "45").unwrap();
        assert_eq!(config.timeout_secs, Some(45));
    }

    #[test]
    fn apply_timeout_rejects_zero() {
        let mut config = AppConfig::empty();
        assert!(apply_value(&mut config, "timeout_secs", "0").is_err());
    }

    #[test]
    fn apply_timeout_rejects_non_numeric() {
        let mut config = AppConfig::empty();
        assert!(apply_value(&mut config, "timeout_secs", "fast").is_err());
    }

    #[test]
    fn apply_unknown_key_fails() {
        let mut config = AppConfig::empty();
        assert!(apply_value(&mut config, "api_key", "secret").is_err());
    }

    #[test]
    fn read_unset_value_shows_placeholder() {
        let config = AppConfig::empty();
        assert_eq!(read_value(&config, "base_url").unwrap(), "(not set)");
    }

    #[test]
    fn read_set_value() {
        let config = AppConfig {
            base_url: Some("http://x".to_string()),
            timeout_secs: Some(12),
        };
        assert_eq!(read_value(&config, "timeout_secs").unwrap(), "12");
    }
}
