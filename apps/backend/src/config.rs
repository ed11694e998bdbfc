//! Application configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub use crate::domain::lobby::DEFAULT_GRID_SIZE;

/// Default length of generated lobby codes.
pub const DEFAULT_LOBBY_CODE_LENGTH: usize = 6;
/// Default period between keep-alive comment frames.
pub const DEFAULT_KEEPALIVE_SECS: u64 = 15;
/// Default capacity of hub command and subscriber queues.
pub const DEFAULT_SEND_BUFFER_SIZE: usize = 256;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {detail}")]
    Invalid { var: &'static str, detail: String },
}

/// Runtime configuration for the game backend.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Word list file, one word per line; None when the dictionary is
    /// loaded from storage or supplied programmatically
    pub dictionary_path: Option<PathBuf>,
    pub lobby_code_length: usize,
    pub default_grid_size: usize,
    pub keepalive_period: Duration,
    pub send_buffer_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dictionary_path: None,
            lobby_code_length: DEFAULT_LOBBY_CODE_LENGTH,
            default_grid_size: DEFAULT_GRID_SIZE,
            keepalive_period: Duration::from_secs(DEFAULT_KEEPALIVE_SECS),
            send_buffer_size: DEFAULT_SEND_BUFFER_SIZE,
        }
    }
}

impl AppConfig {
    /// Build configuration from the environment, falling back to defaults
    /// for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let dictionary_path = env::var("GAME_DICTIONARY_PATH").ok().map(PathBuf::from);

        let lobby_code_length =
            parse_var("GAME_LOBBY_CODE_LENGTH", DEFAULT_LOBBY_CODE_LENGTH)?;
        let default_grid_size = parse_var("GAME_GRID_SIZE", DEFAULT_GRID_SIZE)?;
        if default_grid_size < 2 {
            return Err(ConfigError::Invalid {
                var: "GAME_GRID_SIZE",
                detail: format!("grid size must be at least 2, got {default_grid_size}"),
            });
        }

        let keepalive_secs = parse_var("GAME_KEEPALIVE_SECS", DEFAULT_KEEPALIVE_SECS)?;
        let send_buffer_size =
            parse_var("GAME_SEND_BUFFER_SIZE", DEFAULT_SEND_BUFFER_SIZE)?;

        Ok(Self {
            dictionary_path,
            lobby_code_length,
            default_grid_size,
            keepalive_period: Duration::from_secs(keepalive_secs),
            send_buffer_size,
        })
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(raw) => raw.parse().map_err(|err| ConfigError::Invalid {
            var,
            detail: format!("{err}"),
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::AppConfig;

    #[test]
    fn defaults_are_sane() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.default_grid_size, 5);
        assert_eq!(cfg.lobby_code_length, 6);
        assert_eq!(cfg.send_buffer_size, 256);
        assert_eq!(cfg.keepalive_period.as_secs(), 15);
        assert!(cfg.dictionary_path.is_none());
    }
}
