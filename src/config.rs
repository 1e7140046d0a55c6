//! Configuration management for the FTP client
//!
//! Loads client settings from config.toml with environment overrides.
//! Every knob has a compiled-in default matching the protocol constants,
//! so the client works with no configuration file present.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Client configuration.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ClientConfig {
    /// Server control port
    pub control_port: u16,

    /// Timeout applied to control-channel connect, read, and write
    pub timeout_secs: u64,

    /// Receive buffer size for control and data reads
    pub buffer_size: usize,

    /// Emit per-command debug traces
    pub debug: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            control_port: 21,
            timeout_secs: 5,
            buffer_size: 4096,
            debug: false,
        }
    }
}

impl ClientConfig {
    /// Load configuration from config.toml (optional) with RAX_FTP_CLIENT
    /// environment overrides.
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("RAX_FTP_CLIENT").try_parsing(true),
            )
            .build()?;

        let config: ClientConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Control-channel timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.control_port == 0 {
            return Err(config::ConfigError::Message(
                "control_port cannot be 0".into(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(config::ConfigError::Message(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.buffer_size == 0 {
            return Err(config::ConfigError::Message(
                "buffer_size must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}
