//! Shell configuration.
//!
//! Every field has a default, so an empty TOML document (or no config file
//! at all) yields a usable configuration.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, TermError};

/// Language used for every user-visible line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ru,
}

/// Runtime configuration for a shell session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    /// User name shown in the prompt.
    pub user: String,
    /// Host name shown in the prompt.
    pub host: String,
    /// Message language.
    pub locale: Locale,
    /// Pause between script lines, in milliseconds.
    pub script_line_delay_ms: u64,
    /// Grace period between `exit` and the end of the session, in milliseconds.
    pub exit_delay_ms: u64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            user: "user".to_string(),
            host: "vfs".to_string(),
            locale: Locale::En,
            script_line_delay_ms: 0,
            exit_delay_ms: 1000,
        }
    }
}

impl ShellConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        if config.user.is_empty() || config.host.is_empty() {
            return Err(TermError::Config(
                "user and host must not be empty".to_string(),
            ));
        }
        Ok(config)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| TermError::Config(format!("{}: {e}", path.display())))?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn script_line_delay(&self) -> Duration {
        Duration::from_millis(self.script_line_delay_ms)
    }

    pub fn exit_delay(&self) -> Duration {
        Duration::from_millis(self.exit_delay_ms)
    }
}
