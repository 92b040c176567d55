//! Error types for vfsterm.

use std::io;

/// Errors produced by the vfsterm crates.
///
/// Only [`TermError::Load`] and [`TermError::Config`] are fatal, and only at
/// startup. Every other kind is turned into a single output line by the
/// command dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum TermError {
    #[error("load error: {0}")]
    Load(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("no such file or directory: {0}")]
    NotFound(String),

    #[error("not a directory: {0}")]
    NotADirectory(String),

    #[error("command not found: {0}")]
    CommandNotFound(String),

    #[error("script error: {0}")]
    Script(String),

    #[error("save error: {0}")]
    Save(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, TermError>;
