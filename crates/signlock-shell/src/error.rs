//! Shell error types.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors surfaced by the shell. The lockdown core itself never fails.
#[derive(Debug, Error)]
pub enum ShellError {
    /// I/O error reading a script or config file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Config file could not be read.
    #[error("cannot read config {}: {source}", path.display())]
    ConfigRead {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Config file could not be parsed.
    #[error("invalid config {}: {source}", path.display())]
    Config {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },

    /// Script line could not be parsed.
    #[error("line {line}: {message}")]
    Script {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        message: String,
    },
}
