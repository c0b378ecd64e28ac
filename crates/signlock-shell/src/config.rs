//! Configuration loading.

use std::{fs, path::Path};

use signlock_core::LockdownConfig;

use crate::ShellError;

/// Load a [`LockdownConfig`] from a JSON file. Missing fields take their
/// defaults.
pub fn load(path: &Path) -> Result<LockdownConfig, ShellError> {
    let text = fs::read_to_string(path)
        .map_err(|source| ShellError::ConfigRead { path: path.to_path_buf(), source })?;
    serde_json::from_str(&text)
        .map_err(|source| ShellError::Config { path: path.to_path_buf(), source })
}
