//! Plot directory setup.

use crate::utils::error::OutputError;
use log::info;
use std::path::Path;

/// Make sure the plots directory exists
///
/// Returns `true` if the directory had to be created. Calling it again is a
/// no-op.
///
/// # Errors
/// * `OutputError::InvalidPath` - path exists but is not a directory
/// * `OutputError::WriteFailed` - directory creation failed
pub fn ensure_plots_dir(dir: impl AsRef<Path>) -> Result<bool, OutputError> {
    let dir = dir.as_ref();

    if dir.is_dir() {
        return Ok(false);
    }
    if dir.exists() {
        return Err(OutputError::InvalidPath(format!(
            "{} exists and is not a directory",
            dir.display()
        )));
    }

    std::fs::create_dir_all(dir)?;
    info!("{} directory did not exist. It was created.", dir.display());

    Ok(true)
}
