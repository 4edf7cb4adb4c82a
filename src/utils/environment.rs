use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

const APP_DIR_NAME: &str = "episode-finder";

/// Default data directory for persisted client state
///
/// Uses the platform data directory when available, otherwise `$HOME/.episode-finder`.
pub fn get_data_dir() -> Result<PathBuf> {
    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join(APP_DIR_NAME));
    }
    let home = env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(format!(".{}", APP_DIR_NAME)))
}
