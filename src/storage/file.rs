//! File-backed storage: load/save with atomic writes

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use super::KeyValueStore;

const VALUE_EXTENSION: &str = "json";

/// One `<key>.json` file per key inside a data directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if missing) a store rooted at `dir`
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
        }
        Ok(Self { dir })
    }

    /// Path of the file holding `key`
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.{}", key, VALUE_EXTENSION)))
    }
}

/// Keys become file names, so they must not escape the data directory
fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        bail!("Storage key cannot be empty");
    }
    if key == "." || key == ".." || key.contains(['/', '\\']) || key.contains('\0') {
        bail!("Invalid storage key: {:?}", key);
    }
    Ok(())
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;

        // Write atomically (temp file + rename)
        let temp = self.dir.join(format!("{}.{}.tmp", key, VALUE_EXTENSION));
        fs::write(&temp, value)
            .with_context(|| format!("Failed to write temp file: {}", temp.display()))?;
        fs::rename(&temp, &path)
            .with_context(|| format!("Failed to rename temp file to {}", path.display()))?;

        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to delete {}", path.display())),
        }
    }
}
