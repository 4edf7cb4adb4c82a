//! Durable key-value storage for client state
//!
//! The history store persists its whole collection under a single key, so a
//! store only needs whole-value reads and replacements.
//!
//! - [`FileStore`]: one JSON file per key under the data directory, written with
//!   temp file + rename so readers never observe a partial write
//! - [`MemoryStore`]: process-local map, for tests and ephemeral sessions
//!
//! Data location: platform-specific data directories
//! - macOS: `~/Library/Application Support/episode-finder/`
//! - Linux: `~/.local/share/episode-finder/`
//! - Windows: `%APPDATA%\episode-finder\`

pub mod file;
pub mod memory;

use anyhow::Result;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Key-value collaborator backing persisted client state
pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` if absent
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key` in a single step
    fn write(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing an absent key is not an error
    fn delete(&mut self, key: &str) -> Result<()>;
}
