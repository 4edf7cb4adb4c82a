//! Bounded, deduplicating recency cache of past searches.
//!
//! # Persistence
//!
//! Every mutation rewrites the whole collection under one storage key. The
//! collection is capped at [`HISTORY_CAPACITY`] entries, so a full rewrite is
//! small and readers only ever see a complete collection.
//!
//! # Error Handling Strategy
//!
//! History is convenience state: a missing, unreadable, or corrupt stored
//! collection loads as empty (logged at `warn`). Write failures are returned to
//! the caller, but the in-memory collection keeps the change.

use std::collections::HashSet;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Duration, SubsecRound, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::search::dedup_key;
use crate::models::{QueryKind, SearchRecord};
use crate::storage::KeyValueStore;

/// Maximum number of searches kept
pub const HISTORY_CAPACITY: usize = 10;

/// Storage key holding the serialized collection
pub const HISTORY_KEY: &str = "search-history";

/// How far ahead of the clock a stored timestamp may be and still be followed
const MAX_CLOCK_SKEW_MS: i64 = 1000;

/// Most-recent-first history of search attempts backed by a [`KeyValueStore`]
///
/// Each instance owns its storage, key, and capacity; two stores over
/// different storages never share state.
#[derive(Debug)]
pub struct HistoryStore<S: KeyValueStore> {
    storage: S,
    key: String,
    capacity: usize,
    records: Vec<SearchRecord>,
}

impl<S: KeyValueStore> HistoryStore<S> {
    /// Open a store with the default key and capacity
    pub fn open(storage: S) -> Self {
        Self::with_options(storage, HISTORY_KEY, HISTORY_CAPACITY)
    }

    /// Open a store with an explicit key and capacity (capacity is at least 1)
    pub fn with_options(storage: S, key: impl Into<String>, capacity: usize) -> Self {
        let mut store =
            Self { storage, key: key.into(), capacity: capacity.max(1), records: Vec::new() };
        store.reload();
        store
    }

    /// Re-read the collection from storage, falling back to empty
    fn reload(&mut self) {
        self.records = match self.load() {
            Ok(records) => records,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Discarding unreadable search history");
                Vec::new()
            }
        };
    }

    fn load(&self) -> Result<Vec<SearchRecord>> {
        let Some(raw) = self.storage.read(&self.key)? else {
            return Ok(Vec::new());
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        let stored: Vec<SearchRecord> =
            serde_json::from_str(&raw).context("Failed to parse stored search history")?;

        // Stored data may predate a capacity change or have been edited by hand
        let mut seen = HashSet::new();
        let mut records: Vec<SearchRecord> = stored
            .into_iter()
            .filter(|record| !record.query.trim().is_empty())
            .filter(|record| seen.insert(record.dedup_key()))
            .collect();
        records.truncate(self.capacity);

        Ok(records)
    }

    /// Most-recent-first view of the collection
    pub fn list(&self) -> &[SearchRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&SearchRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Log a search attempt at the front of the history
    ///
    /// Any earlier entry with the same case-insensitive query and kind is
    /// removed first, so the query slides to most-recent. Entries beyond
    /// capacity are evicted from the back.
    ///
    /// # Errors
    ///
    /// Returns an error if the query is blank or the collection cannot be
    /// persisted. On a persist error the in-memory history is still updated.
    pub fn record(&mut self, query: &str, kind: QueryKind, succeeded: bool) -> Result<()> {
        let query = query.trim();
        if query.is_empty() {
            bail!("Cannot record an empty query");
        }

        let key = dedup_key(query, kind);
        self.records.retain(|record| record.dedup_key() != key);

        let record = SearchRecord {
            id: Uuid::now_v7().to_string(),
            query: query.to_string(),
            kind,
            succeeded,
            created_at: self.next_timestamp(),
        };
        debug!(id = %record.id, %kind, succeeded, "Recording search");
        self.records.insert(0, record);

        if self.records.len() > self.capacity {
            for evicted in self.records.drain(self.capacity..) {
                debug!(id = %evicted.id, query = %evicted.query, "Evicting oldest search");
            }
        }

        self.persist()
    }

    /// Remove one entry; unknown ids are a no-op
    pub fn remove(&mut self, id: &str) -> Result<()> {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        if self.records.len() == before {
            debug!(id, "No history entry to remove");
        }
        self.persist()
    }

    /// Drop every entry and persist the empty collection
    pub fn clear(&mut self) -> Result<()> {
        self.records.clear();
        self.persist()
    }

    /// Wall-clock time at millisecond resolution
    ///
    /// Follows the newest entry only when it is within [`MAX_CLOCK_SKEW_MS`]
    /// ahead; a far-future stored timestamp is ignored.
    fn next_timestamp(&self) -> DateTime<Utc> {
        let now = Utc::now().trunc_subsecs(3);
        match self.records.first() {
            Some(newest)
                if newest.created_at > now
                    && newest.created_at - now <= Duration::milliseconds(MAX_CLOCK_SKEW_MS) =>
            {
                newest.created_at
            }
            _ => now,
        }
    }

    fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.records)
            .context("Failed to serialize search history")?;
        self.storage.write(&self.key, &json).context("Failed to persist search history")
    }

    /// Access the backing storage
    pub fn storage(&self) -> &S {
        &self.storage
    }
}
