//! Data models for episode searches.
//!
//! This module defines the data structures shared by the client:
//!
//! - [`SearchRecord`] - One logged search attempt, persisted in the history
//! - [`QueryKind`] - Scene description or keyword search
//! - [`SearchRequest`] - Request shape handed to the transport
//! - [`DisplayModel`] - Structured view of one raw service response
//!
//! Persisted records use serde with custom deserializers for the timestamp and
//! id fields in the `parsers::deserializers` module.

pub mod display;
pub mod search;

pub use display::{DisplayModel, KeywordStats, NO_MATCH_SUMMARY};
pub use search::{QueryKind, SearchRecord, SearchRequest};
