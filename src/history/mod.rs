//! Search history for the episode finder client
//!
//! The history is a log of search *attempts*: failed searches are recorded
//! alongside successful ones so the user can retry them.

pub mod store;

pub use store::{HISTORY_CAPACITY, HISTORY_KEY, HistoryStore};
