//! Episode Finder - identify TV episodes from a scene description or keywords
//!
//! This library is the client side of an episode lookup service. It provides:
//!
//! - Parsing the service's multi-line result text into a [`DisplayModel`]
//! - A bounded, deduplicating history of recent searches ([`HistoryStore`])
//! - A [`SearchController`] wiring transport, parser, history, and renderer
//! - Plain-text and interactive terminal front-ends
//!
//! # Example
//!
//! ```
//! use episode_finder::parse_response;
//!
//! let model = parse_response("The Soup Nazi\nIMDb Rating: 9.2/10 (3,000 votes)");
//! assert_eq!(model.summary, "The Soup Nazi");
//! assert_eq!(model.rating.as_deref(), Some("9.2/10 (3,000 votes)"));
//! ```

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod controller;
pub mod history;
pub mod models;
pub mod parsers;
pub mod render;
pub mod storage;
pub mod transport;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use controller::{SearchController, SearchOutcome, SubmitError};
pub use history::HistoryStore;
pub use models::{DisplayModel, QueryKind, SearchRecord};
pub use parsers::parse_response;
