//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use episode_finder::models::SearchRequest;
use episode_finder::transport::{Transport, TransportError};
use tempfile::TempDir;

/// Builder for raw service response text
pub struct ResponseBuilder {
    summary: String,
    lines: Vec<String>,
}

impl ResponseBuilder {
    pub fn new(summary: &str) -> Self {
        Self { summary: summary.to_string(), lines: Vec::new() }
    }

    pub fn rating(self, rating: &str) -> Self {
        self.line(&format!("IMDb Rating: {}", rating))
    }

    pub fn air_date(self, date: &str) -> Self {
        self.line(&format!("Original Air Date: {}", date))
    }

    pub fn matched(self, matched: usize, total: usize) -> Self {
        self.line(&format!("Matched {}/{} keywords", matched, total))
    }

    pub fn keywords_found(self, keywords: &str) -> Self {
        self.line(&format!("Keywords found: {}", keywords))
    }

    pub fn image(self, url: &str) -> Self {
        self.line(&format!("IMDb Image: {}", url))
    }

    pub fn url(self, url: &str) -> Self {
        self.line(&format!("IMDb URL: {}", url))
    }

    /// Append an arbitrary line
    pub fn line(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn build(&self) -> String {
        let mut all = vec![self.summary.clone()];
        all.extend(self.lines.iter().cloned());
        all.join("\n")
    }
}

/// A realistic scene-search response
pub fn soup_nazi_response() -> String {
    ResponseBuilder::new("Season 7, Episode 6: The Soup Nazi")
        .rating("9.2/10 (6,000 votes)")
        .air_date("1995-11-02")
        .image("https://m.media-amazon.com/images/soup.jpg")
        .url("https://www.imdb.com/title/tt0697782/")
        .build()
}

/// A realistic keyword-search response
pub fn contest_response() -> String {
    ResponseBuilder::new("Season 4, Episode 11: The Contest")
        .rating("9.6/10 (8,000 votes)")
        .matched(3, 4)
        .keywords_found("bet, contest, master of my domain")
        .url("https://www.imdb.com/title/tt0697685/")
        .build()
}

/// Transport that replays canned replies in order and remembers requests
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<Result<String, TransportError>>>,
    requests: RefCell<Vec<SearchRequest>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Result<String, TransportError>>) -> Self {
        Self { replies: RefCell::new(replies.into()), requests: RefCell::new(Vec::new()) }
    }

    /// Answer every request with the same text
    pub fn always(reply: &str, count: usize) -> Self {
        Self::new((0..count).map(|_| Ok(reply.to_string())).collect())
    }

    pub fn requests(&self) -> Vec<SearchRequest> {
        self.requests.borrow().clone()
    }
}

impl Transport for ScriptedTransport {
    fn search(&self, request: &SearchRequest) -> Result<String, TransportError> {
        self.requests.borrow_mut().push(request.clone());
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted reply".into())))
    }
}

/// Temporary data directory for file-backed history
pub struct DataDirBuilder {
    temp_dir: TempDir,
}

impl DataDirBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write raw content to `search-history.json`
    pub fn with_history(self, content: &str) -> Self {
        fs::write(self.history_path(), content).expect("Failed to write history file");
        self
    }

    /// Write serialized records to `search-history.json`
    pub fn with_records(self, records: &[RecordBuilder]) -> Self {
        let content = format!(
            "[{}]",
            records.iter().map(|r| r.to_json()).collect::<Vec<_>>().join(",")
        );
        self.with_history(&content)
    }

    pub fn history_path(&self) -> PathBuf {
        self.temp_dir.path().join("search-history.json")
    }

    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for DataDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for persisted history records
pub struct RecordBuilder {
    id: String,
    query: String,
    kind: String,
    succeeded: bool,
    created_at: i64,
}

impl RecordBuilder {
    pub fn new(id: &str, query: &str) -> Self {
        Self {
            id: id.to_string(),
            query: query.to_string(),
            kind: "scene".to_string(),
            succeeded: true,
            created_at: 1_700_000_000_000,
        }
    }

    pub fn keyword(mut self) -> Self {
        self.kind = "keyword".to_string();
        self
    }

    pub fn failed(mut self) -> Self {
        self.succeeded = false;
        self
    }

    pub fn created_at(mut self, millis: i64) -> Self {
        self.created_at = millis;
        self
    }

    pub fn to_json(&self) -> String {
        serde_json::json!({
            "id": self.id,
            "query": self.query,
            "kind": self.kind,
            "succeeded": self.succeeded,
            "createdAt": self.created_at,
        })
        .to_string()
    }
}
