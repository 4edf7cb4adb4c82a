use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The two query shapes the lookup service understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    Scene,
    Keyword,
}

impl QueryKind {
    pub fn label(self) -> &'static str {
        match self {
            QueryKind::Scene => "Scene",
            QueryKind::Keyword => "Keywords",
        }
    }

    /// The other kind (tab switching)
    pub fn toggled(self) -> Self {
        match self {
            QueryKind::Scene => QueryKind::Keyword,
            QueryKind::Keyword => QueryKind::Scene,
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKind::Scene => write!(f, "scene"),
            QueryKind::Keyword => write!(f, "keyword"),
        }
    }
}

/// One logged search attempt.
///
/// Field names on disk are camelCase (`createdAt`); `createdAt` is written as
/// Unix milliseconds and read back from either milliseconds or RFC3339.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRecord {
    #[serde(deserialize_with = "crate::parsers::deserializers::deserialize_record_id")]
    pub id: String,
    pub query: String,
    pub kind: QueryKind,
    pub succeeded: bool,
    #[serde(
        serialize_with = "chrono::serde::ts_milliseconds::serialize",
        deserialize_with = "crate::parsers::deserializers::deserialize_timestamp"
    )]
    pub created_at: DateTime<Utc>,
}

impl SearchRecord {
    /// Case-insensitive identity used for deduplication
    pub fn dedup_key(&self) -> (String, QueryKind) {
        dedup_key(&self.query, self.kind)
    }
}

pub(crate) fn dedup_key(query: &str, kind: QueryKind) -> (String, QueryKind) {
    (query.trim().to_lowercase(), kind)
}

/// Request shape handed to the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRequest {
    Scene { description: String },
    Keyword { keywords: String, max_results: usize },
}

impl SearchRequest {
    pub fn new(kind: QueryKind, query: &str, max_results: usize) -> Self {
        match kind {
            QueryKind::Scene => SearchRequest::Scene { description: query.to_string() },
            QueryKind::Keyword => {
                SearchRequest::Keyword { keywords: query.to_string(), max_results }
            }
        }
    }

    pub fn kind(&self) -> QueryKind {
        match self {
            SearchRequest::Scene { .. } => QueryKind::Scene,
            SearchRequest::Keyword { .. } => QueryKind::Keyword,
        }
    }

    pub fn query(&self) -> &str {
        match self {
            SearchRequest::Scene { description } => description,
            SearchRequest::Keyword { keywords, .. } => keywords,
        }
    }
}
