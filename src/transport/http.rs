use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{DEFAULT_FAILURE_MESSAGE, Transport, TransportError};
use crate::models::SearchRequest;

const SCENE_ENDPOINT: &str = "/api/search";
const KEYWORD_ENDPOINT: &str = "/api/keyword-search";

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestBody<'a> {
    Scene {
        description: &'a str,
    },
    Keyword {
        keywords: &'a str,
        #[serde(rename = "maxResults")]
        max_results: usize,
    },
}

impl<'a> From<&'a SearchRequest> for RequestBody<'a> {
    fn from(request: &'a SearchRequest) -> Self {
        match request {
            SearchRequest::Scene { description } => RequestBody::Scene { description },
            SearchRequest::Keyword { keywords, max_results } => {
                RequestBody::Keyword { keywords, max_results: *max_results }
            }
        }
    }
}

/// `results` is one text blob for scene searches and a list of ranked
/// blocks for keyword searches
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ResultsField {
    Text(String),
    Blocks(Vec<String>),
}

#[derive(Debug, Deserialize)]
struct ResponseBody {
    #[serde(default)]
    results: Option<ResultsField>,
    #[serde(default)]
    error: Option<String>,
}

/// JSON-over-HTTP transport for the episode lookup service
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("episode-finder/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building http client")?;

        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string() })
    }

    /// Full URL for a request's endpoint
    pub fn endpoint(&self, request: &SearchRequest) -> String {
        let path = match request {
            SearchRequest::Scene { .. } => SCENE_ENDPOINT,
            SearchRequest::Keyword { .. } => KEYWORD_ENDPOINT,
        };
        format!("{}{}", self.base_url, path)
    }
}

impl Transport for HttpTransport {
    fn search(&self, request: &SearchRequest) -> Result<String, TransportError> {
        let url = self.endpoint(request);
        debug!(%url, kind = %request.kind(), "Sending search request");

        let response = self
            .client
            .post(&url)
            .json(&RequestBody::from(request))
            .send()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response.text().map_err(|e| TransportError::Network(e.to_string()))?;
        info!(%url, status, bytes = body.len(), "Search response received");

        interpret_response(status, &body)
    }
}

/// Map a status code and body to result text or a user-facing failure
pub(crate) fn interpret_response(status: u16, body: &str) -> Result<String, TransportError> {
    let parsed = serde_json::from_str::<ResponseBody>(body);

    if !(200..300).contains(&status) {
        let message = parsed
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());
        return Err(TransportError::Rejected { status, message });
    }

    let parsed = parsed.map_err(|e| TransportError::InvalidResponse(e.to_string()))?;
    match parsed.results {
        Some(ResultsField::Text(text)) => Ok(text),
        Some(ResultsField::Blocks(blocks)) => Ok(blocks.join("\n")),
        None => Err(TransportError::InvalidResponse("response has no results".to_string())),
    }
}
