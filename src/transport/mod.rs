//! Transport collaborator: submits a query to the lookup service
//!
//! The rest of the client only sees [`Transport::search`], which yields the
//! raw multi-line result text or a [`TransportError`] whose `Display` is the
//! message shown to the user.

pub mod http;

use thiserror::Error;

pub use http::HttpTransport;

use crate::models::SearchRequest;

/// Message used when the service rejects a request without saying why
pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to find episodes";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The service answered with a non-success status
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The request never produced a response (connection refused, timeout, ...)
    #[error("Could not reach the episode service: {0}")]
    Network(String),

    /// A success status with a body that is not the expected shape
    #[error("Unexpected response from the episode service: {0}")]
    InvalidResponse(String),
}

/// Performs one search against the remote service
pub trait Transport {
    fn search(&self, request: &SearchRequest) -> Result<String, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn search(&self, request: &SearchRequest) -> Result<String, TransportError> {
        (**self).search(request)
    }
}
