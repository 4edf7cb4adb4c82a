//! Parsers for service responses and persisted history records
//!
//! # Error Handling Strategy
//!
//! Both parsers degrade instead of failing:
//!
//! - **Response text**: [`parse_response`] is total. The service's text protocol is not
//!   versioned, so fields are detected by marker substrings and an unexpected shape only
//!   leaves optional fields empty.
//!
//! - **Persisted records**: the `deserializers` helpers reject individual malformed
//!   fields with serde errors; the history store turns any failure to read the whole
//!   collection into an empty history.

pub mod deserializers;
pub mod response;

pub use response::parse_response;
