//! Error types for one polling iteration.
//!
//! # Design
//! Every failure that can occur between fetching and formatting lands in
//! `PollError`, so the loop can report it to the operator without inspecting
//! strings. Chat delivery failures live in a separate `DeliveryError` because
//! they never leave the notifier.

use thiserror::Error;

/// Errors surfaced to the poll loop's iteration boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollError {
    /// The homework API could not be reached or answered with a non-2xx status.
    #[error("homework API is unreachable: {0}")]
    Connectivity(String),

    /// The response body does not have the expected shape.
    #[error("malformed API response: {0}")]
    MalformedResponse(String),

    /// A required key is absent from the response.
    #[error("API response is missing the `{0}` key")]
    MissingField(&'static str),

    /// A homework record carries no `status`.
    #[error("homework record has no status")]
    NoStatus,

    /// A homework record carries no `homework_name`.
    #[error("homework record has no name")]
    NoName,

    /// A homework record carries a status outside the catalog.
    #[error("undocumented homework status: {0}")]
    UnknownStatus(String),
}

/// A chat message could not be delivered. Logged by the notifier and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// The transport failed before a response arrived.
    #[error("chat transport failed: {0}")]
    Transport(String),

    /// The chat API answered, but refused the message.
    #[error("chat API rejected the message (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },
}
