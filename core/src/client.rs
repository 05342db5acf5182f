//! Stateless request builder and response parser for the homework API.
//!
//! # Design
//! `HomeworkClient` holds only the endpoint and the OAuth token. Fetching is
//! split into `build_fetch`, which produces an `HttpRequest`, and
//! `parse_fetch`, which consumes the `HttpResponse`. The caller performs the
//! round-trip and maps transport failures with `HomeworkClient::unreachable`.

use serde_json::Value;
use tracing::{debug, error};

use crate::error::PollError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Reference deployment of the homework status API.
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

#[derive(Clone)]
pub struct HomeworkClient {
    endpoint: String,
    token: String,
}

impl std::fmt::Debug for HomeworkClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HomeworkClient")
            .field("endpoint", &self.endpoint)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl HomeworkClient {
    /// The endpoint is used verbatim; its trailing slash is significant.
    pub fn new(endpoint: &str, token: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            token: token.to_string(),
        }
    }

    /// Request every status change since `since` (Unix seconds).
    pub fn build_fetch(&self, since: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}{}from_date={since}", self.endpoint, query_separator(&self.endpoint)),
            headers: vec![("authorization".to_string(), format!("OAuth {}", self.token))],
            body: None,
        }
    }

    /// Decode a fetch response. No shape checks happen here.
    pub fn parse_fetch(&self, response: HttpResponse) -> Result<Value, PollError> {
        if !response.is_success() {
            error!(
                status = response.status,
                body = %response.text(),
                "homework endpoint {} is unavailable", self.endpoint
            );
            // The body stays out of the error: it may vary per request and
            // the error text is what repeated failures are deduplicated on.
            return Err(PollError::Connectivity(format!("HTTP {}", response.status)));
        }
        let value = serde_json::from_slice(&response.body).map_err(|e| {
            error!("homework endpoint returned a non-JSON body: {e}");
            PollError::MalformedResponse(format!("body is not JSON: {e}"))
        })?;
        debug!("homework endpoint {} answered", self.endpoint);
        Ok(value)
    }

    /// Map a transport failure (DNS, connect, timeout) to `Connectivity`.
    pub fn unreachable(&self, cause: impl std::fmt::Display) -> PollError {
        error!("request to homework endpoint {} failed: {cause}", self.endpoint);
        PollError::Connectivity(cause.to_string())
    }
}

/// `?` to start a query string, `&` when the endpoint already has one.
fn query_separator(endpoint: &str) -> char {
    if endpoint.contains('?') {
        '&'
    } else {
        '?'
    }
}
