//! The `/search` request: body encoding, response decoding, sequencing.
//!
//! Everything here is independent of the browser so the whole request
//! protocol tests natively; the WASM layer only supplies the actual
//! `fetch` transport.

use crate::error::UiError;
use crate::types::SearchResponse;
use std::cell::Cell;

/// The single server endpoint this controller talks to.
pub const SEARCH_ENDPOINT: &str = "/search";

/// Content type of the form-encoded request body.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Build the URL-encoded form body for one search.
///
/// The query is percent-encoded; `top_k` comes from a numeric input and is
/// forwarded as-is, unvalidated; the server owns its validation.
pub fn encode_search_body(query: &str, top_k: &str) -> String {
    format!("query={}&top_k={}", urlencoding::encode(query), top_k)
}

/// Classify an HTTP outcome into the error taxonomy.
///
/// - non-2xx status: hard transport error naming the status
/// - unparseable body: transport error carrying the parse failure
/// - 2xx payload with an `error` field: soft logical error, verbatim
/// - otherwise the decoded response, ready to render
pub fn decode_response(status: u16, body: &str) -> Result<SearchResponse, UiError> {
    if !(200..300).contains(&status) {
        return Err(UiError::Transport {
            detail: format!("HTTP {}", status),
        });
    }

    let response: SearchResponse = serde_json::from_str(body).map_err(|e| UiError::Transport {
        detail: format!("invalid response: {}", e),
    })?;

    match response.error {
        Some(message) => Err(UiError::Server { message }),
        None => Ok(response),
    }
}

/// Monotone token source that makes overlapping searches deterministic.
///
/// Each submission calls [`begin`](Self::begin) and keeps the token; when
/// its response arrives it checks [`is_current`](Self::is_current) and
/// discards the outcome if a later submission has started. The rendered
/// page therefore always belongs to the last-submitted query, not to
/// whichever response happened to resolve last.
#[derive(Debug, Default)]
pub struct RequestSequence {
    current: Cell<u64>,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new submission and return its token.
    pub fn begin(&self) -> u64 {
        let token = self.current.get() + 1;
        self.current.set(token);
        token
    }

    /// Whether `token` still belongs to the newest submission.
    pub fn is_current(&self, token: u64) -> bool {
        self.current.get() == token
    }
}
