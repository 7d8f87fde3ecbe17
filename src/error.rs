//! Failure taxonomy for a single search submission.
//!
//! Three things can go wrong between the user pressing Enter and results
//! appearing: the query is empty, the request never produces a usable
//! payload, or the server answers cleanly but reports a logical failure.
//! All three end the submission and render into the same error slot; none
//! are retried. The user resubmits manually.

use std::fmt;

/// Validation message shown when the trimmed query is empty.
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a search query";

/// Prefix for transport failures; the underlying error text follows verbatim.
pub const NETWORK_ERROR_PREFIX: &str = "Network error: ";

/// Why a search submission produced no rendered results.
///
/// Every variant is terminal for its submission: the controller shows one
/// message, hides any stale output, and waits for the user to try again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// The query was empty (or whitespace-only) after trimming. Caught
    /// before any network traffic happens.
    EmptyQuery,
    /// The request never yielded a usable payload: a network failure, a
    /// non-2xx status, or a body that is not the expected JSON.
    Transport { detail: String },
    /// The server answered 2xx but the payload carried an `error` field,
    /// e.g. "index unavailable". Shown verbatim.
    Server { message: String },
}

impl UiError {
    /// The exact string written into the page's single error slot.
    pub fn user_message(&self) -> String {
        match self {
            UiError::EmptyQuery => EMPTY_QUERY_MESSAGE.to_string(),
            UiError::Transport { detail } => format!("{}{}", NETWORK_ERROR_PREFIX, detail),
            UiError::Server { message } => message.clone(),
        }
    }
}

impl fmt::Display for UiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiError::EmptyQuery => write!(f, "empty query"),
            UiError::Transport { detail } => write!(f, "transport failure: {}", detail),
            UiError::Server { message } => write!(f, "server-reported error: {}", message),
        }
    }
}

impl std::error::Error for UiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_maps_to_validation_message() {
        assert_eq!(UiError::EmptyQuery.user_message(), EMPTY_QUERY_MESSAGE);
    }

    #[test]
    fn transport_message_includes_underlying_detail() {
        let err = UiError::Transport {
            detail: "HTTP 500".to_string(),
        };
        let message = err.user_message();
        assert!(message.starts_with(NETWORK_ERROR_PREFIX));
        assert!(message.contains("500"));
    }

    #[test]
    fn server_message_is_shown_verbatim() {
        let err = UiError::Server {
            message: "index unavailable".to_string(),
        };
        assert_eq!(err.user_message(), "index unavailable");
    }
}
