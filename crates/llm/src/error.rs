//! LLM call error kinds.
//!
//! These never reach the conversion caller: the outline pipeline maps
//! every variant to the fallback deck.

use thiserror::Error;

/// Errors from a chat-completion call.
#[derive(Error, Debug)]
pub enum LlmError {
    /// Transport-level failure (DNS, connect, timeout).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API rejected the credential.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The API rate-limited the request.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Any other non-success API status.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The reply did not contain a usable completion.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}
