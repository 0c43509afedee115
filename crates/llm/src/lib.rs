//! OpenAI-compatible chat-completions client and the outline request
//! pipeline.
//!
//! The pipeline deliberately masks upstream failures: any [`LlmError`]
//! from the provider resolves to the same fixed fallback deck that
//! unparseable output does, so callers always receive a usable outline.

pub mod client;
pub mod error;
pub mod outline;

pub use client::{CompletionRequest, OpenAiClient, OutlineProvider};
pub use error::LlmError;
pub use outline::{request_outline, OutlineParams};
