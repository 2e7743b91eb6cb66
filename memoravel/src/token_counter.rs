//! Token counting over serialized entries.
//!
//! The tokenizer is an external capability: [`History`](crate::History) only
//! coordinates its outputs with the eviction policy. The default
//! implementation uses tiktoken's `o200k_base` encoding, which is accurate
//! for OpenAI models and a reasonable approximation for others. A counter
//! fault never aborts an append; the caller degrades to a zero-cost reading
//! and logs the condition.

use std::sync::OnceLock;

use thiserror::Error;
use tiktoken_rs::{CoreBPE, o200k_base};

#[derive(Debug, Error)]
pub enum TokenCountError {
    #[error("token encoder is unavailable")]
    EncoderUnavailable,
    #[error("entry could not be serialized for counting: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Maps serialized entry text to a token cost.
///
/// Implement this to bring your own tokenizer (or a deterministic stub in
/// tests); [`History::with_counter`](crate::History::with_counter) accepts
/// any implementation.
pub trait TokenCounter: std::fmt::Debug + Send {
    fn count(&self, text: &str) -> Result<u32, TokenCountError>;
}

/// The tiktoken encoder is expensive to initialize (loads vocabulary data),
/// so it is created once and shared across all counter instances.
static ENCODER: OnceLock<Option<CoreBPE>> = OnceLock::new();

fn encoder() -> Option<&'static CoreBPE> {
    ENCODER.get_or_init(|| o200k_base().ok()).as_ref()
}

/// Approximate token counter using tiktoken's `o200k_base` encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct TiktokenCounter;

impl TokenCounter for TiktokenCounter {
    fn count(&self, text: &str) -> Result<u32, TokenCountError> {
        let encoder = encoder().ok_or(TokenCountError::EncoderUnavailable)?;
        let len = encoder.encode_ordinary(text).len();
        Ok(u32::try_from(len).unwrap_or(u32::MAX))
    }
}
