use std::pin::Pin;

use futures_util::Stream;
use serde::{Deserialize, Serialize};

use super::response::{CompletionResponse, Usage};
use crate::error::LlmError;

/// Incremental chunk yielded to the caller during streaming
///
/// Reasoning fragments have already been folded into `content` with
/// think-tag delimiters by the time a chunk is yielded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamChunk {
    /// Choice index this chunk belongs to
    pub index: u32,
    /// Content fragment (may be empty)
    pub content: String,
    /// Usage accounting (present on the final chunk when the backend
    /// reports it, and always on a replayed blocking response)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    /// Reason generation finished (present on the final chunk)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Lazy, forward-only sequence of chunks
///
/// Produced synchronously from the underlying transport; suspension
/// happens only at the transport boundary. Cancellation is caller-driven:
/// drop the stream to stop consuming.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<StreamChunk, LlmError>> + Send>>;

/// Result of a generation call, matching the caller's `stream` flag
pub enum LlmOutput {
    /// Fully materialized response
    Full(CompletionResponse),
    /// Streamed chunk sequence
    Stream(ChunkStream),
}

impl std::fmt::Debug for LlmOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Full(response) => f.debug_tuple("Full").field(response).finish(),
            Self::Stream(_) => f.debug_tuple("Stream").field(&"..").finish(),
        }
    }
}
