use serde::{Deserialize, Serialize};

use super::message::ToolCall;

/// Token usage accounting for a completed request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens consumed by the prompt
    pub prompt_tokens: u32,
    /// Tokens generated by the completion
    pub completion_tokens: u32,
    /// Sum of prompt and completion tokens
    pub total_tokens: u32,
}

/// Fully materialized (non-streamed) completion result
///
/// Reasoning text, when the backend emitted any, is already folded into
/// `content` inside a `<think>...</think>` region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Model the request was made under
    pub model: String,
    /// Assistant message content
    pub content: String,
    /// Tool calls requested by the assistant
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    /// Token usage
    pub usage: Usage,
    /// Why generation stopped, when the backend reported it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}
