//! OpenAI-compatible chat/completion wire format
//!
//! Covers both the conversational `chat/completions` shape and the
//! legacy prompt-based `completions` shape, plus the provider-specific
//! `reasoning`/`reasoning_content` fields some backends attach to
//! messages and stream deltas.

use serde::{Deserialize, Serialize};

// -- Request types --

/// Outbound completion request
///
/// Exactly one of `messages` (chat mode) or `prompt` (completion mode)
/// is populated. Shaped model parameters, including the nested
/// `reasoning` object, are flattened into the body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireRequest {
    /// Model identifier
    pub model: String,
    /// Conversation messages (chat mode)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<WireMessage>>,
    /// Plain prompt (completion mode)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Whether to stream the response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    /// Stop sequences
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
    /// End-user identifier forwarded to the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Maximum output tokens (most model families)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Maximum output tokens (thinking-series model families)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_completion_tokens: Option<u32>,
    /// Tool definitions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<WireTool>>,
    /// Remaining shaped model parameters, passed through verbatim
    #[serde(flatten)]
    pub params: serde_json::Map<String, serde_json::Value>,
}

/// Message within an outbound request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireMessage {
    /// Message role
    pub role: String,
    /// Text content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Participant name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Tool calls made by the assistant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<WireToolCall>>,
    /// Tool call ID this message responds to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

/// Tool definition in a request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireTool {
    /// Tool type (always "function")
    #[serde(rename = "type")]
    pub tool_type: String,
    /// Function specification
    pub function: WireFunction,
}

/// Function specification within a tool definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireFunction {
    /// Function name
    pub name: String,
    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

/// Tool call within a message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireToolCall {
    /// Unique tool call identifier
    pub id: String,
    /// Tool type (always "function")
    #[serde(rename = "type")]
    pub tool_type: String,
    /// Function call details
    pub function: WireFunctionCall,
}

/// Function call details within a tool call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireFunctionCall {
    /// Function name
    pub name: String,
    /// JSON-encoded arguments
    pub arguments: String,
}

// -- Response types --

/// Non-streamed completion response
///
/// Fields are lenient: compatible backends differ in which they send.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireResponse {
    /// Response identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Object discriminator ("chat.completion" / "text_completion")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    /// Model used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Generated choices
    #[serde(default)]
    pub choices: Vec<WireChoice>,
    /// Token usage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<WireUsage>,
}

/// Choice within a response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireChoice {
    /// Choice index
    #[serde(default)]
    pub index: u32,
    /// Generated message (chat mode)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<WireChoiceMessage>,
    /// Generated text (completion mode)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Why generation stopped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Message within a response choice
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireChoiceMessage {
    /// Role (always "assistant")
    #[serde(default)]
    pub role: String,
    /// Text content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Reasoning narrative (`OpenRouter` dialect)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    /// Reasoning narrative (reasoning_content dialect)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_content: Option<String>,
    /// Tool calls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<WireToolCall>>,
}

/// Token usage in a response
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WireUsage {
    /// Prompt tokens
    #[serde(default)]
    pub prompt_tokens: u32,
    /// Completion tokens
    #[serde(default)]
    pub completion_tokens: u32,
    /// Total tokens
    #[serde(default)]
    pub total_tokens: u32,
}

// -- Streaming types --

/// Streamed response chunk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireStreamChunk {
    /// Chunk identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Delta choices
    #[serde(default)]
    pub choices: Vec<WireStreamChoice>,
    /// Usage (present on the final chunk when the backend reports it)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<WireUsage>,
}

/// Choice within a streamed chunk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireStreamChoice {
    /// Choice index
    #[serde(default)]
    pub index: u32,
    /// Incremental delta
    #[serde(default)]
    pub delta: WireStreamDelta,
    /// Finish reason (present on the final chunk)
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Delta content within a streamed choice
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireStreamDelta {
    /// Role (present on the first chunk)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Incremental text content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Incremental reasoning fragment (`OpenRouter` dialect)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    /// Incremental reasoning fragment (reasoning_content dialect)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_content: Option<String>,
}
