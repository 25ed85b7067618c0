//! Delegated token estimation

use tiktoken_rs::o200k_base;

use crate::types::{Message, ToolDefinition};

/// Estimate token count for a piece of text
fn estimate_tokens(text: &str) -> usize {
    o200k_base().map_or_else(|_| text.len() / 4, |bpe| bpe.encode_with_special_tokens(text).len())
}

/// Estimate token count for a prompt, including tool definitions
pub fn estimate_prompt_tokens(messages: &[Message], tools: Option<&[ToolDefinition]>) -> usize {
    let mut total: usize = messages.iter().map(|m| estimate_tokens(&m.content.as_text())).sum();

    if let Some(tools) = tools {
        for tool in tools {
            let serialized = serde_json::to_string(tool).unwrap_or_default();
            total += estimate_tokens(&serialized);
        }
    }

    total
}
