//! Conversion between internal types and the wire format

use serde_json::{Map, Value};

use crate::credentials::{EffectiveCredentials, FunctionCallingType};
use crate::protocol::openai::{
    WireFunction, WireFunctionCall, WireMessage, WireRequest, WireResponse, WireStreamChunk, WireTool, WireToolCall,
    WireUsage,
};
use crate::reasoning::{ThinkTagStream, wrap_complete};
use crate::types::{CompletionResponse, FunctionCall, Message, Role, StreamChunk, ToolCall, ToolDefinition, Usage};

/// Build the outbound generation request
///
/// Messages are expected to be normalized already (text-only user
/// content); shaped model parameters ride along flattened. Tools are
/// attached only when the resolved credentials advertise the tool-call
/// convention.
#[allow(clippy::too_many_arguments)]
pub fn build_generation_request(
    model: &str,
    credentials: &EffectiveCredentials,
    messages: &[Message],
    params: Map<String, Value>,
    tools: Option<&[ToolDefinition]>,
    stop: Option<Vec<String>>,
    stream: bool,
    user: Option<String>,
) -> WireRequest {
    let tools = match credentials.function_calling_type {
        Some(FunctionCallingType::ToolCall) => tools.map(|tools| tools.iter().map(wire_tool_from).collect()),
        None => None,
    };

    WireRequest {
        model: model.to_owned(),
        messages: Some(messages.iter().map(wire_message_from).collect()),
        prompt: None,
        stream: stream.then_some(true),
        stop,
        user,
        max_tokens: None,
        max_completion_tokens: None,
        tools,
        params,
    }
}

fn wire_message_from(message: &Message) -> WireMessage {
    let role = match message.role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
        Role::Tool => "tool",
    };

    WireMessage {
        role: role.to_owned(),
        content: Some(message.content.as_text()),
        name: message.name.clone(),
        tool_calls: message
            .tool_calls
            .as_ref()
            .map(|calls| calls.iter().map(wire_tool_call_from).collect()),
        tool_call_id: message.tool_call_id.clone(),
    }
}

fn wire_tool_call_from(call: &ToolCall) -> WireToolCall {
    WireToolCall {
        id: call.id.clone(),
        tool_type: "function".to_owned(),
        function: WireFunctionCall {
            name: call.function.name.clone(),
            arguments: call.function.arguments.clone(),
        },
    }
}

fn wire_tool_from(tool: &ToolDefinition) -> WireTool {
    WireTool {
        tool_type: "function".to_owned(),
        function: WireFunction {
            name: tool.name.clone(),
            description: tool.description.clone(),
            parameters: tool.parameters.clone(),
        },
    }
}

/// Convert a non-streamed wire response into the internal result
///
/// Reasoning fields on the message, when present, are folded into the
/// content with think-tag delimiters in a single pass.
pub fn response_from_wire(model: &str, response: WireResponse) -> CompletionResponse {
    let usage = response.usage.map(usage_from_wire).unwrap_or_default();
    let choice = response.choices.into_iter().next();

    let (content, tool_calls, finish_reason) = match choice {
        Some(choice) => {
            let completion_text = choice.text;
            let message = choice.message.unwrap_or_default();
            let raw_content = message.content.or(completion_text).unwrap_or_default();
            let reasoning = message.reasoning.or(message.reasoning_content);
            let tool_calls = message
                .tool_calls
                .map(|calls| calls.into_iter().map(tool_call_from_wire).collect())
                .unwrap_or_default();
            (
                wrap_complete(reasoning.as_deref(), &raw_content),
                tool_calls,
                choice.finish_reason,
            )
        }
        None => (String::new(), Vec::new(), None),
    };

    CompletionResponse {
        model: model.to_owned(),
        content,
        tool_calls,
        usage,
        finish_reason,
    }
}

fn tool_call_from_wire(call: WireToolCall) -> ToolCall {
    ToolCall {
        id: call.id,
        function: FunctionCall {
            name: call.function.name,
            arguments: call.function.arguments,
        },
    }
}

/// Convert one streamed wire chunk, threading the think-tag state
pub fn chunk_from_wire(state: &mut ThinkTagStream, chunk: WireStreamChunk) -> StreamChunk {
    let usage = chunk.usage.map(usage_from_wire);

    chunk.choices.into_iter().next().map_or_else(
        || StreamChunk {
            index: 0,
            content: String::new(),
            usage,
            finish_reason: None,
        },
        |choice| StreamChunk {
            index: choice.index,
            content: state.wrap(&choice.delta),
            usage,
            finish_reason: choice.finish_reason,
        },
    )
}

fn usage_from_wire(usage: WireUsage) -> Usage {
    let total = if usage.total_tokens == 0 {
        usage.prompt_tokens + usage.completion_tokens
    } else {
        usage.total_tokens
    };
    Usage {
        prompt_tokens: usage.prompt_tokens,
        completion_tokens: usage.completion_tokens,
        total_tokens: total,
    }
}
