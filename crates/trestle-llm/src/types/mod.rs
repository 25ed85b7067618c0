//! Internal request/response types shared across the pipeline

pub mod message;
pub mod response;
pub mod stream;

pub use message::{Content, ContentPart, FunctionCall, Message, Role, ToolCall, ToolDefinition};
pub use response::{CompletionResponse, Usage};
pub use stream::{ChunkStream, LlmOutput, StreamChunk};
