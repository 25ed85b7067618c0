//! OpenAI-compatible model provider adapter
//!
//! Lets an LLM orchestration host talk to an OpenAI-compatible
//! chat/completion endpoint under custom model identities: capability
//! metadata comes from the declarative catalog, credentials are
//! validated with a minimal ping, multimodal input is degraded to text
//! for backends without multimodal support, and provider-specific
//! reasoning deltas are reassembled into a think-tag-delimited content
//! stream.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod convert;
pub mod credentials;
pub mod error;
pub mod normalize;
pub mod params;
pub mod plugin;
pub mod protocol;
pub mod reasoning;
pub mod schema;
pub mod tokens;
pub mod transport;
pub mod types;
pub mod validate;

pub use credentials::{Credentials, EffectiveCredentials, FunctionCallingType, StreamModeAuth};
pub use error::LlmError;
pub use plugin::LanguageModelPlugin;
pub use schema::ModelDescriptor;
pub use transport::{CompletionTransport, HttpTransport};
pub use types::{ChunkStream, CompletionResponse, LlmOutput, Message, StreamChunk, Usage};
pub use validate::CredentialValidator;
