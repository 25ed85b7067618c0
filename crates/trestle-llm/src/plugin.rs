//! Host-facing entry points
//!
//! Composes the pipeline: resolve credentials, normalize messages, shape
//! parameters, hand the wire request to the transport, and reassemble
//! reasoning on the way back. One logical request per call; no internal
//! concurrency.

use futures_util::StreamExt;
use serde_json::{Map, Value};
use trestle_catalog::ModelCatalog;

use crate::convert;
use crate::credentials::{Credentials, resolve_for_generation};
use crate::error::LlmError;
use crate::normalize::convert_files_to_text;
use crate::params::shape_reasoning_params;
use crate::reasoning::ThinkTagStream;
use crate::schema::{ModelDescriptor, descriptor_from_record};
use crate::tokens::estimate_prompt_tokens;
use crate::transport::{CompletionTransport, HttpTransport, WireChunkStream};
use crate::types::{ChunkStream, CompletionResponse, LlmOutput, Message, StreamChunk, ToolDefinition};
use crate::validate::CredentialValidator;

/// Model provider plugin over an OpenAI-compatible endpoint
pub struct LanguageModelPlugin<T = HttpTransport> {
    catalog: ModelCatalog,
    transport: T,
    validator: CredentialValidator,
}

impl LanguageModelPlugin<HttpTransport> {
    /// Build a plugin with the default HTTP transport
    pub fn new(catalog: ModelCatalog) -> Result<Self, LlmError> {
        let transport = HttpTransport::new()?;
        Self::with_transport(catalog, transport)
    }
}

impl<T: CompletionTransport> LanguageModelPlugin<T> {
    /// Build a plugin around a custom transport
    pub fn with_transport(catalog: ModelCatalog, transport: T) -> Result<Self, LlmError> {
        Ok(Self {
            catalog,
            transport,
            validator: CredentialValidator::new()?,
        })
    }

    /// The catalog this plugin serves models from
    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    /// Run a generation request
    ///
    /// Multimodal content is degraded to text, reasoning parameters are
    /// repacked, and streamed reasoning deltas come back merged into the
    /// content with think-tag delimiters. With `stream` false the call
    /// blocks for the full response, with reasoning folded in the same
    /// way.
    #[allow(clippy::too_many_arguments)]
    pub async fn invoke(
        &self,
        model: &str,
        credentials: &Credentials,
        prompt_messages: Vec<Message>,
        model_parameters: Map<String, Value>,
        tools: Option<Vec<ToolDefinition>>,
        stop: Option<Vec<String>>,
        stream: bool,
        user: Option<String>,
    ) -> Result<LlmOutput, LlmError> {
        let effective = resolve_for_generation(model, credentials, &self.catalog)?;

        let messages = convert_files_to_text(prompt_messages);

        let mut params = model_parameters;
        shape_reasoning_params(&mut params);

        let request = convert::build_generation_request(
            model,
            &effective,
            &messages,
            params,
            tools.as_deref(),
            stop,
            stream,
            user,
        );

        if stream {
            let chunks = self.transport.complete_stream(&effective, &request).await?;
            Ok(LlmOutput::Stream(reassemble(chunks)))
        } else {
            let response = self.transport.complete(&effective, &request).await?;
            Ok(LlmOutput::Full(convert::response_from_wire(model, response)))
        }
    }

    /// Run a generation request, always yielding the chunk contract
    ///
    /// A streamed response passes through unchanged; a blocking response
    /// is replayed as a single synthetic chunk carrying the full usage
    /// accounting.
    #[allow(clippy::too_many_arguments)]
    pub async fn invoke_as_stream(
        &self,
        model: &str,
        credentials: &Credentials,
        prompt_messages: Vec<Message>,
        model_parameters: Map<String, Value>,
        tools: Option<Vec<ToolDefinition>>,
        stop: Option<Vec<String>>,
        stream: bool,
        user: Option<String>,
    ) -> Result<ChunkStream, LlmError> {
        let output = self
            .invoke(model, credentials, prompt_messages, model_parameters, tools, stop, stream, user)
            .await?;

        match output {
            LlmOutput::Stream(chunks) => Ok(chunks),
            LlmOutput::Full(response) => Ok(replay_as_stream(response)),
        }
    }

    /// Validate that the credentials serve a working completion API
    pub async fn validate_credentials(&self, model: &str, credentials: &Credentials) -> Result<(), LlmError> {
        self.validator.validate(model, credentials, &self.catalog).await
    }

    /// Build the customizable model schema from configuration
    pub fn get_customizable_model_schema(
        &self,
        model: &str,
        _credentials: &Credentials,
    ) -> Result<ModelDescriptor, LlmError> {
        let record = self.catalog.find(model)?;
        Ok(descriptor_from_record(model, record))
    }

    /// Estimate prompt token usage for a configured model
    pub fn get_num_tokens(
        &self,
        model: &str,
        _credentials: &Credentials,
        prompt_messages: &[Message],
        tools: Option<&[ToolDefinition]>,
    ) -> Result<usize, LlmError> {
        self.catalog.find(model)?;
        Ok(estimate_prompt_tokens(prompt_messages, tools))
    }
}

/// Map wire chunks through the think-tag state machine
fn reassemble(chunks: WireChunkStream) -> ChunkStream {
    let mut state = ThinkTagStream::new();
    Box::pin(chunks.map(move |result| result.map(|chunk| convert::chunk_from_wire(&mut state, chunk))))
}

/// Re-express a blocking response as a single-element chunk sequence
fn replay_as_stream(response: CompletionResponse) -> ChunkStream {
    let finish_reason = response.finish_reason.unwrap_or_else(|| "stop".to_owned());
    let chunk = StreamChunk {
        index: 0,
        content: response.content,
        usage: Some(response.usage),
        finish_reason: Some(finish_reason),
    };
    Box::pin(futures_util::stream::iter([Ok(chunk)]))
}
