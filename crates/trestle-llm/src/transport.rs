//! Completion transport seam
//!
//! The pipeline's transforms are composed around this trait rather than
//! inherited from a base engine: the plugin calls normalize/shape before
//! handing a wire request to the transport, and reassembles reasoning on
//! the way back. [`HttpTransport`] is the default implementation.

use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use eventsource_stream::Eventsource;
use futures_util::{Stream, StreamExt};
use reqwest::{Client, RequestBuilder};
use secrecy::ExposeSecret;

use crate::credentials::EffectiveCredentials;
use crate::error::LlmError;
use crate::protocol::openai::{WireRequest, WireResponse, WireStreamChunk};

/// Connect timeout for all outbound requests
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Read timeout for all outbound requests; generous because completion
/// backends can take minutes
pub const READ_TIMEOUT: Duration = Duration::from_secs(300);

/// Raw stream of wire chunks coming off the transport
pub type WireChunkStream = Pin<Box<dyn Stream<Item = Result<WireStreamChunk, LlmError>> + Send>>;

/// Sends completion requests to the remote endpoint
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    /// Issue a blocking completion request
    async fn complete(
        &self,
        credentials: &EffectiveCredentials,
        request: &WireRequest,
    ) -> Result<WireResponse, LlmError>;

    /// Issue a streaming completion request
    async fn complete_stream(
        &self,
        credentials: &EffectiveCredentials,
        request: &WireRequest,
    ) -> Result<WireChunkStream, LlmError>;
}

/// Default HTTP transport: reqwest POST with bearer auth and SSE decoding
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build the transport with the fixed connect/read timeouts
    pub fn new() -> Result<Self, LlmError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(READ_TIMEOUT)
            .build()
            .map_err(|e| LlmError::Internal(anyhow::anyhow!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    fn request_builder(&self, credentials: &EffectiveCredentials, request: &WireRequest) -> RequestBuilder {
        let url = credentials.endpoint_for(credentials.mode.endpoint_path());
        let mut builder = self.client.post(url).json(request);
        if let Some(key) = &credentials.api_key {
            builder = builder.bearer_auth(key.expose_secret());
        }
        builder
    }
}

#[async_trait]
impl CompletionTransport for HttpTransport {
    async fn complete(
        &self,
        credentials: &EffectiveCredentials,
        request: &WireRequest,
    ) -> Result<WireResponse, LlmError> {
        let response = self.request_builder(credentials, request).send().await.map_err(|e| {
            tracing::error!(error = %e, "upstream request failed");
            LlmError::Upstream(e.to_string())
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "upstream returned error");
            return Err(LlmError::Upstream(format!("endpoint returned {status}: {body}")));
        }

        response
            .json()
            .await
            .map_err(|e| LlmError::Upstream(format!("failed to parse response: {e}")))
    }

    async fn complete_stream(
        &self,
        credentials: &EffectiveCredentials,
        request: &WireRequest,
    ) -> Result<WireChunkStream, LlmError> {
        let mut request = request.clone();
        request.stream = Some(true);

        let response = self
            .request_builder(credentials, &request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "upstream stream request failed");
                LlmError::Upstream(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Upstream(format!("endpoint returned {status}: {body}")));
        }

        let event_stream = response.bytes_stream().eventsource();

        let mapped = event_stream
            .map(|result| match result {
                Ok(event) => {
                    let data = event.data.trim();
                    if data == "[DONE]" {
                        return vec![];
                    }
                    match serde_json::from_str::<WireStreamChunk>(data) {
                        Ok(chunk) => vec![Ok(chunk)],
                        Err(e) => {
                            tracing::debug!(error = %e, data = %data, "skipping unparseable SSE chunk");
                            vec![]
                        }
                    }
                }
                Err(e) => vec![Err(LlmError::Streaming(e.to_string()))],
            })
            .flat_map(futures_util::stream::iter);

        Ok(Box::pin(mapped))
    }
}
