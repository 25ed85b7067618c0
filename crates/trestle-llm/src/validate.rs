//! Credential validation against the remote endpoint
//!
//! Sends a minimal "ping" completion shaped for the model's mode and
//! family, and classifies the response. Runs at configuration time,
//! independently of the generation pipeline.

use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use serde_json::Value;
use trestle_catalog::{CompletionMode, ModelCatalog};

use crate::credentials::{Credentials, StreamModeAuth, resolve_for_validation};
use crate::error::LlmError;
use crate::protocol::openai::{WireMessage, WireRequest};
use crate::transport::{CONNECT_TIMEOUT, READ_TIMEOUT};

/// Output token budget for the synchronous ping
const PING_TOKEN_LIMIT: u32 = 5;
/// Output token budget for the streaming probe
const STREAM_PROBE_TOKEN_LIMIT: u32 = 10;

/// Model families that renamed the max-output-token field
const THINKING_SERIES_PREFIXES: [&str; 2] = ["o", "gpt-5"];

/// Validates credentials by pinging the completion endpoint
pub struct CredentialValidator {
    client: Client,
}

impl CredentialValidator {
    /// Build the validator with the fixed connect/read timeouts
    pub fn new() -> Result<Self, LlmError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(READ_TIMEOUT)
            .build()
            .map_err(|e| LlmError::Internal(anyhow::anyhow!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Validate that the credentials serve a working completion API for
    /// the given model
    ///
    /// Fails with `CredentialsValidation` on an unreachable endpoint, a
    /// non-200 status, a non-JSON body, or a response whose `object`
    /// discriminator does not match the configured mode.
    pub async fn validate(
        &self,
        model: &str,
        credentials: &Credentials,
        catalog: &ModelCatalog,
    ) -> Result<(), LlmError> {
        let effective = resolve_for_validation(model, credentials, catalog)?;
        let url = effective.endpoint_for(effective.mode.endpoint_path());
        let stream_probe = effective.stream_mode_auth == StreamModeAuth::Use;
        let ping = build_ping_request(model, effective.mode, stream_probe);

        let mut builder = self.client.post(&url).json(&ping);
        if let Some(key) = &effective.api_key {
            builder = builder.bearer_auth(key.expose_secret());
        }

        let response = builder.send().await.map_err(|e| {
            let message = format!("an error occurred during credentials validation: {e}");
            LlmError::credentials_validation_caused_by(message, e)
        })?;

        let status = response.status();

        // The streaming probe exists because some backends only check
        // auth at connection-open for streamed requests; only the
        // initial status matters, the body is never parsed.
        if stream_probe {
            if status != StatusCode::OK {
                let body = response.text().await.unwrap_or_default();
                return Err(LlmError::credentials_validation(format!(
                    "credentials validation failed with status code {status} and response body {body}"
                )));
            }
            return Ok(());
        }

        let body = response.text().await.map_err(|e| {
            let message = format!("an error occurred during credentials validation: {e}");
            LlmError::credentials_validation_caused_by(message, e)
        })?;

        if status != StatusCode::OK {
            return Err(LlmError::credentials_validation(format!(
                "credentials validation failed with status code {status} and response body {body}"
            )));
        }

        let json: Value = serde_json::from_str(&body).map_err(|_| {
            LlmError::credentials_validation(format!(
                "credentials validation failed: JSON decode error, response body {body}"
            ))
        })?;

        let expected = effective.mode.object_discriminator();
        // Only an absent or empty-string discriminator defaults to the
        // expected value; anything else present must match, and a
        // non-string value never does.
        let matches = match json.get("object") {
            None => true,
            Some(Value::String(s)) => s.is_empty() || s == expected,
            Some(_) => false,
        };

        if matches {
            Ok(())
        } else {
            Err(LlmError::credentials_validation(format!(
                "credentials validation failed: invalid response object, must be '{expected}', response body {body}"
            )))
        }
    }
}

/// Build the minimal ping payload for a mode and model family
fn build_ping_request(model: &str, mode: CompletionMode, stream_probe: bool) -> WireRequest {
    let token_limit = if stream_probe {
        STREAM_PROBE_TOKEN_LIMIT
    } else {
        PING_TOKEN_LIMIT
    };

    let thinking_series = THINKING_SERIES_PREFIXES.iter().any(|p| model.starts_with(p));
    let (max_tokens, max_completion_tokens) = if thinking_series {
        (None, Some(token_limit))
    } else {
        (Some(token_limit), None)
    };

    let (messages, prompt) = match mode {
        CompletionMode::Chat => (
            Some(vec![WireMessage {
                role: "user".to_owned(),
                content: Some("ping".to_owned()),
                name: None,
                tool_calls: None,
                tool_call_id: None,
            }]),
            None,
        ),
        CompletionMode::Completion => (None, Some("ping".to_owned())),
    };

    WireRequest {
        model: model.to_owned(),
        messages,
        prompt,
        stream: stream_probe.then_some(true),
        max_tokens,
        max_completion_tokens,
        ..WireRequest::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_ping_sends_single_user_message() {
        let ping = build_ping_request("gpt-4o-mini", CompletionMode::Chat, false);
        let body = serde_json::to_value(&ping).unwrap();
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "ping");
        assert_eq!(body["max_tokens"], 5);
        assert!(body.get("prompt").is_none());
        assert!(body.get("stream").is_none());
    }

    #[test]
    fn completion_ping_sends_prompt() {
        let ping = build_ping_request("text-davinci-003", CompletionMode::Completion, false);
        let body = serde_json::to_value(&ping).unwrap();
        assert_eq!(body["prompt"], "ping");
        assert!(body.get("messages").is_none());
    }

    #[test]
    fn thinking_series_models_use_max_completion_tokens() {
        for model in ["o1-mini", "o3", "gpt-5-turbo"] {
            let ping = build_ping_request(model, CompletionMode::Chat, false);
            let body = serde_json::to_value(&ping).unwrap();
            assert_eq!(body["max_completion_tokens"], 5, "model {model}");
            assert!(body.get("max_tokens").is_none(), "model {model}");
        }
    }

    #[test]
    fn other_models_use_max_tokens() {
        for model in ["gpt-4o-mini", "llama-3-70b", "deepseek-chat"] {
            let ping = build_ping_request(model, CompletionMode::Chat, false);
            let body = serde_json::to_value(&ping).unwrap();
            assert_eq!(body["max_tokens"], 5, "model {model}");
            assert!(body.get("max_completion_tokens").is_none(), "model {model}");
        }
    }

    #[test]
    fn stream_probe_raises_token_limit_and_sets_stream() {
        let ping = build_ping_request("gpt-4o-mini", CompletionMode::Chat, true);
        let body = serde_json::to_value(&ping).unwrap();
        assert_eq!(body["stream"], true);
        assert_eq!(body["max_tokens"], 10);
    }
}
