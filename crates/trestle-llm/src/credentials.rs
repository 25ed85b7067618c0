//! Caller-supplied credentials and their resolved, effective form
//!
//! Callers hand over a raw [`Credentials`] value per call; the pipeline
//! never mutates it. Instead a pure resolution step combines it with the
//! model's catalog record into an [`EffectiveCredentials`], which is
//! what the validator and transport consume. Resolution is trivially
//! idempotent: resolving twice yields the same value.

use secrecy::SecretString;
use serde::Deserialize;
use trestle_catalog::{CompletionMode, ModelCatalog};
use url::Url;

use crate::error::LlmError;

/// Whether credential validation must use the streaming probe
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamModeAuth {
    /// Probe with `stream: true` and judge by HTTP status only
    Use,
    /// Regular synchronous probe with body inspection
    #[default]
    NotUse,
}

/// Tool-calling wire convention the backend expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionCallingType {
    /// OpenAI `tools`/`tool_calls` convention
    ToolCall,
}

/// Raw credentials supplied by the caller
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    /// Base URL of the OpenAI-compatible endpoint
    pub endpoint_url: String,
    /// Bearer token, when the endpoint requires one
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Completion mode override; the catalog record usually supplies it
    #[serde(default)]
    pub mode: Option<CompletionMode>,
    /// Streaming-probe preference for credential validation
    #[serde(default)]
    pub stream_mode_auth: StreamModeAuth,
}

/// Credentials after resolution against the model's catalog record
#[derive(Debug, Clone)]
pub struct EffectiveCredentials {
    /// Parsed endpoint base URL
    pub endpoint_url: Url,
    /// Bearer token, when present
    pub api_key: Option<SecretString>,
    /// Completion mode the call will use
    pub mode: CompletionMode,
    /// Streaming-probe preference
    pub stream_mode_auth: StreamModeAuth,
    /// Tool-calling convention, injected when the record advertises
    /// tool-calling capability
    pub function_calling_type: Option<FunctionCallingType>,
}

impl EffectiveCredentials {
    /// Endpoint URL for the given path, with the base normalized to end
    /// in a trailing slash before joining
    pub fn endpoint_for(&self, path: &str) -> String {
        let base = self.endpoint_url.as_str().trim_end_matches('/');
        format!("{base}/{path}")
    }
}

/// Resolve credentials for the generation path
///
/// Generation always talks to the chat endpoint, regardless of what the
/// record or caller declare.
pub fn resolve_for_generation(
    model: &str,
    credentials: &Credentials,
    catalog: &ModelCatalog,
) -> Result<EffectiveCredentials, LlmError> {
    resolve(model, credentials, catalog, Some(CompletionMode::Chat))
}

/// Resolve credentials for the validation path
///
/// The mode comes from the record's `model_properties.mode`, falling
/// back to the caller-supplied mode.
pub fn resolve_for_validation(
    model: &str,
    credentials: &Credentials,
    catalog: &ModelCatalog,
) -> Result<EffectiveCredentials, LlmError> {
    resolve(model, credentials, catalog, None)
}

fn resolve(
    model: &str,
    credentials: &Credentials,
    catalog: &ModelCatalog,
    forced_mode: Option<CompletionMode>,
) -> Result<EffectiveCredentials, LlmError> {
    let record = catalog.find(model)?;

    let mode = forced_mode
        .or(record.model_properties.mode)
        .or(credentials.mode)
        .ok_or_else(|| {
            LlmError::UnsupportedMode(format!("model '{model}' declares no completion mode"))
        })?;

    let endpoint_url = Url::parse(&credentials.endpoint_url).map_err(|e| {
        LlmError::credentials_validation(format!("invalid endpoint URL '{}': {e}", credentials.endpoint_url))
    })?;

    let function_calling_type = record.supports_tool_calls().then_some(FunctionCallingType::ToolCall);

    Ok(EffectiveCredentials {
        endpoint_url,
        api_key: credentials.api_key.clone(),
        mode,
        stream_mode_auth: credentials.stream_mode_auth,
        function_calling_type,
    })
}

#[cfg(test)]
mod tests {
    use trestle_catalog::{ModelFeature, ModelProperties, ModelRecord};

    use super::*;

    fn catalog() -> ModelCatalog {
        let chat = ModelRecord {
            features: vec![ModelFeature::ToolCall],
            model_properties: ModelProperties {
                mode: Some(CompletionMode::Chat),
                ..ModelProperties::default()
            },
            ..ModelRecord::default()
        };
        let completion = ModelRecord {
            model_properties: ModelProperties {
                mode: Some(CompletionMode::Completion),
                ..ModelProperties::default()
            },
            ..ModelRecord::default()
        };
        let bare = ModelRecord::default();
        ModelCatalog::from_records([
            ("gpt-4o-mini".to_owned(), chat),
            ("text-davinci-003".to_owned(), completion),
            ("bare-model".to_owned(), bare),
        ])
    }

    fn credentials() -> Credentials {
        Credentials {
            endpoint_url: "http://localhost:8080/v1".to_owned(),
            api_key: None,
            mode: None,
            stream_mode_auth: StreamModeAuth::default(),
        }
    }

    #[test]
    fn generation_forces_chat_mode() {
        let effective = resolve_for_generation("text-davinci-003", &credentials(), &catalog()).unwrap();
        assert_eq!(effective.mode, CompletionMode::Chat);
    }

    #[test]
    fn validation_takes_mode_from_record() {
        let effective = resolve_for_validation("text-davinci-003", &credentials(), &catalog()).unwrap();
        assert_eq!(effective.mode, CompletionMode::Completion);
    }

    #[test]
    fn tool_call_capability_injects_function_calling_type() {
        let with_tools = resolve_for_validation("gpt-4o-mini", &credentials(), &catalog()).unwrap();
        assert_eq!(with_tools.function_calling_type, Some(FunctionCallingType::ToolCall));

        let mut creds = credentials();
        creds.mode = Some(CompletionMode::Chat);
        let without = resolve_for_validation("bare-model", &creds, &catalog()).unwrap();
        assert_eq!(without.function_calling_type, None);
    }

    #[test]
    fn missing_mode_is_unsupported() {
        let err = resolve_for_validation("bare-model", &credentials(), &catalog()).unwrap_err();
        assert!(matches!(err, LlmError::UnsupportedMode(_)));
    }

    #[test]
    fn resolution_is_idempotent() {
        let first = resolve_for_generation("gpt-4o-mini", &credentials(), &catalog()).unwrap();
        let second = resolve_for_generation("gpt-4o-mini", &credentials(), &catalog()).unwrap();
        assert_eq!(first.mode, second.mode);
        assert_eq!(first.function_calling_type, second.function_calling_type);
        assert_eq!(first.endpoint_url, second.endpoint_url);
    }

    #[test]
    fn invalid_endpoint_url_fails_validation() {
        let mut creds = credentials();
        creds.endpoint_url = "not a url".to_owned();
        let err = resolve_for_validation("gpt-4o-mini", &creds, &catalog()).unwrap_err();
        assert!(matches!(err, LlmError::CredentialsValidation { .. }));
    }

    #[test]
    fn endpoint_join_normalizes_trailing_slash() {
        let effective = resolve_for_generation("gpt-4o-mini", &credentials(), &catalog()).unwrap();
        assert_eq!(
            effective.endpoint_for("chat/completions"),
            "http://localhost:8080/v1/chat/completions"
        );

        let mut creds = credentials();
        creds.endpoint_url = "http://localhost:8080/v1/".to_owned();
        let effective = resolve_for_generation("gpt-4o-mini", &creds, &catalog()).unwrap();
        assert_eq!(
            effective.endpoint_for("chat/completions"),
            "http://localhost:8080/v1/chat/completions"
        );
    }
}
