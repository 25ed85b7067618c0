use thiserror::Error;

/// Errors that can occur in the adapter pipeline
#[derive(Debug, Error)]
pub enum LlmError {
    /// No matching model configuration was found
    #[error("model not supported: {model}")]
    ConfigNotFound {
        /// The model id as supplied by the caller
        model: String,
    },

    /// Credential validation failed (transport, status, decode, or
    /// response-shape mismatch)
    #[error("{message}")]
    CredentialsValidation {
        /// Full validation failure message, including the response body
        /// when one was obtained
        message: String,
        /// The underlying failure, when the validation error wraps one
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configured completion mode is neither chat nor completion
    #[error("unsupported completion mode for model configuration: {0}")]
    UnsupportedMode(String),

    /// Remote endpoint returned an error during generation
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Error while decoding a streamed response
    #[error("streaming error: {0}")]
    Streaming(String),

    /// Unexpected internal error
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl LlmError {
    /// Build a validation error carrying only a message
    pub fn credentials_validation(message: impl Into<String>) -> Self {
        Self::CredentialsValidation {
            message: message.into(),
            source: None,
        }
    }

    /// Build a validation error wrapping an underlying failure as its cause
    pub fn credentials_validation_caused_by(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::CredentialsValidation {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl From<trestle_catalog::CatalogError> for LlmError {
    fn from(err: trestle_catalog::CatalogError) -> Self {
        match err {
            trestle_catalog::CatalogError::NotFound { model } => Self::ConfigNotFound { model },
        }
    }
}
