//! Per-model configuration records

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Completion API flavor a model speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionMode {
    /// Conversational `chat/completions` endpoint
    Chat,
    /// Legacy prompt-based `completions` endpoint
    Completion,
}

impl CompletionMode {
    /// Path segment appended to the endpoint base URL
    pub const fn endpoint_path(self) -> &'static str {
        match self {
            Self::Chat => "chat/completions",
            Self::Completion => "completions",
        }
    }

    /// Expected `object` discriminator in a response body
    pub const fn object_discriminator(self) -> &'static str {
        match self {
            Self::Chat => "chat.completion",
            Self::Completion => "text_completion",
        }
    }
}

/// Capability tag a model advertises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelFeature {
    /// Single tool call per turn
    ToolCall,
    /// Multiple tool calls per turn
    MultiToolCall,
    /// Tool calls during streaming
    StreamToolCall,
    /// Image input
    Vision,
    /// Document input
    Document,
    /// Audio input
    Audio,
    /// Video input
    Video,
    /// Exposes intermediate agent thoughts
    AgentThought,
    /// Schema-constrained output
    StructuredOutput,
}

/// Well-known model properties plus provider-specific extras
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelProperties {
    /// Completion mode the model is served under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<CompletionMode>,
    /// Context window size in tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_size: Option<u32>,
    /// Any further properties, passed through verbatim
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

/// Declarative rule describing one tunable model parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterRule {
    /// Parameter name as sent on the wire
    pub name: String,
    /// Value type (e.g. "float", "int", "string", "boolean")
    #[serde(rename = "type")]
    pub rule_type: String,
    /// Display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Whether the parameter must be supplied
    #[serde(default)]
    pub required: bool,
    /// Default value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    /// Minimum allowed value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Maximum allowed value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Allowed values for enumerated parameters
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Help text shown to the operator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

/// Token pricing for a model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingInfo {
    /// Price per unit of input tokens (decimal string)
    #[serde(default)]
    pub input: String,
    /// Price per unit of output tokens (decimal string)
    #[serde(default)]
    pub output: String,
    /// Token unit the prices refer to (e.g. "0.000001")
    #[serde(default)]
    pub unit: String,
    /// ISO currency code
    #[serde(default)]
    pub currency: String,
}

/// Configuration record for a single model
///
/// Every collection field defaults to empty; a record that omits
/// optional fields never fails an accessor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelRecord {
    /// Display label (falls back to the model id)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Capability tags
    #[serde(default)]
    pub features: Vec<ModelFeature>,
    /// Model properties (mode, context size, extras)
    #[serde(default)]
    pub model_properties: ModelProperties,
    /// Tunable parameter rules
    #[serde(default)]
    pub parameter_rules: Vec<ParameterRule>,
    /// Pricing information
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<PricingInfo>,
}

impl ModelRecord {
    /// Whether the model advertises any tool-calling capability
    pub fn supports_tool_calls(&self) -> bool {
        self.features
            .iter()
            .any(|f| matches!(f, ModelFeature::ToolCall | ModelFeature::MultiToolCall))
    }
}
