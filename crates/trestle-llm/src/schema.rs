//! Customizable model schema
//!
//! Descriptor of a user-configured model's capabilities, built from the
//! catalog record rather than a fixed registry.

use serde::Serialize;
use trestle_catalog::{ModelFeature, ModelProperties, ModelRecord, ParameterRule, PricingInfo};

/// Where a model descriptor came from
const FETCH_FROM_CUSTOMIZABLE: &str = "customizable-model";

/// Descriptor handed back to the host for a configured model
#[derive(Debug, Clone, Serialize)]
pub struct ModelDescriptor {
    /// Model identifier
    pub model: String,
    /// Display label
    pub label: String,
    /// Model type (always "llm")
    pub model_type: &'static str,
    /// Registration source (always "customizable-model")
    pub fetch_from: &'static str,
    /// Capability tags
    pub features: Vec<ModelFeature>,
    /// Model properties
    pub model_properties: ModelProperties,
    /// Tunable parameter rules
    pub parameter_rules: Vec<ParameterRule>,
    /// Pricing, when configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing: Option<PricingInfo>,
}

/// Build a descriptor from a catalog record
pub fn descriptor_from_record(model: &str, record: &ModelRecord) -> ModelDescriptor {
    ModelDescriptor {
        model: model.to_owned(),
        label: record.label.clone().unwrap_or_else(|| model.to_owned()),
        model_type: "llm",
        fetch_from: FETCH_FROM_CUSTOMIZABLE,
        features: record.features.clone(),
        model_properties: record.model_properties.clone(),
        parameter_rules: record.parameter_rules.clone(),
        pricing: record.pricing.clone(),
    }
}
