//! Declarative model catalog for the trestle adapter
//!
//! Resolves a model identifier to its configuration record (completion
//! mode, capability features, parameter rules, pricing). The catalog is
//! loaded once from TOML and is immutable afterwards; lookup is a pure
//! function of the model id.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod model;
pub mod store;

pub use model::{CompletionMode, ModelFeature, ModelProperties, ModelRecord, ParameterRule, PricingInfo};
pub use store::{CatalogError, ModelCatalog};
