//! Catalog loading and model id resolution

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use crate::model::ModelRecord;

/// Errors raised by catalog lookup
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No record matched the model id, even after the substring fallback
    #[error("model not supported: {model}")]
    NotFound {
        /// The model id as supplied by the caller
        model: String,
    },
}

/// Immutable store of model configuration records keyed by model id
#[derive(Debug, Default, Deserialize)]
pub struct ModelCatalog {
    /// Records keyed by model id, in declaration order
    #[serde(default)]
    models: IndexMap<String, ModelRecord>,
}

impl ModelCatalog {
    /// Load the catalog from a TOML file with one `[models.<id>]` table
    /// per model
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read catalog file {}: {e}", path.display()))?;

        let catalog: Self = toml::from_str(&raw).map_err(|e| anyhow::anyhow!("failed to parse catalog: {e}"))?;

        tracing::info!(models = catalog.models.len(), "model catalog loaded");

        Ok(catalog)
    }

    /// Build a catalog from records directly (used by tests and embedders)
    pub fn from_records(records: impl IntoIterator<Item = (String, ModelRecord)>) -> Self {
        Self {
            models: records.into_iter().collect(),
        }
    }

    /// Strip any `provider/` prefix from a model id, keeping the last
    /// `/`-separated segment
    pub fn normalize_id(model: &str) -> &str {
        model.rsplit('/').next().unwrap_or(model)
    }

    /// Resolve a model id to its record
    ///
    /// Tries an exact match on the normalized id first, then falls back
    /// to the first known id containing it as a substring.
    pub fn find(&self, model: &str) -> Result<&ModelRecord, CatalogError> {
        let id = Self::normalize_id(model);

        if let Some(record) = self.models.get(id) {
            return Ok(record);
        }

        self.models
            .iter()
            .find(|(known, _)| known.contains(id))
            .map(|(_, record)| record)
            .ok_or_else(|| CatalogError::NotFound {
                model: model.to_owned(),
            })
    }

    /// Iterate over known model ids in declaration order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }
}
