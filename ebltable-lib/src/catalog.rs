use std::collections::HashMap;

use ebltable_data::{EblCatalog, ModelRecord};

use crate::error::{EblError, Result};
use crate::opt_depth::OptDepth;
use crate::surface::SplineDegrees;

/// A decoded catalog of tabulated EBL models.
///
/// Blobs are written by `ebltable-generate`: a postcard-serialized
/// [`EblCatalog`], zstd-compressed.
pub struct Catalog {
    data: EblCatalog,
    by_name: HashMap<String, usize>,
}

impl Catalog {
    /// Decode a zstd-compressed catalog blob.
    pub fn from_compressed(bytes: &[u8]) -> Result<Self> {
        let mut decoder = ruzstd::decoding::StreamingDecoder::new(bytes)
            .map_err(|e| EblError::Decode(format!("zstd frame: {e:?}")))?;
        let mut decompressed = Vec::new();
        std::io::Read::read_to_end(&mut decoder, &mut decompressed)
            .map_err(|e| EblError::Decode(format!("zstd stream: {e}")))?;
        Self::from_postcard(&decompressed)
    }

    /// Decode an uncompressed postcard catalog.
    pub fn from_postcard(bytes: &[u8]) -> Result<Self> {
        let data: EblCatalog =
            postcard::from_bytes(bytes).map_err(|e| EblError::Decode(e.to_string()))?;
        Ok(Self::from_catalog(data))
    }

    pub fn from_catalog(data: EblCatalog) -> Self {
        let by_name = data
            .models
            .iter()
            .enumerate()
            .map(|(i, m)| (m.name.to_lowercase(), i))
            .collect();
        tracing::debug!(models = data.models.len(), "loaded EBL catalog");
        Self { data, by_name }
    }

    /// Access the raw catalog.
    pub fn raw(&self) -> &EblCatalog {
        &self.data
    }

    pub fn model_names(&self) -> Vec<&str> {
        self.data.models.iter().map(|m| m.name.as_str()).collect()
    }

    /// Look up a model record by name (case-insensitive).
    pub fn record(&self, name: &str) -> Result<&ModelRecord> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&i| &self.data.models[i])
            .ok_or_else(|| EblError::UnsupportedModel(name.to_string()))
    }

    /// Build the optical depth model for `name` with the default degrees.
    pub fn model(&self, name: &str) -> Result<OptDepth> {
        self.model_with_degrees(name, SplineDegrees::default())
    }

    pub fn model_with_degrees(&self, name: &str, degrees: SplineDegrees) -> Result<OptDepth> {
        OptDepth::from_table_with_degrees(&self.record(name)?.table, degrees)
    }
}
