//! Run-wide generation context
//!
//! Holds the upstream package facts, the generation timestamp and the frozen
//! [`IconSet`]. Renderers and the metadata merger only read from it.

use crate::collect::IconSet;
use crate::diagnostics::{GlyphError, GlyphResult};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use std::path::Path;

/// Facts read from the upstream icon package descriptor
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpstreamManifest {
    /// Upstream icon set version
    pub version: String,
    /// License identifier
    pub license: String,
    /// Project homepage URL
    pub homepage: String,
}

impl UpstreamManifest {
    /// Parse a descriptor from JSON text
    pub fn from_json(path: &Path, text: &str) -> GlyphResult<Self> {
        serde_json::from_str(text).map_err(|e| GlyphError::manifest(path, e.to_string()))
    }

    /// Read and parse a descriptor file
    pub async fn load(path: &Path) -> GlyphResult<Self> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GlyphError::manifest(path, e.to_string()))?;
        Self::from_json(path, &text)
    }
}

/// Immutable state shared by the renderers and the metadata merger
#[derive(Debug, Clone)]
pub struct GenerationContext {
    pub upstream: UpstreamManifest,
    pub generated_at: DateTime<Utc>,
    /// Component prefix the icons were derived with
    pub prefix: String,
    pub icons: IconSet,
}

impl GenerationContext {
    pub fn new(
        upstream: UpstreamManifest,
        generated_at: DateTime<Utc>,
        prefix: impl Into<String>,
        icons: IconSet,
    ) -> Self {
        Self {
            upstream,
            generated_at,
            prefix: prefix.into(),
            icons,
        }
    }

    /// Upstream version string
    pub fn version(&self) -> &str {
        &self.upstream.version
    }

    /// Timestamp as written into provenance headers, e.g.
    /// `2024-03-01T12:00:00.000Z`
    pub fn created(&self) -> String {
        self.generated_at
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Identifier of the built-in blank icon
    pub fn blank_identifier(&self) -> String {
        crate::ident::blank_identifier(&self.prefix)
    }
}
