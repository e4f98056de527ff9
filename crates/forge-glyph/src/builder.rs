//! GlyphBuilder - main API for icon generation
//!
//! Builder pattern front end over [`Pipeline`] for build scripts and the
//! command line driver.

use crate::config::{source_date_epoch, GlyphConfig};
use crate::diagnostics::GlyphResult;
use crate::pipeline::{Pipeline, RunOutcome};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Build output describing a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutput {
    /// Artifacts written, in write order
    pub files: Vec<PathBuf>,
    /// Number of upstream icons (excluding the blank icon)
    pub icon_count: usize,
    /// Upstream version the artifacts were generated from
    pub version: String,
    /// Version recorded before this run, if any
    pub previous_version: Option<String>,
}

impl BuildOutput {
    /// Get all generated files
    pub fn all_files(&self) -> impl Iterator<Item = &PathBuf> {
        self.files.iter()
    }
}

/// Builder for configuring icon generation
///
/// # Example
///
/// ```no_run
/// use forge_glyph::GlyphBuilder;
///
/// # async fn run() -> forge_glyph::GlyphResult<()> {
/// GlyphBuilder::new()
///     .icons_dir("node_modules/bootstrap-icons/icons")
///     .manifest("node_modules/bootstrap-icons/package.json")
///     .output_dir("src/icons")
///     .metadata_file("src/icons/package.json")
///     .build()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct GlyphBuilder {
    /// Underlying configuration
    pub config: GlyphConfig,
    /// Ignore the version gate
    pub force: bool,
    /// Fixed generation time
    pub generated_at: Option<DateTime<Utc>>,
}

impl GlyphBuilder {
    /// Create a builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder from an existing configuration
    pub fn from_config(config: GlyphConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Create a builder from a `glyph.toml` file
    pub fn from_config_file(path: impl AsRef<Path>) -> GlyphResult<Self> {
        Ok(Self::from_config(GlyphConfig::load(path.as_ref())?))
    }

    /// Set the directory holding the SVG sources
    pub fn icons_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.source.icons_dir = path.into();
        self
    }

    /// Set the upstream package descriptor
    pub fn manifest(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.source.manifest = path.into();
        self
    }

    /// Set the output directory for generated sources
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output.dir = path.into();
        self
    }

    /// Set the metadata document to merge into
    pub fn metadata_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.metadata.file = path.into();
        self
    }

    /// Set the directory with template overrides
    pub fn templates_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output.templates_dir = Some(path.into());
        self
    }

    /// Set the component prefix
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.naming.prefix = prefix.into();
        self
    }

    /// Regenerate even if the upstream version is already recorded
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Pin the generation timestamp
    pub fn generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }

    /// Turn the builder into a pipeline.
    ///
    /// Without an explicit timestamp, `SOURCE_DATE_EPOCH` is honoured.
    pub fn pipeline(self) -> GlyphResult<Pipeline> {
        let generated_at = match self.generated_at {
            Some(at) => Some(at),
            None => source_date_epoch()?,
        };
        let mut pipeline = Pipeline::new(self.config).with_force(self.force);
        if let Some(at) = generated_at {
            pipeline = pipeline.with_generated_at(at);
        }
        Ok(pipeline)
    }

    /// Run the generation
    pub async fn build(self) -> GlyphResult<RunOutcome> {
        self.pipeline()?.run().await
    }
}
