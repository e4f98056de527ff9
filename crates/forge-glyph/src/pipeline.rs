//! Pipeline - generation orchestrator
//!
//! Sequences one run:
//! 1. Read the upstream manifest and the existing metadata document
//! 2. Consult the version gate
//! 3. Collect icons concurrently and freeze them
//! 4. Render the three sources and merge the metadata
//! 5. Write all four artifacts
//!
//! Nothing is written unless every earlier step succeeded.

use crate::artifact::{Artifact, ArtifactWrite};
use crate::builder::BuildOutput;
use crate::collect::Collector;
use crate::config::GlyphConfig;
use crate::context::{GenerationContext, UpstreamManifest};
use crate::diagnostics::{GlyphError, GlyphResult};
use crate::gate::{self, GateDecision};
use crate::metadata::{merge_metadata, parse_document, recorded_version, to_json_text};
use crate::render::Renderer;
use crate::writer::write_all;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::info;

/// Result of a run
#[derive(Debug)]
pub enum RunOutcome {
    /// Upstream version already recorded; no file was touched
    Skipped { version: String },
    /// Artifacts regenerated
    Generated(BuildOutput),
}

impl RunOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, RunOutcome::Skipped { .. })
    }
}

/// The generation pipeline
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: GlyphConfig,
    /// Bypass the version gate
    force: bool,
    /// Fixed timestamp; `None` means "now"
    generated_at: Option<DateTime<Utc>>,
}

impl Pipeline {
    /// Create a pipeline for a configuration
    pub fn new(config: GlyphConfig) -> Self {
        Self {
            config,
            force: false,
            generated_at: None,
        }
    }

    /// Regenerate even when the upstream version is unchanged
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Use a fixed generation timestamp
    pub fn with_generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }

    /// Get the configuration
    pub fn config(&self) -> &GlyphConfig {
        &self.config
    }

    /// Run the pipeline
    pub async fn run(&self) -> GlyphResult<RunOutcome> {
        let upstream = UpstreamManifest::load(&self.config.source.manifest).await?;
        let document = self.load_metadata().await?;
        let options = self.config.metadata.merge_options();

        let decision = gate::check(
            &upstream.version,
            recorded_version(&document, &options),
            self.config.skip_unchanged && !self.force,
        );
        let previous_version = match &decision {
            GateDecision::Unchanged { version } => {
                info!("bootstrap-icons version {} already generated, skipping", version);
                return Ok(RunOutcome::Skipped {
                    version: version.clone(),
                });
            }
            GateDecision::Changed { previous, current } => {
                info!(
                    "Upstream version {} -> {}",
                    previous.as_deref().unwrap_or("(none)"),
                    current
                );
                previous.clone()
            }
            GateDecision::Forced { .. } => recorded_version(&document, &options).map(str::to_string),
        };

        info!("Reading SVGs from bootstrap-icons version {}", upstream.version);
        let icons = Collector::new(&self.config.source.icons_dir, &self.config.naming.prefix)
            .collect()
            .await?;

        let ctx = GenerationContext::new(
            upstream,
            self.generated_at.unwrap_or_else(Utc::now),
            &self.config.naming.prefix,
            icons,
        );
        let writes = self.plan(&ctx, &document)?;

        let files = write_all(writes).await?;
        Ok(RunOutcome::Generated(BuildOutput {
            files,
            icon_count: ctx.icons.len(),
            version: ctx.version().to_string(),
            previous_version,
        }))
    }

    /// Render every artifact for a frozen context without touching disk
    pub fn plan(&self, ctx: &GenerationContext, document: &Value) -> GlyphResult<Vec<ArtifactWrite>> {
        let renderer = match &self.config.output.templates_dir {
            Some(dir) => Renderer::with_overrides(dir)?,
            None => Renderer::new()?,
        };
        info!("Creating icon components...");
        let sources = renderer.render(ctx)?;

        info!("Updating icons meta info...");
        let merged = merge_metadata(document, ctx, &self.config.metadata.merge_options())?;
        let output = &self.config.output;

        Ok(vec![
            ArtifactWrite::new(Artifact::Icons, output.icons_path(), sources.icons),
            ArtifactWrite::new(Artifact::Plugin, output.plugin_path(), sources.plugin),
            ArtifactWrite::new(Artifact::Types, output.types_path(), sources.types),
            ArtifactWrite::new(
                Artifact::Metadata,
                &self.config.metadata.file,
                to_json_text(&merged)?,
            ),
        ])
    }

    async fn load_metadata(&self) -> GlyphResult<Value> {
        let path = &self.config.metadata.file;
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GlyphError::metadata(format!("{}: {}", path.display(), e)))?;
        parse_document(path, &text)
    }
}
