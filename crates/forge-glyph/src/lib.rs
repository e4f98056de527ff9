//! forge-glyph: Icon component generator for Forge
//!
//! This crate turns a directory of upstream SVG icons into:
//! - an icons module with one tree-shakeable export per icon
//! - a plugin module registering every icon component
//! - type declarations mirroring the module's exports
//! - an updated package metadata document
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐
//! │ icons/*.svg     │    │ package.json     │
//! │ (concurrent IO) │    │ (version gate)   │
//! └────────┬────────┘    └────────┬─────────┘
//!          │                      │
//!          ▼                      │
//!   ┌─────────────┐               │
//!   │   IconSet   │ sorted, unique│
//!   └──────┬──────┘               │
//!          └──────────┬───────────┘
//!                     ▼
//!           ┌───────────────────┐
//!           │ GenerationContext │
//!           └─────────┬─────────┘
//!        ┌────────────┼─────────────┬──────────────┐
//!        ▼            ▼             ▼              ▼
//!   icons.js     plugin.js     icons.d.ts     package.json
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use forge_glyph::{GlyphBuilder, RunOutcome};
//!
//! # async fn run() -> forge_glyph::GlyphResult<()> {
//! match GlyphBuilder::from_config_file("glyph.toml")?.build().await? {
//!     RunOutcome::Skipped { version } => println!("icons {version} up to date"),
//!     RunOutcome::Generated(output) => println!("{} icons", output.icon_count),
//! }
//! # Ok(())
//! # }
//! ```

// Core types
pub mod artifact;
pub mod context;
pub mod diagnostics;

// Pipeline stages
pub mod collect;
pub mod gate;
pub mod ident;
pub mod metadata;
pub mod render;
pub mod transform;
pub mod writer;

// Orchestration
pub mod builder;
pub mod config;
pub mod pipeline;

// Fixtures for tests
pub mod test;

// Re-exports for convenience
pub use artifact::{Artifact, ArtifactFailure, ArtifactWrite};
pub use builder::{BuildOutput, GlyphBuilder};
pub use collect::{Collector, IconRecord, IconSet};
pub use config::GlyphConfig;
pub use context::{GenerationContext, UpstreamManifest};
pub use diagnostics::{GlyphError, GlyphResult};
pub use gate::GateDecision;
pub use ident::{derive_name, pascal_case, IconName};
pub use metadata::{merge_components, merge_metadata, MergeOptions};
pub use pipeline::{Pipeline, RunOutcome};
pub use render::{RenderedSources, Renderer};
pub use transform::sanitize;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
