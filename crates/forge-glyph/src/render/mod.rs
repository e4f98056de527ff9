//! Source renderers
//!
//! Three handlebars templates (icons module, plugin module, type
//! declarations) are rendered from one [`TemplateData`] value. All three
//! iterate the same `icons` list, so identifier order cannot diverge between
//! the artifacts.
//!
//! Rendering is pure text production; nothing here touches the filesystem
//! except reading template overrides at construction time.

use crate::artifact::Artifact;
use crate::collect::IconRecord;
use crate::context::GenerationContext;
use crate::diagnostics::{GlyphError, GlyphResult};
use handlebars::{handlebars_helper, no_escape, Handlebars};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

const ICONS_TEMPLATE: &str = include_str!("templates/icons.js.hbs");
const PLUGIN_TEMPLATE: &str = include_str!("templates/plugin.js.hbs");
const TYPES_TEMPLATE: &str = include_str!("templates/icons.d.ts.hbs");

handlebars_helper!(js_string: |s: str| escape_js_string(s));

/// Escape text for a single-quoted JavaScript string literal
pub fn escape_js_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    out
}

/// Values exposed to the templates
#[derive(Debug, Serialize)]
pub struct TemplateData<'a> {
    pub version: &'a str,
    pub license: &'a str,
    pub homepage: &'a str,
    pub created: String,
    pub prefix: &'a str,
    pub blank: String,
    pub icons: &'a [IconRecord],
}

impl<'a> TemplateData<'a> {
    pub fn from_context(ctx: &'a GenerationContext) -> Self {
        Self {
            version: &ctx.upstream.version,
            license: &ctx.upstream.license,
            homepage: &ctx.upstream.homepage,
            created: ctx.created(),
            prefix: &ctx.prefix,
            blank: ctx.blank_identifier(),
            icons: ctx.icons.records(),
        }
    }
}

/// Rendered text of the three source artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSources {
    pub icons: String,
    pub plugin: String,
    pub types: String,
}

impl RenderedSources {
    /// Text for one artifact, `None` for metadata
    pub fn get(&self, artifact: Artifact) -> Option<&str> {
        match artifact {
            Artifact::Icons => Some(&self.icons),
            Artifact::Plugin => Some(&self.plugin),
            Artifact::Types => Some(&self.types),
            Artifact::Metadata => None,
        }
    }
}

/// Template registry for the generated sources
pub struct Renderer {
    registry: Handlebars<'static>,
}

impl Renderer {
    /// Create a renderer with the built-in templates
    pub fn new() -> GlyphResult<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(no_escape);
        registry.register_helper("js_string", Box::new(js_string));

        let mut renderer = Self { registry };
        renderer.register(Artifact::Icons, ICONS_TEMPLATE)?;
        renderer.register(Artifact::Plugin, PLUGIN_TEMPLATE)?;
        renderer.register(Artifact::Types, TYPES_TEMPLATE)?;
        Ok(renderer)
    }

    /// Create a renderer, replacing built-in templates with any same-named
    /// `.hbs` file found in `dir`
    pub fn with_overrides(dir: &Path) -> GlyphResult<Self> {
        let mut renderer = Self::new()?;
        for artifact in [Artifact::Icons, Artifact::Plugin, Artifact::Types] {
            let Some(name) = artifact.template_name() else {
                continue;
            };
            let path = dir.join(name);
            if path.is_file() {
                debug!("Using template override {}", path.display());
                let source = std::fs::read_to_string(&path)
                    .map_err(|e| GlyphError::template(artifact, format!("{}: {}", path.display(), e)))?;
                renderer.register(artifact, &source)?;
            }
        }
        Ok(renderer)
    }

    fn register(&mut self, artifact: Artifact, source: &str) -> GlyphResult<()> {
        let name = artifact.display();
        self.registry
            .register_template_string(name, source)
            .map_err(|e| GlyphError::template(artifact, e))
    }

    /// Render one artifact from prepared template data
    pub fn render_artifact(&self, artifact: Artifact, data: &TemplateData<'_>) -> GlyphResult<String> {
        self.registry
            .render(artifact.display(), data)
            .map_err(|e| GlyphError::template(artifact, e))
    }

    /// Render all three sources from the frozen context
    pub fn render(&self, ctx: &GenerationContext) -> GlyphResult<RenderedSources> {
        let data = TemplateData::from_context(ctx);
        Ok(RenderedSources {
            icons: self.render_artifact(Artifact::Icons, &data)?,
            plugin: self.render_artifact(Artifact::Plugin, &data)?,
            types: self.render_artifact(Artifact::Types, &data)?,
        })
    }
}
