//! Generator configuration
//!
//! Loaded from an optional `glyph.toml`. Every key has a default matching a
//! bootstrap-vue style layout, so an empty file (or no file) is valid.
//!
//! ```toml
//! skip_unchanged = true
//!
//! [source]
//! icons_dir = "node_modules/bootstrap-icons/icons"
//! manifest = "node_modules/bootstrap-icons/package.json"
//!
//! [output]
//! dir = "src/icons"
//!
//! [metadata]
//! file = "src/icons/package.json"
//!
//! [naming]
//! prefix = "BIcon"
//! ```

use crate::diagnostics::{GlyphError, GlyphResult};
use crate::ident::DEFAULT_PREFIX;
use crate::metadata::MergeOptions;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const CONFIG_FILE: &str = "glyph.toml";

/// Environment variable pinning the generation timestamp
pub const SOURCE_DATE_EPOCH: &str = "SOURCE_DATE_EPOCH";

/// Top level configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlyphConfig {
    /// Skip the run when the recorded upstream version is current
    pub skip_unchanged: bool,
    pub source: SourceConfig,
    pub output: OutputConfig,
    pub metadata: MetadataConfig,
    pub naming: NamingConfig,
}

impl Default for GlyphConfig {
    fn default() -> Self {
        Self {
            skip_unchanged: true,
            source: SourceConfig::default(),
            output: OutputConfig::default(),
            metadata: MetadataConfig::default(),
            naming: NamingConfig::default(),
        }
    }
}

/// Upstream icon set location
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    /// Directory holding the `.svg` files
    pub icons_dir: PathBuf,
    /// Upstream `package.json` with version, license and homepage
    pub manifest: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            icons_dir: PathBuf::from("node_modules/bootstrap-icons/icons"),
            manifest: PathBuf::from("node_modules/bootstrap-icons/package.json"),
        }
    }
}

/// Generated source locations
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub icons_file: String,
    pub plugin_file: String,
    pub types_file: String,
    /// Directory with `.hbs` files overriding the built-in templates
    pub templates_dir: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("src/icons"),
            icons_file: "icons.js".to_string(),
            plugin_file: "plugin.js".to_string(),
            types_file: "icons.d.ts".to_string(),
            templates_dir: None,
        }
    }
}

impl OutputConfig {
    pub fn icons_path(&self) -> PathBuf {
        self.dir.join(&self.icons_file)
    }

    pub fn plugin_path(&self) -> PathBuf {
        self.dir.join(&self.plugin_file)
    }

    pub fn types_path(&self) -> PathBuf {
        self.dir.join(&self.types_file)
    }
}

/// Package metadata document settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetadataConfig {
    pub file: PathBuf,
    pub version_key: String,
    pub reference_component: String,
    pub excluded_prop: String,
    pub auto_gen_label: String,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        let merge = MergeOptions::default();
        Self {
            file: PathBuf::from("src/icons/package.json"),
            version_key: merge.version_key,
            reference_component: merge.reference_component,
            excluded_prop: merge.excluded_prop,
            auto_gen_label: merge.auto_gen_label,
        }
    }
}

impl MetadataConfig {
    pub fn merge_options(&self) -> MergeOptions {
        MergeOptions {
            version_key: self.version_key.clone(),
            reference_component: self.reference_component.clone(),
            excluded_prop: self.excluded_prop.clone(),
            auto_gen_label: self.auto_gen_label.clone(),
        }
    }
}

/// Identifier derivation settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamingConfig {
    pub prefix: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl GlyphConfig {
    /// Parse configuration text without resolving paths
    pub fn from_toml(text: &str) -> GlyphResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| GlyphError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file, resolving relative paths against its
    /// directory
    pub fn load(path: &Path) -> GlyphResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| GlyphError::config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_toml(&text).map_err(|e| match e {
            GlyphError::Config(message) => {
                GlyphError::config(format!("{}: {}", path.display(), message))
            }
            other => other,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.resolve(base))
    }

    /// Make every relative path relative to `base`
    pub fn resolve(mut self, base: &Path) -> Self {
        let join = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        join(&mut self.source.icons_dir);
        join(&mut self.source.manifest);
        join(&mut self.output.dir);
        join(&mut self.metadata.file);
        if let Some(dir) = self.output.templates_dir.as_mut() {
            join(dir);
        }
        self
    }

    fn validate(&self) -> GlyphResult<()> {
        if self.naming.prefix.is_empty()
            || !self.naming.prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
            || self.naming.prefix.starts_with(|c: char| c.is_ascii_digit())
        {
            return Err(GlyphError::config(format!(
                "naming.prefix `{}` is not a valid identifier prefix",
                self.naming.prefix
            )));
        }
        for (key, name) in [
            ("output.icons_file", &self.output.icons_file),
            ("output.plugin_file", &self.output.plugin_file),
            ("output.types_file", &self.output.types_file),
        ] {
            if name.is_empty() {
                return Err(GlyphError::config(format!("{} must not be empty", key)));
            }
        }
        if self.metadata.version_key.is_empty() {
            return Err(GlyphError::config("metadata.version_key must not be empty"));
        }
        Ok(())
    }
}

/// Generation timestamp pinned by `SOURCE_DATE_EPOCH`, if set
pub fn source_date_epoch() -> GlyphResult<Option<DateTime<Utc>>> {
    match std::env::var(SOURCE_DATE_EPOCH) {
        Ok(value) => parse_epoch(&value).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_epoch(value: &str) -> GlyphResult<DateTime<Utc>> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .ok_or_else(|| {
            GlyphError::config(format!("{} is not a unix timestamp: {}", SOURCE_DATE_EPOCH, value))
        })
}
