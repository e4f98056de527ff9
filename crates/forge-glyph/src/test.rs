//! Test utilities and fixtures for forge-glyph.
//!
//! Shared by the unit tests and available to downstream crates that want
//! to exercise the generator against a throwaway icon tree.
//!
//! # Example
//!
//! ```
//! use forge_glyph::test::{mock_context, mock_record};
//!
//! let ctx = mock_context(vec![mock_record("BIconAlarm", "<path/>")]);
//! assert_eq!(ctx.icons.len(), 1);
//! ```

use crate::collect::{IconRecord, IconSet};
use crate::context::{GenerationContext, UpstreamManifest};
use crate::ident::{blank_identifier, DEFAULT_PREFIX};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

/// Minimal icon whose sanitized form exercises every transform step
pub const SAMPLE_SVG: &str =
    "<svg viewBox=\"0 0 16 16\">\n  <path stroke=\"#000\" d=\"M1 1\"/>\n</svg>\n";

/// Upstream version used by the fixtures
pub const MOCK_VERSION: &str = "1.11.3";

/// Fixed generation time used by the fixtures
pub fn mock_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Upstream manifest with the given version
pub fn mock_manifest(version: &str) -> UpstreamManifest {
    UpstreamManifest {
        version: version.to_string(),
        license: "MIT".to_string(),
        homepage: "https://icons.getbootstrap.com/".to_string(),
    }
}

/// Record with the default prefix stripped for its display name
pub fn mock_record(identifier: &str, content: &str) -> IconRecord {
    let display_name = identifier
        .strip_prefix(DEFAULT_PREFIX)
        .unwrap_or(identifier)
        .to_string();
    IconRecord {
        identifier: identifier.to_string(),
        source: PathBuf::from(format!("icons/{}.svg", display_name.to_lowercase())),
        display_name,
        content: content.to_string(),
    }
}

/// Frozen context over the given records.
///
/// # Panics
///
/// Panics if two records share an identifier.
pub fn mock_context(records: Vec<IconRecord>) -> GenerationContext {
    let icons = IconSet::from_records(records, &blank_identifier(DEFAULT_PREFIX))
        .unwrap_or_else(|e| panic!("invalid fixture records: {e}"));
    GenerationContext::new(mock_manifest(MOCK_VERSION), mock_timestamp(), DEFAULT_PREFIX, icons)
}

/// Metadata document shaped like the bootstrap-vue icons `package.json`.
///
/// With `Some(version)` the document also records that version and carries
/// a stale generated entry from it.
pub fn mock_metadata(recorded: Option<&str>) -> Value {
    let mut components = vec![
        json!({
            "component": "BIcon",
            "props": [
                {"prop": "icon", "description": "Name of icon to render"},
                {"prop": "variant", "description": "Color variant"},
                {"prop": "fontScale", "description": "Scale"}
            ]
        }),
        json!({
            "component": "BIconstack",
            "props": []
        }),
    ];
    let mut doc = json!({
        "name": "bootstrap-vue-icons",
        "version": "1.0.0",
        "meta": {
            "title": "Icons"
        }
    });
    if let Some(version) = recorded {
        components.push(json!({
            "component": "BIconGone",
            "auto-gen": format!("bootstrap-icons {}", version),
            "props": []
        }));
    }
    doc["meta"]["components"] = Value::Array(components);
    if let Some(version) = recorded {
        doc["meta"]["bootstrap-icons-version"] = json!(version);
    }
    doc
}

/// Upstream `package.json` text
pub fn mock_manifest_json(version: &str) -> String {
    json!({
        "name": "bootstrap-icons",
        "version": version,
        "license": "MIT",
        "homepage": "https://icons.getbootstrap.com/"
    })
    .to_string()
}

/// Write an icon file into a directory
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_icon(dir: &Path, name: &str, svg: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, svg).unwrap_or_else(|e| panic!("cannot write {}: {e}", path.display()));
    path
}
