//! Package metadata merging
//!
//! The icons package descriptor keeps a hand-maintained `meta.components`
//! list. Entries carrying an `auto-gen` tag belong to the generator and are
//! replaced wholesale on every run; everything else is left as found.
//!
//! ```text
//! existing components ──► hand-authored ──┐
//!                     └─► auto-gen (dropped)
//!                                         ├──► merged components
//! icon set ──► fresh auto-gen entries ────┘
//! ```

use crate::context::GenerationContext;
use crate::diagnostics::{GlyphError, GlyphResult};
use serde_json::{json, Map, Value};
use std::path::Path;

/// Key of the object holding components and the version stamp
pub const META_KEY: &str = "meta";

/// Key of the components list inside [`META_KEY`]
pub const COMPONENTS_KEY: &str = "components";

/// Tag marking generator-owned component entries
pub const AUTO_GEN_KEY: &str = "auto-gen";

/// Where and how metadata is merged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOptions {
    /// Key under `meta` recording the upstream version
    pub version_key: String,
    /// Hand-authored component whose props the icons inherit
    pub reference_component: String,
    /// Prop of the reference component not copied to icons
    pub excluded_prop: String,
    /// Label in the `auto-gen` tag, followed by the version
    pub auto_gen_label: String,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            version_key: "bootstrap-icons-version".to_string(),
            reference_component: "BIcon".to_string(),
            excluded_prop: "icon".to_string(),
            auto_gen_label: "bootstrap-icons".to_string(),
        }
    }
}

/// Whether a component entry is owned by the generator
pub fn is_auto_generated(entry: &Value) -> bool {
    match entry.get(AUTO_GEN_KEY) {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(tag)) => !tag.is_empty(),
        Some(_) => true,
    }
}

/// Keep hand-authored entries in their original order, then append the
/// fresh entries. Every previously generated entry is discarded.
pub fn merge_components(existing: &[Value], fresh: Vec<Value>) -> Vec<Value> {
    existing
        .iter()
        .filter(|entry| !is_auto_generated(entry))
        .cloned()
        .chain(fresh)
        .collect()
}

/// Props of the reference component, minus the excluded prop
pub fn reference_props(components: &[Value], options: &MergeOptions) -> GlyphResult<Vec<Value>> {
    let reference = components
        .iter()
        .filter(|entry| !is_auto_generated(entry))
        .find(|entry| {
            entry.get("component").and_then(Value::as_str) == Some(options.reference_component.as_str())
        })
        .ok_or_else(|| {
            GlyphError::metadata(format!(
                "reference component `{}` not found among hand-authored components",
                options.reference_component
            ))
        })?;

    let props = match reference.get("props") {
        None => return Ok(Vec::new()),
        Some(Value::Array(props)) => props,
        Some(_) => {
            return Err(GlyphError::metadata(format!(
                "`props` of `{}` is not a list",
                options.reference_component
            )))
        }
    };

    Ok(props
        .iter()
        .filter(|p| p.get("prop").and_then(Value::as_str) != Some(options.excluded_prop.as_str()))
        .cloned()
        .collect())
}

/// One fresh component entry per icon, in icon order
pub fn icon_entries(ctx: &GenerationContext, props: &[Value], options: &MergeOptions) -> Vec<Value> {
    let tag = format!("{} {}", options.auto_gen_label, ctx.version());
    ctx.icons
        .identifiers()
        .map(|identifier| {
            json!({
                "component": identifier,
                AUTO_GEN_KEY: tag,
                "props": props,
            })
        })
        .collect()
}

/// Version recorded by the previous run, if any
pub fn recorded_version<'a>(document: &'a Value, options: &MergeOptions) -> Option<&'a str> {
    document
        .get(META_KEY)?
        .get(&options.version_key)?
        .as_str()
}

/// Produce the merged document.
///
/// Fields other than `meta.components` and the version stamp are carried
/// over untouched and keep their position.
pub fn merge_metadata(
    document: &Value,
    ctx: &GenerationContext,
    options: &MergeOptions,
) -> GlyphResult<Value> {
    let mut merged = document.clone();
    let root = merged
        .as_object_mut()
        .ok_or_else(|| GlyphError::metadata("document root is not an object"))?;
    let meta = root
        .entry(META_KEY)
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| GlyphError::metadata(format!("`{}` is not an object", META_KEY)))?;

    let existing: &[Value] = match meta.get(COMPONENTS_KEY) {
        Some(Value::Array(components)) => components.as_slice(),
        Some(_) => {
            return Err(GlyphError::metadata(format!(
                "`{}.{}` is not a list",
                META_KEY, COMPONENTS_KEY
            )))
        }
        None => &[],
    };

    let props = reference_props(existing, options)?;
    let fresh = icon_entries(ctx, &props, options);
    let components = merge_components(existing, fresh);

    meta.insert(COMPONENTS_KEY.to_string(), Value::Array(components));
    meta.insert(
        options.version_key.clone(),
        Value::String(ctx.version().to_string()),
    );
    Ok(merged)
}

/// Parse a metadata document
pub fn parse_document(path: &Path, text: &str) -> GlyphResult<Value> {
    serde_json::from_str(text)
        .map_err(|e| GlyphError::metadata(format!("{}: {}", path.display(), e)))
}

/// Serialize with two-space indentation and a trailing newline
pub fn to_json_text(document: &Value) -> GlyphResult<String> {
    let mut text = serde_json::to_string_pretty(document)?;
    text.push('\n');
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{mock_context, mock_metadata, mock_record};
    use pretty_assertions::assert_eq;

    fn context() -> GenerationContext {
        mock_context(vec![
            mock_record("BIconAlarm", "<path/>"),
            mock_record("BIconX", "<path/>"),
        ])
    }

    #[test]
    fn test_is_auto_generated() {
        assert!(is_auto_generated(&json!({"component": "A", "auto-gen": "bootstrap-icons 1.0"})));
        assert!(is_auto_generated(&json!({"component": "A", "auto-gen": true})));
        assert!(!is_auto_generated(&json!({"component": "A"})));
        assert!(!is_auto_generated(&json!({"component": "A", "auto-gen": ""})));
        assert!(!is_auto_generated(&json!({"component": "A", "auto-gen": false})));
        assert!(!is_auto_generated(&json!({"component": "A", "auto-gen": null})));
    }

    #[test]
    fn test_merge_components_partition() {
        let existing = vec![
            json!({"component": "BIcon"}),
            json!({"component": "BIconOld", "auto-gen": "bootstrap-icons 1.0"}),
            json!({"component": "BIconstack"}),
        ];
        let fresh = vec![json!({"component": "BIconNew", "auto-gen": "bootstrap-icons 2.0"})];

        let merged = merge_components(&existing, fresh);
        let names: Vec<_> = merged
            .iter()
            .map(|c| c["component"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["BIcon", "BIconstack", "BIconNew"]);
    }

    #[test]
    fn test_reference_props_excludes_selector() {
        let doc = mock_metadata(None);
        let components = doc["meta"]["components"].as_array().unwrap();
        let props = reference_props(components, &MergeOptions::default()).unwrap();
        let names: Vec<_> = props.iter().map(|p| p["prop"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["variant", "fontScale"]);
    }

    #[test]
    fn test_missing_reference_component() {
        let options = MergeOptions {
            reference_component: "BNope".to_string(),
            ..MergeOptions::default()
        };
        let err = merge_metadata(&mock_metadata(None), &context(), &options).unwrap_err();
        assert!(err.to_string().contains("BNope"));
    }

    #[test]
    fn test_merge_metadata() {
        let merged = merge_metadata(&mock_metadata(None), &context(), &MergeOptions::default()).unwrap();

        assert_eq!(merged["name"], json!("bootstrap-vue-icons"));
        assert_eq!(merged["meta"]["title"], json!("Icons"));
        assert_eq!(merged["meta"]["bootstrap-icons-version"], json!("1.11.3"));

        let components = merged["meta"]["components"].as_array().unwrap();
        let names: Vec<_> = components
            .iter()
            .map(|c| c["component"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["BIcon", "BIconstack", "BIconAlarm", "BIconX"]);

        let alarm = &components[2];
        assert_eq!(alarm["auto-gen"], json!("bootstrap-icons 1.11.3"));
        assert_eq!(
            alarm["props"],
            json!([
                {"prop": "variant", "description": "Color variant"},
                {"prop": "fontScale", "description": "Scale"}
            ])
        );
    }

    #[test]
    fn test_merge_replaces_stale_generated_entries() {
        let doc = mock_metadata(Some("1.0.0"));
        let merged = merge_metadata(&doc, &context(), &MergeOptions::default()).unwrap();
        let components = merged["meta"]["components"].as_array().unwrap();
        assert!(components.iter().all(|c| c["component"] != json!("BIconGone")));
        assert_eq!(
            components.iter().filter(|c| is_auto_generated(c)).count(),
            2
        );
    }

    #[test]
    fn test_hand_authored_entry_survives_name_clash() {
        let mut doc = mock_metadata(None);
        let custom = json!({"component": "BIconAlarm", "props": [], "description": "custom"});
        doc["meta"]["components"]
            .as_array_mut()
            .unwrap()
            .push(custom.clone());

        let merged = merge_metadata(&doc, &context(), &MergeOptions::default()).unwrap();
        let components = merged["meta"]["components"].as_array().unwrap();
        assert!(components.contains(&custom));
        assert_eq!(
            components
                .iter()
                .filter(|c| c["component"] == json!("BIconAlarm"))
                .count(),
            2
        );
    }

    #[test]
    fn test_merge_is_idempotent() {
        let options = MergeOptions::default();
        let once = merge_metadata(&mock_metadata(Some("1.0.0")), &context(), &options).unwrap();
        let twice = merge_metadata(&once, &context(), &options).unwrap();
        assert_eq!(to_json_text(&once).unwrap(), to_json_text(&twice).unwrap());
    }

    #[test]
    fn test_key_order_preserved() {
        let merged = merge_metadata(&mock_metadata(None), &context(), &MergeOptions::default()).unwrap();
        let keys: Vec<_> = merged["meta"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["title", "components", "bootstrap-icons-version"]);

        let entry_keys: Vec<_> = merged["meta"]["components"][2]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(entry_keys, vec!["component", "auto-gen", "props"]);
    }

    #[test]
    fn test_recorded_version() {
        let options = MergeOptions::default();
        assert_eq!(recorded_version(&mock_metadata(Some("1.2.3")), &options), Some("1.2.3"));
        assert_eq!(recorded_version(&mock_metadata(None), &options), None);
        assert_eq!(recorded_version(&json!({}), &options), None);
    }

    #[test]
    fn test_non_object_root() {
        let err = merge_metadata(&json!([]), &context(), &MergeOptions::default()).unwrap_err();
        assert!(matches!(err, GlyphError::Metadata(_)));
    }

    #[test]
    fn test_to_json_text() {
        let text = to_json_text(&json!({"a": [1, 2]})).unwrap();
        assert_eq!(text, "{\n  \"a\": [\n    1,\n    2\n  ]\n}\n");
    }
}
