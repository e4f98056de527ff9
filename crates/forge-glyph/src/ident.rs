//! Identifier derivation for icon components
//!
//! Turns an icon filename stem such as `arrow-up-circle` into the exported
//! component name `BIconArrowUpCircle`.

use crate::diagnostics::{GlyphError, GlyphResult};
use std::path::Path;

/// Default namespace prefix for generated components
pub const DEFAULT_PREFIX: &str = "BIcon";

/// Names derived for one icon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconName {
    /// Exported component identifier (prefix + display name)
    pub identifier: String,
    /// Pascal-case name without the prefix
    pub display_name: String,
}

/// Convert a hyphen/underscore separated name to PascalCase.
///
/// Only the first character of each segment is uppercased; the rest is kept
/// as written, so digits and existing capitals survive.
///
/// # Examples
///
/// ```
/// use forge_glyph::ident::pascal_case;
///
/// assert_eq!(pascal_case("arrow-up-circle"), "ArrowUpCircle");
/// assert_eq!(pascal_case("badge-4k"), "Badge4k");
/// assert_eq!(pascal_case("x"), "X");
/// ```
pub fn pascal_case(s: &str) -> String {
    s.split(['-', '_'])
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Whether a stem only uses the characters the deriver understands
pub fn is_valid_stem(stem: &str) -> bool {
    stem.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        && stem.chars().any(|c| c.is_ascii_alphanumeric())
}

/// Derive the component names for a stem.
///
/// Returns `None` when the stem contains characters that cannot appear in a
/// JavaScript identifier, or when the identifier would start with a digit.
pub fn derive_name(stem: &str, prefix: &str) -> Option<IconName> {
    if !is_valid_stem(stem) {
        return None;
    }
    let display_name = pascal_case(stem);
    let identifier = format!("{}{}", prefix, display_name);
    if identifier.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Some(IconName {
        identifier,
        display_name,
    })
}

/// Derive the component names for an icon source path
pub fn derive_from_path(path: &Path, prefix: &str) -> GlyphResult<IconName> {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    derive_name(stem, prefix).ok_or_else(|| GlyphError::InvalidIconName {
        path: path.to_path_buf(),
        name: stem.to_string(),
    })
}

/// Identifier of the always-present empty icon
pub fn blank_identifier(prefix: &str) -> String {
    format!("{}Blank", prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_pascal_case() {
        assert_eq!(pascal_case("arrow-up-circle"), "ArrowUpCircle");
        assert_eq!(pascal_case("x"), "X");
        assert_eq!(pascal_case("1-circle"), "1Circle");
        assert_eq!(pascal_case("file_earmark-text"), "FileEarmarkText");
        assert_eq!(pascal_case("--double--dash"), "DoubleDash");
    }

    #[test]
    fn test_derive_name() {
        let name = derive_name("arrow-up-circle", "Icon").unwrap();
        assert_eq!(name.identifier, "IconArrowUpCircle");
        assert_eq!(name.display_name, "ArrowUpCircle");

        let name = derive_name("x", "Icon").unwrap();
        assert_eq!(name.identifier, "IconX");
    }

    #[test]
    fn test_derive_rejects_unusable_stems() {
        assert!(derive_name("", DEFAULT_PREFIX).is_none());
        assert!(derive_name("-", DEFAULT_PREFIX).is_none());
        assert!(derive_name("arrow up", DEFAULT_PREFIX).is_none());
        assert!(derive_name("caf\u{e9}", DEFAULT_PREFIX).is_none());
        assert!(derive_name("arrow.up", DEFAULT_PREFIX).is_none());
    }

    #[test]
    fn test_derive_rejects_leading_digit() {
        assert!(derive_name("1-circle", "").is_none());
        let name = derive_name("1-circle", DEFAULT_PREFIX).unwrap();
        assert_eq!(name.identifier, "BIcon1Circle");
        assert_eq!(name.display_name, "1Circle");
    }

    #[test]
    fn test_derive_from_path() {
        let name = derive_from_path(Path::new("icons/arrow-up-circle.svg"), DEFAULT_PREFIX).unwrap();
        assert_eq!(name.identifier, "BIconArrowUpCircle");

        let err = derive_from_path(&PathBuf::from("icons/bad name.svg"), DEFAULT_PREFIX).unwrap_err();
        assert!(matches!(err, GlyphError::InvalidIconName { ref name, .. } if name == "bad name"));
    }

    #[test]
    fn test_separators_can_collide() {
        // Distinct stems, same identifier: the collector must reject this
        let a = derive_name("a-b", DEFAULT_PREFIX).unwrap();
        let b = derive_name("a_b", DEFAULT_PREFIX).unwrap();
        assert_eq!(a.identifier, b.identifier);
    }

    #[test]
    fn test_blank_identifier() {
        assert_eq!(blank_identifier("BIcon"), "BIconBlank");
    }
}
