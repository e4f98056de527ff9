//! SVG source sanitizing
//!
//! The runtime icon component supplies its own `<svg>` wrapper, so only the
//! children of the source's root element are embedded.

use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

lazy_static! {
    /// Opening tag of the root `<svg>` element
    static ref SVG_OPEN: Regex = Regex::new(r"(?i)<svg\b[^>]*>").unwrap();

    /// Closing `</svg>` tag
    static ref SVG_CLOSE: Regex = Regex::new(r"(?i)</svg\s*>").unwrap();

    /// Whitespace between two adjacent tags
    static ref INTER_TAG_SPACE: Regex = Regex::new(r">\s+<").unwrap();
}

/// Stroke value some upstream icons ship with instead of `currentColor`
const BROKEN_STROKE: &str = r##" stroke="#000""##;

/// Replacement for [`BROKEN_STROKE`]
const FIXED_STROKE: &str = r#" stroke="currentColor""#;

/// Extension of icon sources
pub const ICON_EXTENSION: &str = "svg";

/// Whether a directory entry name looks like an icon source
pub fn is_icon_source(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(ICON_EXTENSION)
}

/// Sanitize raw SVG text into embeddable inner markup.
///
/// Steps, in order: strip the root `<svg>` open/close tags, drop whitespace
/// between tags, patch the first broken stroke color, trim.
///
/// # Examples
///
/// ```
/// use forge_glyph::transform::sanitize;
///
/// let raw = r##"<svg viewBox="0 0 16 16"><path stroke="#000" d="M1 1"/></svg>"##;
/// assert_eq!(sanitize(raw), r#"<path stroke="currentColor" d="M1 1"/>"#);
/// ```
pub fn sanitize(raw: &str) -> String {
    let unwrapped = strip_root(raw);
    let compact = INTER_TAG_SPACE.replace_all(&unwrapped, "><");
    compact.replacen(BROKEN_STROKE, FIXED_STROKE, 1).trim().to_string()
}

/// Remove the first `<svg ...>` and the last `</svg>`
fn strip_root(raw: &str) -> String {
    let opened = SVG_OPEN.replace(raw, "");
    match SVG_CLOSE.find_iter(&opened).last() {
        Some(close) => {
            let mut out = String::with_capacity(opened.len());
            out.push_str(&opened[..close.start()]);
            out.push_str(&opened[close.end()..]);
            out
        }
        None => opened.into_owned(),
    }
}
