//! Build script for forge-glyph
//!
//! The built-in templates are embedded with `include_str!`, so edits to them
//! must trigger a rebuild.

fn main() {
    println!("cargo:rerun-if-changed=src/render/templates/");
    println!("cargo:rerun-if-changed=build.rs");
}
