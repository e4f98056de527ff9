//! Generated artifact identities

use std::fmt;
use std::path::PathBuf;

/// One of the four files a run produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Artifact {
    /// Module with one export per icon
    Icons,
    /// Plugin / registration module
    Plugin,
    /// Type declarations
    Types,
    /// Package metadata document
    Metadata,
}

impl Artifact {
    /// All artifacts in write order
    pub const ALL: [Artifact; 4] = [
        Artifact::Icons,
        Artifact::Plugin,
        Artifact::Types,
        Artifact::Metadata,
    ];

    /// Human readable name used in logs and errors
    pub fn display(&self) -> &'static str {
        match self {
            Artifact::Icons => "icons module",
            Artifact::Plugin => "plugin module",
            Artifact::Types => "type declarations",
            Artifact::Metadata => "metadata",
        }
    }

    /// Template file name for the rendered artifacts
    pub fn template_name(&self) -> Option<&'static str> {
        match self {
            Artifact::Icons => Some("icons.js.hbs"),
            Artifact::Plugin => Some("plugin.js.hbs"),
            Artifact::Types => Some("icons.d.ts.hbs"),
            Artifact::Metadata => None,
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}

/// A failed write of a single artifact
#[derive(Debug, Clone)]
pub struct ArtifactFailure {
    pub artifact: Artifact,
    pub path: PathBuf,
    pub message: String,
}

/// Final text of one artifact and where it goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactWrite {
    pub artifact: Artifact,
    pub path: PathBuf,
    pub contents: String,
}

impl ArtifactWrite {
    pub fn new(artifact: Artifact, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            artifact,
            path: path.into(),
            contents: contents.into(),
        }
    }
}
