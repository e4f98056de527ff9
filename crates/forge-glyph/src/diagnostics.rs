//! Error types
//!
//! Every failure in the generator is fatal for the run. Variants carry the
//! stage and the file or artifact involved so the message alone is enough
//! to find the problem.

use crate::artifact::{Artifact, ArtifactFailure};
use std::path::PathBuf;
use thiserror::Error;

/// Result type for forge-glyph operations
pub type GlyphResult<T> = Result<T, GlyphError>;

/// Main error type for forge-glyph
#[derive(Debug, Error)]
pub enum GlyphError {
    /// The icon source directory could not be listed
    #[error("Cannot list icon directory {path}: {source}")]
    SourceDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An icon source file could not be read
    #[error("Cannot read icon source {path}: {source}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source filename cannot be turned into an identifier
    #[error("Icon file {path} has an unusable name `{name}`")]
    InvalidIconName { path: PathBuf, name: String },

    /// Two sources derive the same identifier
    #[error("Identifier `{identifier}` derived from both {first} and {second}")]
    IdentifierCollision {
        identifier: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// The upstream package descriptor is missing or malformed
    #[error("Upstream manifest {path}: {message}")]
    Manifest { path: PathBuf, message: String },

    /// The metadata document does not have the expected shape
    #[error("Metadata error: {0}")]
    Metadata(String),

    /// A template failed to compile or render
    #[error("Template error in {artifact}: {message}")]
    TemplateRender { artifact: Artifact, message: String },

    /// One or more artifacts could not be written
    #[error("{}", describe_write_failure(.failed, .committed))]
    Write {
        failed: Vec<ArtifactFailure>,
        committed: Vec<PathBuf>,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A worker task panicked or was cancelled
    #[error("Task failed: {0}")]
    Task(String),
}

impl GlyphError {
    /// Create a metadata error
    pub fn metadata(message: impl Into<String>) -> Self {
        GlyphError::Metadata(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        GlyphError::Config(message.into())
    }

    /// Create a manifest error
    pub fn manifest(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        GlyphError::Manifest {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a template error for an artifact
    pub fn template(artifact: Artifact, message: impl ToString) -> Self {
        GlyphError::TemplateRender {
            artifact,
            message: message.to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for GlyphError {
    fn from(err: tokio::task::JoinError) -> Self {
        GlyphError::Task(err.to_string())
    }
}

fn describe_write_failure(failed: &[ArtifactFailure], committed: &[PathBuf]) -> String {
    let mut message = String::from("Failed to write");
    for failure in failed {
        message.push_str(&format!(
            " {} ({}: {});",
            failure.artifact,
            failure.path.display(),
            failure.message
        ));
    }
    if committed.is_empty() {
        message.push_str(" no artifact was modified");
    } else {
        let done: Vec<String> = committed.iter().map(|p| p.display().to_string()).collect();
        message.push_str(&format!(" already written: {}", done.join(", ")));
    }
    message
}
