//! Icon collection
//!
//! Reads every SVG in the source directory concurrently, derives names,
//! sanitizes content and freezes the result into an [`IconSet`] ordered by
//! identifier.

use crate::diagnostics::{GlyphError, GlyphResult};
use crate::ident::{blank_identifier, derive_from_path};
use crate::transform::{is_icon_source, sanitize};
use serde::Serialize;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// A single processed icon
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconRecord {
    /// Exported component identifier, unique within a set
    pub identifier: String,
    /// Identifier without the namespace prefix
    pub display_name: String,
    /// Sanitized inner markup
    pub content: String,
    /// File the record was built from
    #[serde(skip)]
    pub source: PathBuf,
}

impl IconRecord {
    /// Build a record from a source path and its raw text
    pub fn from_source(path: &Path, raw: &str, prefix: &str) -> GlyphResult<Self> {
        let name = derive_from_path(path, prefix)?;
        Ok(Self {
            identifier: name.identifier,
            display_name: name.display_name,
            content: sanitize(raw),
            source: path.to_path_buf(),
        })
    }
}

/// Icons ordered by identifier, free of duplicates.
///
/// This is the only ordering the renderers and the metadata merger see.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconSet {
    records: Vec<IconRecord>,
}

impl IconSet {
    /// Freeze records into a set.
    ///
    /// Fails on the first identifier that is derived twice, or that equals
    /// `reserved` (the built-in blank icon).
    pub fn from_records(
        records: impl IntoIterator<Item = IconRecord>,
        reserved: &str,
    ) -> GlyphResult<Self> {
        let mut by_id: BTreeMap<String, IconRecord> = BTreeMap::new();
        for record in records {
            if record.identifier == reserved {
                return Err(GlyphError::IdentifierCollision {
                    identifier: record.identifier,
                    first: PathBuf::from("<built-in blank icon>"),
                    second: record.source,
                });
            }
            match by_id.entry(record.identifier.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(record);
                }
                Entry::Occupied(existing) => {
                    // Report the pair in path order so the message is stable
                    let (first, second) = if existing.get().source <= record.source {
                        (existing.get().source.clone(), record.source)
                    } else {
                        (record.source, existing.get().source.clone())
                    };
                    return Err(GlyphError::IdentifierCollision {
                        identifier: record.identifier,
                        first,
                        second,
                    });
                }
            }
        }
        Ok(Self {
            records: by_id.into_values().collect(),
        })
    }

    /// Records in identifier order
    pub fn records(&self) -> &[IconRecord] {
        &self.records
    }

    /// Identifiers in order
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.identifier.as_str())
    }

    /// Look up a record by identifier
    pub fn get(&self, identifier: &str) -> Option<&IconRecord> {
        self.records
            .binary_search_by(|r| r.identifier.as_str().cmp(identifier))
            .ok()
            .map(|i| &self.records[i])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Concurrent reader for an icon directory
#[derive(Debug, Clone)]
pub struct Collector {
    source_dir: PathBuf,
    prefix: String,
}

impl Collector {
    /// Create a collector for a directory and component prefix
    pub fn new(source_dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            source_dir: source_dir.into(),
            prefix: prefix.into(),
        }
    }

    /// Source directory
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Read, sanitize and freeze every icon in the directory.
    ///
    /// Non-SVG entries and subdirectories are skipped. Any read failure
    /// aborts the remaining reads.
    pub async fn collect(&self) -> GlyphResult<IconSet> {
        let paths = self.list_sources().await?;
        info!(
            "Reading {} SVGs from {}",
            paths.len(),
            self.source_dir.display()
        );

        let mut tasks = JoinSet::new();
        for path in paths {
            let prefix = self.prefix.clone();
            tasks.spawn(async move {
                let raw = tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|source| GlyphError::SourceRead {
                        path: path.clone(),
                        source,
                    })?;
                IconRecord::from_source(&path, &raw, &prefix)
            });
        }

        let mut records = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            // Returning early drops the set, which aborts the remaining reads
            let record = joined??;
            debug!("Processed {} -> {}", record.source.display(), record.identifier);
            records.push(record);
        }

        let set = IconSet::from_records(records, &blank_identifier(&self.prefix))?;
        info!("Read {} SVGs", set.len());
        Ok(set)
    }

    /// List the icon files in the source directory
    async fn list_sources(&self) -> GlyphResult<Vec<PathBuf>> {
        let dir_error = |source: std::io::Error| GlyphError::SourceDir {
            path: self.source_dir.clone(),
            source,
        };

        let mut entries = tokio::fs::read_dir(&self.source_dir)
            .await
            .map_err(dir_error)?;
        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(dir_error)? {
            let path = entry.path();
            if !is_icon_source(&path) {
                warn!("Skipping non-icon entry {}", path.display());
                continue;
            }
            let metadata = tokio::fs::metadata(&path)
                .await
                .map_err(|source| GlyphError::SourceRead {
                    path: path.clone(),
                    source,
                })?;
            if metadata.is_file() {
                paths.push(path);
            } else {
                warn!("Skipping directory {}", path.display());
            }
        }
        Ok(paths)
    }
}
