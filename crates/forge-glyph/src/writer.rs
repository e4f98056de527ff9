//! Artifact writing
//!
//! Writes happen in two phases. All artifacts are first staged concurrently
//! into hidden sibling files; only when every staged write succeeded are
//! they renamed over their targets. A staging failure therefore leaves every
//! existing artifact untouched.

use crate::artifact::{ArtifactFailure, ArtifactWrite};
use crate::diagnostics::{GlyphError, GlyphResult};
use std::path::{Path, PathBuf};
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Path of the staging file for a target
pub fn staging_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{}.glyph-tmp", name))
}

async fn stage(write: &ArtifactWrite) -> std::io::Result<PathBuf> {
    if let Some(parent) = write.path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    let staged = staging_path(&write.path);
    tokio::fs::write(&staged, write.contents.as_bytes()).await?;
    Ok(staged)
}

/// Remove staging files left behind by an aborted write
async fn discard(staged: impl IntoIterator<Item = PathBuf>) {
    for path in staged {
        if let Err(e) = tokio::fs::remove_file(&path).await {
            warn!("Could not remove staging file {}: {}", path.display(), e);
        }
    }
}

/// Write all artifacts, returning the committed paths in input order
pub async fn write_all(writes: Vec<ArtifactWrite>) -> GlyphResult<Vec<PathBuf>> {
    let mut tasks = JoinSet::new();
    for (index, write) in writes.iter().cloned().enumerate() {
        tasks.spawn(async move {
            let result = stage(&write).await;
            (index, write, result)
        });
    }

    let mut staged: Vec<Option<PathBuf>> = vec![None; writes.len()];
    let mut failed = Vec::new();
    let mut aborted = None;
    while let Some(joined) = tasks.join_next().await {
        let (index, write, result) = match joined {
            Ok(outcome) => outcome,
            Err(e) => {
                aborted.get_or_insert(e);
                continue;
            }
        };
        match result {
            Ok(path) => staged[index] = Some(path),
            Err(e) => failed.push(ArtifactFailure {
                artifact: write.artifact,
                path: write.path,
                message: e.to_string(),
            }),
        }
    }

    if let Some(e) = aborted {
        discard(staged.into_iter().flatten()).await;
        return Err(e.into());
    }

    if !failed.is_empty() {
        discard(staged.into_iter().flatten()).await;
        failed.sort_by_key(|f| f.artifact);
        return Err(GlyphError::Write {
            failed,
            committed: Vec::new(),
        });
    }

    let mut committed = Vec::with_capacity(writes.len());
    for (write, staged) in writes.into_iter().zip(staged) {
        let Some(staged) = staged else {
            continue;
        };
        match tokio::fs::rename(&staged, &write.path).await {
            Ok(()) => {
                info!("Wrote {} to {}", write.artifact, write.path.display());
                committed.push(write.path);
            }
            Err(e) => {
                discard([staged]).await;
                failed.push(ArtifactFailure {
                    artifact: write.artifact,
                    path: write.path,
                    message: e.to_string(),
                });
            }
        }
    }

    if failed.is_empty() {
        Ok(committed)
    } else {
        Err(GlyphError::Write { failed, committed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::Artifact;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_staging_path() {
        assert_eq!(
            staging_path(Path::new("src/icons/icons.js")),
            PathBuf::from("src/icons/.icons.js.glyph-tmp")
        );
    }

    #[tokio::test]
    async fn test_write_all_creates_files() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("out");
        let writes = vec![
            ArtifactWrite::new(Artifact::Icons, out.join("icons.js"), "icons"),
            ArtifactWrite::new(Artifact::Types, out.join("icons.d.ts"), "types"),
        ];

        let committed = write_all(writes).await.unwrap();
        assert_eq!(committed, vec![out.join("icons.js"), out.join("icons.d.ts")]);
        assert_eq!(fs::read_to_string(out.join("icons.js")).unwrap(), "icons");
        assert_eq!(fs::read_to_string(out.join("icons.d.ts")).unwrap(), "types");
        assert!(!staging_path(&out.join("icons.js")).exists());
    }

    #[tokio::test]
    async fn test_staging_failure_leaves_targets_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let good = temp_dir.path().join("icons.js");
        fs::write(&good, "old").unwrap();
        // A regular file where a directory is needed makes staging fail
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let writes = vec![
            ArtifactWrite::new(Artifact::Icons, &good, "new"),
            ArtifactWrite::new(Artifact::Plugin, blocker.join("plugin.js"), "plugin"),
        ];

        let err = write_all(writes).await.unwrap_err();
        match err {
            GlyphError::Write { failed, committed } => {
                assert_eq!(failed.len(), 1);
                assert_eq!(failed[0].artifact, Artifact::Plugin);
                assert!(committed.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(fs::read_to_string(&good).unwrap(), "old");
        assert!(!staging_path(&good).exists());
    }

    #[tokio::test]
    async fn test_rename_failure_reports_committed() {
        let temp_dir = TempDir::new().unwrap();
        let icons = temp_dir.path().join("icons.js");
        // A directory in the target's place makes the rename fail
        let plugin = temp_dir.path().join("plugin.js");
        fs::create_dir(&plugin).unwrap();
        fs::write(plugin.join("keep"), "").unwrap();

        let writes = vec![
            ArtifactWrite::new(Artifact::Icons, &icons, "icons"),
            ArtifactWrite::new(Artifact::Plugin, &plugin, "plugin"),
        ];

        let err = write_all(writes).await.unwrap_err();
        match err {
            GlyphError::Write { failed, committed } => {
                assert_eq!(committed, vec![icons.clone()]);
                assert_eq!(failed.len(), 1);
                assert_eq!(failed[0].artifact, Artifact::Plugin);
                assert_eq!(failed[0].path, plugin);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(fs::read_to_string(&icons).unwrap(), "icons");
        assert!(plugin.is_dir());
        assert!(!staging_path(&plugin).exists());
    }
}
