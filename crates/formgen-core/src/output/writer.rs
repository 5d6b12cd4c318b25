//! Writing generated artifacts to disk

use crate::config::OutputSettings;
use crate::error::WriteError;
use crate::generator::{ArtifactRole, ArtifactSet};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// A file that was (or, in a dry run, would have been) written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub role: ArtifactRole,
    pub path: PathBuf,
    pub bytes: usize,
}

/// Suffix of the sibling file each artifact is staged in before it is moved into place
const STAGING_SUFFIX: &str = ".formgen-tmp";

/// Write every artifact below the configured output directory
///
/// The set is written as a batch: every file is staged next to its target
/// first and only then renamed into place, so a failure leaves none of the
/// new files behind. Existing files are overwritten. In a dry run nothing is
/// created and the returned list describes what would have been written.
pub async fn write_artifacts(
    artifacts: &ArtifactSet,
    settings: &OutputSettings,
) -> Result<Vec<WrittenFile>, WriteError> {
    let planned: Vec<WrittenFile> = artifacts
        .iter()
        .map(|artifact| WrittenFile {
            role: artifact.role,
            path: target_path(&settings.output_dir, &artifact.path),
            bytes: artifact.contents.len(),
        })
        .collect();

    if settings.dry_run {
        return Ok(planned);
    }

    for file in &planned {
        if let Some(parent) = file.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| WriteError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
    }

    let mut staged = Vec::with_capacity(planned.len());
    for (file, artifact) in planned.iter().zip(artifacts.iter()) {
        match stage(&file.path, &artifact.contents).await {
            Ok(staging) => staged.push(staging),
            Err(e) => {
                discard(&staged).await;
                return Err(e);
            }
        }
    }

    let mut created: Vec<&Path> = Vec::new();
    for (i, (file, staging)) in planned.iter().zip(&staged).enumerate() {
        let existed = fs::metadata(&file.path).await.is_ok();
        if let Err(source) = fs::rename(staging, &file.path).await {
            discard(&staged[i..]).await;
            for path in &created {
                let _ = fs::remove_file(path).await;
            }
            return Err(WriteError::WriteFile {
                path: file.path.clone(),
                source,
            });
        }
        if !existed {
            created.push(&file.path);
        }
        info!(role = %file.role, path = %file.path.display(), bytes = file.bytes, "wrote artifact");
    }

    Ok(planned)
}

/// Write `contents` to the staging sibling of `target`
async fn stage(target: &Path, contents: &str) -> Result<PathBuf, WriteError> {
    let target_is_dir = fs::metadata(target)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);
    if target_is_dir {
        return Err(WriteError::WriteFile {
            path: target.to_path_buf(),
            source: std::io::Error::other("a directory already exists at this path"),
        });
    }

    let staging = staging_path(target);
    fs::write(&staging, contents.as_bytes())
        .await
        .map_err(|source| WriteError::WriteFile {
            path: staging.clone(),
            source,
        })?;
    Ok(staging)
}

async fn discard(staged: &[PathBuf]) {
    for path in staged {
        let _ = fs::remove_file(path).await;
    }
}

fn staging_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{}{}", name, STAGING_SUFFIX))
}

fn target_path(output_dir: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .filter(|part| !part.is_empty())
        .fold(output_dir.to_path_buf(), |path, part| path.join(part))
}
