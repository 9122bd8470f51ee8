//! Zip extraction with top-level directory flattening.
//!
//! Release archives wrap their content in a single top-level directory;
//! extraction re-roots that directory into the target so the tool's files
//! land directly under it.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::io;
use std::path::{Path, PathBuf};

/// Extracts `archive` into `target_dir`, stripping the single top-level
/// directory from every entry path.
///
/// Entries are streamed in fixed-size chunks, so memory use is bounded
/// regardless of archive size. On success the archive file itself is
/// deleted; failing to delete it is an error because the leftover file
/// signals a partially-completed extraction.
pub async fn extract_flattened(archive: &Path, target_dir: &Path) -> Result<()> {
    let archive = archive.to_path_buf();
    let target_dir = target_dir.to_path_buf();

    tokio::task::spawn_blocking(move || extract_blocking(&archive, &target_dir))
        .await
        .map_err(|e| Error::GenericError(format!("extraction task panicked: {e}")))?
}

fn extract_blocking(archive: &Path, target_dir: &Path) -> Result<()> {
    let file = std::fs::File::open(archive).fs_context("opening archive", archive)?;
    let mut zip = zip::ZipArchive::new(file).map_err(|source| Error::Archive {
        path: archive.to_path_buf(),
        source,
    })?;

    for index in 0..zip.len() {
        let mut entry = zip.by_index(index).map_err(|source| Error::Archive {
            path: archive.to_path_buf(),
            source,
        })?;
        if entry.is_dir() {
            continue;
        }
        let Some(entry_path) = entry.enclosed_name() else {
            return Err(Error::GenericError(format!(
                "archive entry {:?} escapes the extraction root",
                entry.name()
            )));
        };
        let Some(flattened) = strip_top_level(&entry_path) else {
            continue;
        };
        let dest = target_dir.join(flattened);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).fs_context("creating directory", parent)?;
        }
        let mut out = std::fs::File::create(&dest).fs_context("creating file", &dest)?;
        io::copy(&mut entry, &mut out).fs_context("extracting entry to", &dest)?;
    }

    std::fs::remove_file(archive).fs_context("removing extracted archive", archive)?;
    Ok(())
}

/// Drops the first path segment; `None` when nothing remains.
fn strip_top_level(path: &Path) -> Option<PathBuf> {
    let mut components = path.components();
    components.next()?;
    let rest = components.as_path();
    if rest.as_os_str().is_empty() {
        None
    } else {
        Some(rest.to_path_buf())
    }
}
