//! File system helpers for build and packaging tasks.
//!
//! Copy operations create destination parents as needed; removals are
//! idempotent. Recursive tree walks run on the blocking pool.

use crate::error::{Error, Result};
use std::io;
use std::path::Path;
use tokio::fs;

/// Copies a regular file, creating any parent directories of the
/// destination as necessary.
///
/// Fails if the source is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.is_file() {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} is not a file", from.display()),
        )));
    }
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::copy(from, to).await?;
    Ok(())
}

/// Recursively copies a directory tree, creating destination parents as
/// necessary. Existing destination files are overwritten.
pub async fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    if !from.is_dir() {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} is not a directory", from.display()),
        )));
    }

    let from = from.to_path_buf();
    let to = to.to_path_buf();

    tokio::task::spawn_blocking(move || {
        for entry in walkdir::WalkDir::new(&from) {
            let entry = entry?;
            let rel_path = entry
                .path()
                .strip_prefix(&from)
                .expect("walked path is under its root");
            let dest_path = to.join(rel_path);

            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&dest_path)?;
            } else {
                if let Some(parent) = dest_path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::copy(entry.path(), &dest_path)?;
            }
        }
        Ok(())
    })
    .await
    .map_err(|e| Error::TaskPanicked(e.to_string()))?
}

/// Removes a file or directory tree if present. Absence is not an error.
pub async fn remove_path(path: &Path) -> Result<()> {
    let result = if path.is_dir() {
        fs::remove_dir_all(path).await
    } else {
        fs::remove_file(path).await
    };
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Copies everything matched by the given glob patterns (relative to
/// `root`) into `dest`, preserving paths relative to `root`.
///
/// `dir/**` means the whole tree under `dir`, top-level files included.
/// The `glob` crate's `**` component matches directories only, so tree
/// patterns are expanded by hand rather than globbed. Patterns that match
/// nothing are not an error.
pub async fn copy_globs(root: &Path, patterns: &[String], dest: &Path) -> Result<()> {
    for pattern in patterns {
        if let Some(prefix) = pattern.strip_suffix("/**") {
            let source = root.join(prefix);
            if source.is_dir() {
                copy_dir(&source, &dest.join(prefix)).await?;
                continue;
            }
        }

        let absolute = root.join(pattern);
        let absolute = absolute.to_string_lossy();
        for entry in glob::glob(&absolute)? {
            let path = entry?;
            let rel_path = path
                .strip_prefix(root)
                .expect("glob rooted at project root");
            let target = dest.join(rel_path);
            if path.is_dir() {
                copy_dir(&path, &target).await?;
            } else {
                copy_file(&path, &target).await?;
            }
        }
    }
    Ok(())
}
