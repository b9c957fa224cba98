//! Common filesystem utilities
//!
//! Shared filesystem operations used by the installer.

use anyhow::{Context, Result};
use std::path::{Component, Path};

/// Ensure a file's parent directory exists.
///
/// Creates the parent directory (and all ancestors) if it doesn't exist.
///
/// # Example
/// ```ignore
/// ensure_parent_dir(Path::new("QArchive/QArchive.hpp"))?;
/// // QArchive/ now exists
/// ```
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create directory {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Delete whatever sits at `path` and create an empty directory there.
///
/// An existing directory is removed recursively. Anything else with the same
/// name (a stray file, a symlink) is removed as a single entry, so a symlink
/// to a directory never has its target deleted.
pub fn recreate_dir(path: &Path) -> Result<()> {
    match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => std::fs::remove_dir_all(path)
            .with_context(|| format!("cannot remove directory {}", path.display()))?,
        Ok(_) => std::fs::remove_file(path)
            .with_context(|| format!("cannot remove file {}", path.display()))?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(e).with_context(|| format!("cannot inspect {}", path.display()));
        }
    }

    std::fs::create_dir_all(path)
        .with_context(|| format!("cannot create directory {}", path.display()))
}

/// Check if path is safe (no path traversal).
///
/// The path must name something strictly below the directory it is joined
/// to: only plain components and `.`, with at least one plain component.
/// Rejects empty paths, `.`, absolute paths and paths containing "..".
pub fn is_safe_path(path: &Path) -> bool {
    let mut named = false;
    for component in path.components() {
        match component {
            Component::Normal(_) => named = true,
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    named
}
