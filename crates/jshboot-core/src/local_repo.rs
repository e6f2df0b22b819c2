//! Local file-based repository (the download cache).
//!
//! Files live under a single root directory at the same relative path they
//! have below their remote repository base. Presence on disk is the only
//! cache state; there is no index.

use crate::error::{BootError, BootResult};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Path marker of mutable artifacts that are re-fetched on every resolution.
pub const SNAPSHOT_MARKER: &str = "SNAPSHOT";

/// Default root below the user's home directory.
pub const DEFAULT_REPO_SUBDIR: &str = ".m2/repository";

#[derive(Debug, Clone)]
pub struct LocalRepo {
    root: PathBuf,
}

impl LocalRepo {
    /// Use `root` as the repository, creating it if absent.
    ///
    /// A failed `create_dir_all` is only logged; the root is checked again
    /// before every resolution.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let root = std::path::absolute(&root).unwrap_or(root);
        if let Err(e) = fs::create_dir_all(&root) {
            tracing::warn!(root = %root.display(), "could not create local repository: {}", e);
        }
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Fail unless the root exists and is a directory.
    pub fn ensure_usable(&self) -> BootResult<()> {
        match fs::metadata(&self.root) {
            Err(_) => Err(BootError::RepoDirectoryMissing(self.root.clone())),
            Ok(meta) if !meta.is_dir() => {
                Err(BootError::RepoDirectoryNotADirectory(self.root.clone()))
            }
            Ok(_) => Ok(()),
        }
    }

    /// Absolute local path for a repository-relative path.
    ///
    /// The root is canonicalized; the relative part is normalized lexically
    /// (the file usually does not exist yet) and must stay inside the root.
    pub fn resolve_local(&self, relative: &str) -> BootResult<PathBuf> {
        self.ensure_usable()?;
        let root = fs::canonicalize(&self.root)
            .map_err(|_| BootError::RepoDirectoryMissing(self.root.clone()))?;

        let mut resolved = root.clone();
        for component in Path::new(relative).components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                Component::ParentDir => {
                    if !resolved.pop() || !resolved.starts_with(&root) {
                        return Err(escapes(relative, &root));
                    }
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(escapes(relative, &root));
                }
            }
        }
        if resolved == root || !resolved.starts_with(&root) {
            return Err(escapes(relative, &root));
        }
        Ok(resolved)
    }
}

fn escapes(relative: &str, root: &Path) -> BootError {
    BootError::PathEscapesRepo {
        path: PathBuf::from(relative),
        root: root.to_path_buf(),
    }
}

/// Whether `local_path` must be downloaded: true unless the file exists and
/// the path does not contain `SNAPSHOT` anywhere.
pub fn needs_fetch(local_path: &Path) -> bool {
    let snapshot = local_path.to_string_lossy().contains(SNAPSHOT_MARKER);
    snapshot || !local_path.exists()
}
