//! Repository-relative paths of artifact URLs.
//!
//! The local cache mirrors the remote layout: the part of an artifact URL's
//! path below the repository base becomes the file path under the local root.

use crate::error::{BootError, BootResult};

/// An artifact URL together with the repository base it must live under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteLocation {
    pub artifact_url: String,
    pub repo_base_url: String,
}

impl RemoteLocation {
    pub fn new(artifact_url: impl Into<String>, repo_base_url: impl Into<String>) -> Self {
        Self {
            artifact_url: artifact_url.into(),
            repo_base_url: repo_base_url.into(),
        }
    }

    /// Treat a direct URL as living under its own origin (`scheme://host[:port]`).
    pub fn from_direct_url(artifact_url: &str) -> BootResult<Self> {
        let parsed = parse_url(artifact_url)?;
        let base = parsed.origin().ascii_serialization();
        Ok(Self::new(artifact_url, base))
    }

    /// Path of the artifact relative to the repository base.
    pub fn relative_path(&self) -> BootResult<String> {
        relative_path(&self.artifact_url, &self.repo_base_url)
    }
}

fn parse_url(raw: &str) -> BootResult<url::Url> {
    url::Url::parse(raw).map_err(|source| BootError::InvalidUrl {
        url: raw.to_string(),
        source,
    })
}

/// Compute the path of `artifact_url` below `repo_base_url`, without leading `/`.
///
/// Fails with `ArtifactNotInRepo` unless the artifact path is strictly longer
/// than the base path and starts with it. A remainder made only of slashes is
/// rejected the same way.
pub fn relative_path(artifact_url: &str, repo_base_url: &str) -> BootResult<String> {
    let artifact = parse_url(artifact_url)?;
    let base = parse_url(repo_base_url)?;

    let not_in_repo = || BootError::ArtifactNotInRepo {
        url: artifact_url.to_string(),
        repo: repo_base_url.to_string(),
    };

    let mut file = artifact.path();
    if let Some(idx) = file.find('?') {
        file = &file[..idx];
    }
    let base_path = base.path();

    if file.len() <= base_path.len() {
        return Err(not_in_repo());
    }
    let rest = file.strip_prefix(base_path).ok_or_else(not_in_repo)?;
    let rest = rest.trim_start_matches('/');
    if rest.is_empty() {
        return Err(not_in_repo());
    }
    Ok(rest.to_string())
}
