//! Resolution session: turns plan entries into local jar paths.
//!
//! For each artifact: validate, build the remote URL, compute the local path,
//! record it on the classpath, then download unless the cache is fresh.
//! The first error stops the whole plan.

use crate::classpath::Classpath;
use crate::coordinate::Coordinate;
use crate::error::BootResult;
use crate::fetch::Fetcher;
use crate::local_repo::{needs_fetch, LocalRepo};
use crate::plan::{Dependency, Plan, RemoteRepo};
use crate::repo_path::RemoteLocation;
use std::path::{Path, PathBuf};

/// How one artifact was satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Already in the local repository; no network access.
    CacheHit(PathBuf),
    /// Downloaded (or re-downloaded, for snapshots) into the local repository.
    Fetched { path: PathBuf, bytes: u64 },
}

impl Resolution {
    pub fn path(&self) -> &Path {
        match self {
            Resolution::CacheHit(p) => p,
            Resolution::Fetched { path, .. } => path,
        }
    }
}

/// Owns the local repository handle, the fetcher and the growing classpath.
pub struct Resolver {
    repo: LocalRepo,
    fetcher: Fetcher,
    classpath: Classpath,
}

impl Resolver {
    pub fn new(repo: LocalRepo, fetcher: Fetcher) -> Self {
        Self {
            repo,
            fetcher,
            classpath: Classpath::new(),
        }
    }

    pub fn classpath(&self) -> &Classpath {
        &self.classpath
    }

    pub fn into_classpath(self) -> Classpath {
        self.classpath
    }

    /// Resolve every entry of `plan` in order, stopping at the first error.
    pub fn resolve_plan(&mut self, plan: &Plan) -> BootResult<Vec<Resolution>> {
        let mut out = Vec::new();
        for dep in plan.dependencies() {
            match dep {
                Dependency::Jar(path) => self.add_jar(path),
                Dependency::Maven { coordinate, repo } => {
                    out.push(self.resolve_coordinate(coordinate, repo)?);
                }
                Dependency::Url(url) => out.push(self.resolve_url(url)?),
            }
        }
        Ok(out)
    }

    /// Put an existing jar on the classpath without touching the repository.
    pub fn add_jar(&mut self, path: &str) {
        tracing::debug!(path, "adding jar");
        self.classpath.push(path);
    }

    pub fn resolve_coordinate(
        &mut self,
        coordinate: &Coordinate,
        repo: &RemoteRepo,
    ) -> BootResult<Resolution> {
        coordinate.validate()?;
        let url = coordinate.artifact_url(repo.base_url());
        tracing::info!(%coordinate, url = %url, "resolving artifact");
        self.resolve_location(&RemoteLocation::new(url, repo.base_url()))
    }

    pub fn resolve_url(&mut self, url: &str) -> BootResult<Resolution> {
        let location = RemoteLocation::from_direct_url(url)?;
        self.resolve_location(&location)
    }

    /// Local path a location maps to. Pure apart from checking the root.
    pub fn local_path(&self, location: &RemoteLocation) -> BootResult<PathBuf> {
        self.repo.ensure_usable()?;
        let relative = location.relative_path()?;
        self.repo.resolve_local(&relative)
    }

    /// Cache lookup and, on a miss, download.
    ///
    /// The local path is recorded on the classpath before the freshness check
    /// and before any download, so a failed download still leaves its entry.
    pub fn resolve_location(&mut self, location: &RemoteLocation) -> BootResult<Resolution> {
        let jar = self.local_path(location)?;
        self.classpath.push(&jar);

        if !needs_fetch(&jar) {
            tracing::info!("{} is already in the repo", jar.display());
            return Ok(Resolution::CacheHit(jar));
        }

        tracing::info!(
            url = %location.artifact_url,
            file = %jar.display(),
            "downloading"
        );
        let bytes = self.fetcher.fetch(&location.artifact_url, &jar)?;
        Ok(Resolution::Fetched { path: jar, bytes })
    }
}
