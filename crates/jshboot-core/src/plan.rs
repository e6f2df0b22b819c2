//! Ordered list of dependencies to resolve.
//!
//! `Plan` is a value: every builder call consumes it and returns the updated
//! plan. The "current" repository, groupId and version used by later calls are
//! plain fields, so call order effects are visible in the type.

use crate::coordinate::Coordinate;
use crate::error::BootResult;

/// Maven Central, the default remote repository.
pub const MAVEN_CENTRAL: &str = "https://repo.maven.apache.org/maven2";

/// A remote repository base URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RemoteRepo {
    #[default]
    Central,
    Custom(String),
}

impl RemoteRepo {
    /// `central` (any case) selects Maven Central; anything else is a base URL.
    pub fn from_name_or_url(s: &str) -> Self {
        if s.eq_ignore_ascii_case("central") {
            RemoteRepo::Central
        } else {
            RemoteRepo::Custom(s.to_string())
        }
    }

    pub fn base_url(&self) -> &str {
        match self {
            RemoteRepo::Central => MAVEN_CENTRAL,
            RemoteRepo::Custom(url) => url,
        }
    }
}

/// One entry of a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dependency {
    /// A jar already on disk, added to the classpath as is.
    Jar(String),
    /// A Maven artifact under `repo`.
    Maven {
        coordinate: Coordinate,
        repo: RemoteRepo,
    },
    /// A direct URL, cached under its own origin.
    Url(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    dependencies: Vec<Dependency>,
    repo: RemoteRepo,
    group_id: Option<String>,
    version: Option<String>,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    pub fn jar(mut self, path: impl Into<String>) -> Self {
        self.dependencies.push(Dependency::Jar(path.into()));
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.dependencies.push(Dependency::Url(url.into()));
        self
    }

    /// Select Maven Central for subsequent Maven additions.
    pub fn maven_central(self) -> Self {
        self.remote(RemoteRepo::Central)
    }

    pub fn remote(mut self, repo: RemoteRepo) -> Self {
        self.repo = repo;
        self
    }

    /// Add `groupId:artifactId:version`. Only the shape is checked here.
    pub fn maven(self, dependency: &str) -> BootResult<Self> {
        let coordinate = Coordinate::parse(dependency)?;
        Ok(self.coordinate(coordinate))
    }

    pub fn coordinate(mut self, coordinate: Coordinate) -> Self {
        let repo = self.repo.clone();
        self.dependencies
            .push(Dependency::Maven { coordinate, repo });
        self
    }

    /// groupId for subsequent `artifact_id` calls.
    pub fn group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    /// version for subsequent `artifact_id` calls.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Add an artifact from the current groupId and version. Unset fields stay
    /// empty and are rejected when the plan is resolved.
    pub fn artifact_id(self, artifact_id: impl Into<String>) -> Self {
        let coordinate = Coordinate::new(
            self.group_id.clone().unwrap_or_default(),
            artifact_id,
            self.version.clone().unwrap_or_default(),
        );
        self.coordinate(coordinate)
    }
}
