//! Error taxonomy for artifact resolution, caching and download.
//!
//! Every variant is fatal to the bootstrap: callers stop at the first error
//! instead of skipping the failing artifact.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bootstrap operations.
pub type BootResult<T> = Result<T, BootError>;

/// Which coordinate field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateField {
    GroupId,
    ArtifactId,
    Version,
}

impl fmt::Display for CoordinateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CoordinateField::GroupId => "groupId",
            CoordinateField::ArtifactId => "artifactId",
            CoordinateField::Version => "version",
        };
        f.write_str(name)
    }
}

/// Why a download did not complete.
#[derive(Debug)]
pub enum FetchFailure {
    /// Final response status was not 200.
    Http(u32),
    /// Curl reported an error (timeout, connection refused, DNS, ...).
    Transport(curl::Error),
    /// Creating directories or writing the file failed.
    Storage(std::io::Error),
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::Http(code) => write!(f, "HTTP {}", code),
            FetchFailure::Transport(e) => write!(f, "{}", e),
            FetchFailure::Storage(e) => write!(f, "storage: {}", e),
        }
    }
}

impl std::error::Error for FetchFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchFailure::Transport(e) => Some(e),
            FetchFailure::Storage(e) => Some(e),
            FetchFailure::Http(_) => None,
        }
    }
}

/// All errors the resolution pipeline can produce.
#[derive(Error, Debug)]
pub enum BootError {
    #[error("the dependency '{0}' is malformed; it has to be 'groupId:artifactId:version'")]
    MalformedCoordinate(String),

    #[error("the dependency '{coordinate}' is malformed: {field} is empty")]
    InvalidCoordinateField {
        coordinate: String,
        field: CoordinateField,
    },

    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("the URL '{url}' is not inside the repository '{repo}'")]
    ArtifactNotInRepo { url: String, repo: String },

    #[error("the repository directory '{}' does not exist", .0.display())]
    RepoDirectoryMissing(PathBuf),

    #[error("the repository directory '{}' is not a directory", .0.display())]
    RepoDirectoryNotADirectory(PathBuf),

    #[error("'{}' resolves outside the repository '{}'", .path.display(), .root.display())]
    PathEscapesRepo { path: PathBuf, root: PathBuf },

    #[error("GET '{url}' failed: {cause}")]
    DownloadFailed {
        url: String,
        #[source]
        cause: FetchFailure,
    },

    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl BootError {
    /// HTTP status of a failed download, if the server answered at all.
    pub fn http_status(&self) -> Option<u32> {
        match self {
            BootError::DownloadFailed {
                cause: FetchFailure::Http(code),
                ..
            } => Some(*code),
            _ => None,
        }
    }
}
