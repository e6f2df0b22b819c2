//! Maven coordinates (`groupId:artifactId:version`) and artifact URL layout.
//!
//! Parsing only checks the shape of the string. Field emptiness is checked by
//! [`Coordinate::validate`] so that coordinates built field by field go
//! through the same rules as parsed ones.

use crate::error::{BootError, BootResult, CoordinateField};
use std::fmt;
use std::str::FromStr;

/// A (groupId, artifactId, version) triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl Coordinate {
    /// Build a coordinate from its fields without validating them.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }

    /// Split `g:a:v` into its three parts. Empty parts are kept (and rejected
    /// later by `validate`); any part count other than three is an error.
    pub fn parse(dependency: &str) -> BootResult<Self> {
        let parts: Vec<&str> = dependency.split(':').collect();
        match parts.as_slice() {
            [group_id, artifact_id, version] => Ok(Self::new(*group_id, *artifact_id, *version)),
            _ => Err(BootError::MalformedCoordinate(dependency.to_string())),
        }
    }

    /// Reject empty fields, checked in groupId, artifactId, version order.
    pub fn validate(&self) -> BootResult<()> {
        let checks = [
            (CoordinateField::GroupId, &self.group_id),
            (CoordinateField::ArtifactId, &self.artifact_id),
            (CoordinateField::Version, &self.version),
        ];
        for (field, value) in checks {
            if value.is_empty() {
                return Err(BootError::InvalidCoordinateField {
                    coordinate: self.to_string(),
                    field,
                });
            }
        }
        Ok(())
    }

    /// Remote URL of the artifact's jar under `repo_base`.
    ///
    /// `org.example:widget:1.2.0` under `https://repo/maven2` maps to
    /// `https://repo/maven2/org/example/widget/1.2.0/widget-1.2.0.jar`.
    pub fn artifact_url(&self, repo_base: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}-{}.jar",
            repo_base,
            self.group_id.replace('.', "/"),
            self.artifact_id,
            self.version,
            self.artifact_id,
            self.version
        )
    }
}

impl FromStr for Coordinate {
    type Err = BootError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}
