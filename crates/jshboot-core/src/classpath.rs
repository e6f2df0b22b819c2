//! Ordered classpath accumulated during resolution.

use std::path::{Path, PathBuf};

/// Platform classpath separator (`java -cp` syntax).
#[cfg(windows)]
pub const SEPARATOR: &str = ";";
#[cfg(not(windows))]
pub const SEPARATOR: &str = ":";

/// Append-only list of local jar paths. Insertion order is kept and
/// duplicates are not removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classpath {
    entries: Vec<PathBuf>,
}

impl Classpath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: impl Into<PathBuf>) {
        self.entries.push(path.into());
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries joined with the platform separator.
    pub fn join(&self) -> String {
        self.entries
            .iter()
            .map(|p| p.to_string_lossy())
            .collect::<Vec<_>>()
            .join(SEPARATOR)
    }

    /// Entries that do not point at an existing file.
    pub fn missing(&self) -> Vec<&Path> {
        self.entries
            .iter()
            .map(PathBuf::as_path)
            .filter(|p| !p.is_file())
            .collect()
    }
}
