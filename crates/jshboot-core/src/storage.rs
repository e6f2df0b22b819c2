//! Temp-file lifecycle for downloads.
//!
//! Bytes are written to a uniquely named `.part` file next to the destination
//! and renamed over it only once the transfer finished. A failed transfer
//! leaves any previously cached file untouched.

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Write buffer size for streamed response bodies.
pub const BUF_SIZE: usize = 8 * 1024;

/// A `.part` file being filled. Dropping it without `finalize` deletes it.
pub struct PartFile {
    writer: BufWriter<tempfile::NamedTempFile>,
    written: u64,
}

impl PartFile {
    /// Create a new temp file in the directory of `final_path`.
    /// The directory must already exist.
    pub fn create_for(final_path: &Path) -> io::Result<Self> {
        let dir = final_path.parent().unwrap_or_else(|| Path::new("."));
        let prefix = final_path
            .file_name()
            .map(|n| format!("{}.", n.to_string_lossy()))
            .unwrap_or_default();
        let file = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(TEMP_SUFFIX)
            .tempfile_in(dir)?;
        Ok(Self {
            writer: BufWriter::with_capacity(BUF_SIZE, file),
            written: 0,
        })
    }

    pub fn write_chunk(&mut self, data: &[u8]) -> io::Result<()> {
        self.writer.write_all(data)?;
        self.written += data.len() as u64;
        Ok(())
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn temp_path(&self) -> &Path {
        self.writer.get_ref().path()
    }

    /// Flush, sync and atomically rename onto `final_path`, replacing any existing file.
    pub fn finalize(self, final_path: &Path) -> io::Result<PathBuf> {
        let file = self.writer.into_inner().map_err(|e| e.into_error())?;
        file.as_file().sync_all()?;
        file.persist(final_path).map_err(|e| e.error)?;
        Ok(final_path.to_path_buf())
    }
}
