//! Single-stream HTTP GET into the local repository.
//!
//! Uses the curl crate (libcurl). Follows redirects, enforces connect and read
//! timeouts, and only accepts a final `200 OK`. The body goes to a `.part`
//! file that is renamed onto the destination once the transfer completed.

use crate::error::{BootError, BootResult, FetchFailure};
use crate::storage::{PartFile, BUF_SIZE};
use std::cell::Cell;
use std::path::Path;
use std::str;
use std::time::Duration;

/// Maximum number of redirects followed for one GET.
const MAX_REDIRECTIONS: u32 = 10;

/// Network settings for the fetcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Zero leaves the connect phase to libcurl's built-in limit.
    pub connect_timeout: Duration,
    /// Longest time the transfer may go without receiving any byte. Zero disables it.
    pub read_timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_millis(5000),
            read_timeout: Duration::from_millis(5000),
        }
    }
}

/// Downloads artifacts. Holds no connection state between calls.
#[derive(Debug, Clone)]
pub struct Fetcher {
    options: FetchOptions,
}

impl Fetcher {
    pub fn new(options: FetchOptions) -> Self {
        Self { options }
    }

    /// GET `url` and store the body at `destination`. Returns the bytes written.
    pub fn fetch(&self, url: &str, destination: &Path) -> BootResult<u64> {
        let failed = |cause| BootError::DownloadFailed {
            url: url.to_string(),
            cause,
        };

        if let Some(parent) = destination.parent() {
            std::fs::create_dir_all(parent).map_err(|e| failed(FetchFailure::Storage(e)))?;
        }

        let written = self.transfer(url, destination).map_err(failed)?;
        tracing::debug!(url, bytes = written, "download complete");
        Ok(written)
    }

    fn transfer(&self, url: &str, destination: &Path) -> Result<u64, FetchFailure> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url).map_err(FetchFailure::Transport)?;
        easy.get(true).map_err(FetchFailure::Transport)?;
        easy.follow_location(true).map_err(FetchFailure::Transport)?;
        easy.max_redirections(MAX_REDIRECTIONS)
            .map_err(FetchFailure::Transport)?;
        easy.buffer_size(BUF_SIZE).map_err(FetchFailure::Transport)?;
        if !self.options.connect_timeout.is_zero() {
            easy.connect_timeout(self.options.connect_timeout)
                .map_err(FetchFailure::Transport)?;
        }
        // libcurl has no per-read timeout; abort when under 1 byte/s for the read window.
        if let Some(window) = low_speed_window(self.options.read_timeout) {
            easy.low_speed_limit(1).map_err(FetchFailure::Transport)?;
            easy.low_speed_time(window).map_err(FetchFailure::Transport)?;
        }

        // Status of the latest response header block (redirect hops overwrite it).
        let status: Cell<Option<u32>> = Cell::new(None);
        let mut part: Option<PartFile> = None;
        let mut storage_error: Option<std::io::Error> = None;

        let performed = {
            let mut transfer = easy.transfer();
            transfer
                .header_function(|line| {
                    if let Some(code) = parse_status_line(line) {
                        status.set(Some(code));
                    }
                    true
                })
                .map_err(FetchFailure::Transport)?;
            transfer
                .write_function(|data| {
                    if status.get() != Some(200) {
                        return Ok(0);
                    }
                    if part.is_none() {
                        match PartFile::create_for(destination) {
                            Ok(p) => part = Some(p),
                            Err(e) => {
                                storage_error = Some(e);
                                return Ok(0);
                            }
                        }
                    }
                    let Some(p) = part.as_mut() else {
                        return Ok(0);
                    };
                    match p.write_chunk(data) {
                        Ok(()) => Ok(data.len()),
                        Err(e) => {
                            tracing::warn!("download write failed: {}", e);
                            storage_error = Some(e);
                            Ok(0) // abort transfer
                        }
                    }
                })
                .map_err(FetchFailure::Transport)?;
            transfer.perform()
        };

        if let Some(e) = storage_error {
            return Err(FetchFailure::Storage(e));
        }
        let code = match performed {
            Ok(()) => easy.response_code().map_err(FetchFailure::Transport)?,
            Err(e) => match status.get() {
                Some(code) if code != 200 => return Err(FetchFailure::Http(code)),
                _ => return Err(FetchFailure::Transport(e)),
            },
        };
        if code != 200 {
            return Err(FetchFailure::Http(code));
        }

        // A 200 with an empty body never reached the write callback.
        let part = match part {
            Some(p) => p,
            None => PartFile::create_for(destination).map_err(FetchFailure::Storage)?,
        };
        let written = part.written();
        part.finalize(destination).map_err(FetchFailure::Storage)?;
        Ok(written)
    }
}

/// libcurl counts the low-speed window in whole seconds; round up.
/// A zero read timeout means no window at all.
fn low_speed_window(read_timeout: Duration) -> Option<Duration> {
    if read_timeout.is_zero() {
        return None;
    }
    let secs = read_timeout.as_millis().div_ceil(1000);
    Some(Duration::from_secs(secs as u64))
}

/// Status code from an `HTTP/x.y NNN reason` header line, if this is one.
fn parse_status_line(line: &[u8]) -> Option<u32> {
    let line = str::from_utf8(line).ok()?;
    let rest = line.strip_prefix("HTTP/")?;
    let mut parts = rest.split_whitespace();
    let _version = parts.next()?;
    parts.next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_variants() {
        assert_eq!(parse_status_line(b"HTTP/1.1 200 OK\r\n"), Some(200));
        assert_eq!(parse_status_line(b"HTTP/2 404\r\n"), Some(404));
        assert_eq!(parse_status_line(b"HTTP/1.0 302 Found\r\n"), Some(302));
        assert_eq!(parse_status_line(b"Content-Length: 12\r\n"), None);
        assert_eq!(parse_status_line(b"\r\n"), None);
    }

    #[test]
    fn low_speed_window_rounds_up() {
        assert_eq!(
            low_speed_window(Duration::from_millis(5000)),
            Some(Duration::from_secs(5))
        );
        assert_eq!(
            low_speed_window(Duration::from_millis(1500)),
            Some(Duration::from_secs(2))
        );
        assert_eq!(
            low_speed_window(Duration::from_millis(1)),
            Some(Duration::from_secs(1))
        );
    }

    #[test]
    fn zero_read_timeout_disables_window() {
        assert_eq!(low_speed_window(Duration::ZERO), None);
    }

    #[test]
    fn default_timeouts_are_five_seconds() {
        let opts = FetchOptions::default();
        assert_eq!(opts.connect_timeout, Duration::from_secs(5));
        assert_eq!(opts.read_timeout, Duration::from_secs(5));
    }

    #[test]
    fn unreachable_host_is_download_failed() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("x/y.jar");
        let fetcher = Fetcher::new(FetchOptions {
            connect_timeout: Duration::from_millis(500),
            read_timeout: Duration::from_millis(500),
        });
        let err = fetcher
            .fetch(&format!("http://127.0.0.1:{port}/y.jar"), &dest)
            .unwrap_err();
        assert!(matches!(
            err,
            BootError::DownloadFailed {
                cause: FetchFailure::Transport(_),
                ..
            }
        ));
        assert!(!dest.exists());
    }
}
