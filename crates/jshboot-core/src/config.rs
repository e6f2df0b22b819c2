use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetch::FetchOptions;
use crate::local_repo::DEFAULT_REPO_SUBDIR;
use crate::plan::MAVEN_CENTRAL;

pub const ENV_CONNECT_TIMEOUT: &str = "HTTP_CONNECT_TIMEOUT";
pub const ENV_READ_TIMEOUT: &str = "HTTP_READ_TIMEOUT";
pub const ENV_JAR_REPO: &str = "JSHBOOT_JAR_REPO";

/// Global configuration: optional `~/.config/jshboot/config.toml`, then
/// environment overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootConfig {
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: u64,
    /// Read timeout in milliseconds.
    pub read_timeout_ms: u64,
    /// Local repository root. None = `<home>/.m2/repository`.
    pub local_repo: Option<PathBuf>,
    /// Remote repository base for Maven coordinates.
    pub remote_repo: String,
    /// Java launcher used by `run`.
    pub java: String,
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 5000,
            read_timeout_ms: 5000,
            local_repo: None,
            remote_repo: MAVEN_CENTRAL.to_string(),
            java: "java".to_string(),
        }
    }
}

impl BootConfig {
    /// Apply `HTTP_CONNECT_TIMEOUT`, `HTTP_READ_TIMEOUT` and `JSHBOOT_JAR_REPO`
    /// from `lookup`. A timeout that is not an integer is an error.
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_CONNECT_TIMEOUT) {
            self.connect_timeout_ms = parse_millis(ENV_CONNECT_TIMEOUT, &v)?;
        }
        if let Some(v) = lookup(ENV_READ_TIMEOUT) {
            self.read_timeout_ms = parse_millis(ENV_READ_TIMEOUT, &v)?;
        }
        if let Some(v) = lookup(ENV_JAR_REPO) {
            self.local_repo = Some(PathBuf::from(v));
        }
        Ok(self)
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            read_timeout: Duration::from_millis(self.read_timeout_ms),
        }
    }

    /// Configured local repository, or `<home>/.m2/repository`.
    pub fn local_repo_root(&self) -> Result<PathBuf> {
        if let Some(p) = &self.local_repo {
            return Ok(p.clone());
        }
        let home = std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .context("cannot determine the user home directory; set JSHBOOT_JAR_REPO")?;
        Ok(PathBuf::from(home).join(DEFAULT_REPO_SUBDIR))
    }
}

fn parse_millis(name: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse::<u64>()
        .with_context(|| format!("{name} must be a number of milliseconds, got '{value}'"))
}

/// `$XDG_CONFIG_HOME/jshboot/config.toml` if it exists. Without usable XDG
/// directories (no HOME) there is simply no config file.
pub fn config_path() -> Option<PathBuf> {
    match xdg::BaseDirectories::with_prefix("jshboot") {
        Ok(xdg_dirs) => xdg_dirs.find_config_file("config.toml"),
        Err(e) => {
            tracing::debug!("no XDG config directory: {}", e);
            None
        }
    }
}

/// Read a config file. Missing keys take their defaults.
pub fn load_from_path(path: &Path) -> Result<BootConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: BootConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

/// Load the config file if there is one, then apply the process environment.
pub fn load() -> Result<BootConfig> {
    load_layered(config_path().as_deref(), |name| std::env::var(name).ok())
}

/// Defaults, then the file at `path` (if any), then `lookup`.
pub fn load_layered<F>(path: Option<&Path>, lookup: F) -> Result<BootConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let cfg = match path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            load_from_path(path)?
        }
        None => BootConfig::default(),
    };
    cfg.apply_env(lookup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn default_config_values() {
        let cfg = BootConfig::default();
        assert_eq!(cfg.connect_timeout_ms, 5000);
        assert_eq!(cfg.read_timeout_ms, 5000);
        assert!(cfg.local_repo.is_none());
        assert_eq!(cfg.remote_repo, "https://repo.maven.apache.org/maven2");
        assert_eq!(cfg.java, "java");
    }

    #[test]
    fn env_overrides_timeouts_and_repo() {
        let cfg = BootConfig::default()
            .apply_env(env(&[
                ("HTTP_CONNECT_TIMEOUT", "1200"),
                ("HTTP_READ_TIMEOUT", "30000"),
                ("JSHBOOT_JAR_REPO", "/tmp/jars"),
            ]))
            .unwrap();
        assert_eq!(cfg.connect_timeout_ms, 1200);
        assert_eq!(cfg.read_timeout_ms, 30000);
        assert_eq!(cfg.local_repo_root().unwrap(), PathBuf::from("/tmp/jars"));
        let opts = cfg.fetch_options();
        assert_eq!(opts.connect_timeout, Duration::from_millis(1200));
        assert_eq!(opts.read_timeout, Duration::from_secs(30));
    }

    #[test]
    fn env_absent_keeps_defaults() {
        let cfg = BootConfig::default().apply_env(env(&[])).unwrap();
        assert_eq!(cfg, BootConfig::default());
    }

    #[test]
    fn env_bad_timeout_is_error() {
        let err = BootConfig::default()
            .apply_env(env(&[("HTTP_READ_TIMEOUT", "5s")]))
            .unwrap_err();
        assert!(format!("{err:#}").contains("HTTP_READ_TIMEOUT"));
    }

    #[test]
    fn config_toml_partial_values() {
        let toml = r#"
            read_timeout_ms = 750
            local_repo = "/srv/m2"
        "#;
        let cfg: BootConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.connect_timeout_ms, 5000);
        assert_eq!(cfg.read_timeout_ms, 750);
        assert_eq!(cfg.local_repo.as_deref(), Some(Path::new("/srv/m2")));
        assert_eq!(cfg.remote_repo, MAVEN_CENTRAL);
    }

    #[test]
    fn env_beats_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "connect_timeout_ms = 100\njava = \"/opt/jdk/bin/java\"\n").unwrap();
        let cfg = load_layered(Some(&path), env(&[("HTTP_CONNECT_TIMEOUT", "200")])).unwrap();
        assert_eq!(cfg.connect_timeout_ms, 200);
        assert_eq!(cfg.java, "/opt/jdk/bin/java");
    }

    #[test]
    fn no_config_file_still_takes_env() {
        let cfg = load_layered(None, env(&[("JSHBOOT_JAR_REPO", "/srv/jars")])).unwrap();
        assert_eq!(cfg.local_repo_root().unwrap(), PathBuf::from("/srv/jars"));
        assert_eq!(cfg.connect_timeout_ms, 5000);
    }

    #[test]
    fn invalid_config_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "connect_timeout_ms = \"soon\"\n").unwrap();
        assert!(load_from_path(&path).is_err());
    }
}
