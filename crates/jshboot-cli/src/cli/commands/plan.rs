//! Shared plumbing: turn dependency flags into a `Plan` and open a `Resolver`
//! from the configuration.

use anyhow::{Context, Result};
use jshboot_core::config::BootConfig;
use jshboot_core::fetch::Fetcher;
use jshboot_core::local_repo::LocalRepo;
use jshboot_core::plan::{Plan, RemoteRepo};
use jshboot_core::resolver::Resolver;

/// One `--maven`, `--url` or `--jar` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyArg {
    Maven(String),
    Url(String),
    Jar(String),
}

/// Coordinates are checked for shape here; a malformed one aborts before
/// anything is resolved.
pub fn build_plan(cfg: &BootConfig, deps: &[DependencyArg]) -> Result<Plan> {
    let mut plan = Plan::new().remote(RemoteRepo::from_name_or_url(&cfg.remote_repo));
    for dep in deps {
        plan = match dep {
            DependencyArg::Maven(gav) => plan.maven(gav)?,
            DependencyArg::Url(url) => plan.url(url.as_str()),
            DependencyArg::Jar(path) => plan.jar(path.as_str()),
        };
    }
    Ok(plan)
}

pub fn open_resolver(cfg: &BootConfig) -> Result<Resolver> {
    let root = cfg
        .local_repo_root()
        .context("locating the local repository")?;
    tracing::debug!(root = %root.display(), "using local repository");
    Ok(Resolver::new(
        LocalRepo::open(root),
        Fetcher::new(cfg.fetch_options()),
    ))
}
