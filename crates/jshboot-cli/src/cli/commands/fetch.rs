//! `jshboot fetch --maven/--url/--jar ...` – resolve and print the classpath.

use anyhow::Result;
use jshboot_core::config::BootConfig;
use jshboot_core::resolver::Resolution;

use super::plan::{build_plan, open_resolver, DependencyArg};

pub fn run_fetch(cfg: &BootConfig, deps: &[DependencyArg]) -> Result<()> {
    let plan = build_plan(cfg, deps)?;
    let mut resolver = open_resolver(cfg)?;
    let resolutions = resolver.resolve_plan(&plan)?;

    let fetched = resolutions
        .iter()
        .filter(|r| matches!(r, Resolution::Fetched { .. }))
        .count();
    tracing::info!(
        fetched,
        cached = resolutions.len() - fetched,
        "resolution finished"
    );

    println!("{}", resolver.classpath().join());
    Ok(())
}
