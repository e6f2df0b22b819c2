//! `jshboot run <MAIN> --maven/--url/--jar ... -- <args...>` – resolve, then launch java.

use anyhow::Result;
use jshboot_core::config::BootConfig;
use jshboot_core::launch::{launch, LaunchSpec};

use super::plan::{build_plan, open_resolver, DependencyArg};

/// Returns the exit code of the launched process.
pub fn run_launch(
    cfg: &BootConfig,
    deps: &[DependencyArg],
    main_class: &str,
    args: Vec<String>,
) -> Result<i32> {
    let plan = build_plan(cfg, deps)?;
    let mut resolver = open_resolver(cfg)?;
    resolver.resolve_plan(&plan)?;

    let classpath = resolver.into_classpath();
    for missing in classpath.missing() {
        tracing::warn!("classpath entry {} does not exist", missing.display());
    }

    let spec = LaunchSpec {
        java: cfg.java.clone(),
        classpath: classpath.join(),
        main_class: main_class.to_string(),
        args,
    };
    Ok(launch(&spec)?)
}
