//! CLI for the jshboot dependency bootstrap.

mod commands;

use anyhow::Result;
use clap::{ArgMatches, Args, CommandFactory, FromArgMatches, Parser, Subcommand};
use jshboot_core::config::{self, BootConfig};
use std::ffi::OsString;
use std::path::PathBuf;

use commands::{run_fetch, run_launch, run_path, DependencyArg};

/// Top-level CLI for jshboot.
#[derive(Debug, Parser)]
#[command(name = "jshboot")]
#[command(about = "jshboot: fetch jars into a local Maven repository and run java with them", long_about = None)]
pub struct Cli {
    /// Local repository root (overrides JSHBOOT_JAR_REPO and the config file).
    #[arg(long, global = true, value_name = "DIR")]
    pub local_repo: Option<PathBuf>,

    /// Remote repository for coordinates: `central` or a base URL.
    #[arg(long, global = true, value_name = "NAME|URL")]
    pub remote: Option<String>,

    /// Java launcher used by `run`.
    #[arg(long, global = true, value_name = "PATH")]
    pub java: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Dependency flags. They may be repeated and mixed; the classpath follows
/// the order they appear on the command line.
#[derive(Debug, Clone, Default, Args)]
pub struct DependencyArgs {
    /// Maven artifact `groupId:artifactId:version`.
    #[arg(long, value_name = "GAV")]
    pub maven: Vec<String>,

    /// Artifact downloaded from a direct http(s) URL.
    #[arg(long, value_name = "URL")]
    pub url: Vec<String>,

    /// Local jar or class directory added as is.
    #[arg(long, value_name = "PATH")]
    pub jar: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Resolve dependencies and print the classpath.
    Fetch {
        #[command(flatten)]
        deps: DependencyArgs,
    },

    /// Resolve dependencies, then run `java -cp <classpath> <MAIN> [ARGS]`.
    Run {
        /// Fully qualified main class.
        #[arg(value_name = "MAIN")]
        main_class: String,
        #[command(flatten)]
        deps: DependencyArgs,
        /// Arguments passed to the main class (after `--`).
        #[arg(last = true, value_name = "ARGS")]
        args: Vec<String>,
    },

    /// Print the local path a coordinate maps to, without downloading.
    Path {
        /// `groupId:artifactId:version`.
        coordinate: String,
    },
}

impl Cli {
    /// Parse `args` and also return the dependency flags in command-line order.
    pub fn try_parse_ordered<I, T>(args: I) -> Result<(Cli, Vec<DependencyArg>), clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Cli::command().try_get_matches_from(args)?;
        let cli = Cli::from_arg_matches(&matches)?;
        let deps = match matches.subcommand() {
            Some(("fetch" | "run", sub)) => ordered_dependencies(sub),
            _ => Vec::new(),
        };
        Ok((cli, deps))
    }

    /// Layer CLI flags over the loaded configuration.
    pub fn apply_to(&self, mut cfg: BootConfig) -> BootConfig {
        if let Some(dir) = &self.local_repo {
            cfg.local_repo = Some(dir.clone());
        }
        if let Some(remote) = &self.remote {
            cfg.remote_repo = remote.clone();
        }
        if let Some(java) = &self.java {
            cfg.java = java.clone();
        }
        cfg
    }
}

/// Merge `--maven`, `--url` and `--jar` values by their argument index.
fn ordered_dependencies(matches: &ArgMatches) -> Vec<DependencyArg> {
    let mut indexed: Vec<(usize, DependencyArg)> = Vec::new();
    let kinds: [(&str, fn(String) -> DependencyArg); 3] = [
        ("maven", DependencyArg::Maven),
        ("url", DependencyArg::Url),
        ("jar", DependencyArg::Jar),
    ];
    for (id, make) in kinds {
        let (Some(indices), Some(values)) =
            (matches.indices_of(id), matches.get_many::<String>(id))
        else {
            continue;
        };
        indexed.extend(indices.zip(values.cloned().map(make)));
    }
    indexed.sort_by_key(|(idx, _)| *idx);
    indexed.into_iter().map(|(_, dep)| dep).collect()
}

impl CliCommand {
    /// Returns the process exit code.
    pub fn run_from_args() -> Result<i32> {
        let (cli, deps) = Cli::try_parse_ordered(std::env::args_os()).unwrap_or_else(|e| e.exit());
        let cfg = cli.apply_to(config::load()?);
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch { .. } => {
                run_fetch(&cfg, &deps)?;
                Ok(0)
            }
            CliCommand::Run {
                main_class, args, ..
            } => run_launch(&cfg, &deps, &main_class, args),
            CliCommand::Path { coordinate } => {
                run_path(&cfg, &coordinate)?;
                Ok(0)
            }
        }
    }
}

#[cfg(test)]
mod tests;
