//! CLI command handlers, one file per subcommand.

mod fetch;
mod path;
mod plan;
mod run;

pub use fetch::run_fetch;
pub use plan::DependencyArg;
pub use path::run_path;
pub use run::run_launch;
