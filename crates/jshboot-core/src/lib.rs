pub mod config;
pub mod logging;

pub mod classpath;
pub mod coordinate;
pub mod error;
pub mod fetch;
pub mod launch;
pub mod local_repo;
pub mod plan;
pub mod repo_path;
pub mod resolver;
pub mod storage;

pub use error::{BootError, BootResult};
