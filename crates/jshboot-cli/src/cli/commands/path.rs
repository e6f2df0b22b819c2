//! `jshboot path <gav>` – show where a coordinate lives in the local repository.

use anyhow::Result;
use jshboot_core::config::BootConfig;
use jshboot_core::coordinate::Coordinate;
use jshboot_core::plan::RemoteRepo;
use jshboot_core::repo_path::RemoteLocation;

use super::plan::open_resolver;

pub fn run_path(cfg: &BootConfig, coordinate: &str) -> Result<()> {
    let coordinate = Coordinate::parse(coordinate)?;
    coordinate.validate()?;
    let repo = RemoteRepo::from_name_or_url(&cfg.remote_repo);
    let location = RemoteLocation::new(coordinate.artifact_url(repo.base_url()), repo.base_url());

    let resolver = open_resolver(cfg)?;
    let path = resolver.local_path(&location)?;
    println!("{}", path.display());
    Ok(())
}
