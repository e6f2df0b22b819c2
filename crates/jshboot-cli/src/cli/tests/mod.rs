//! CLI parse tests.

use super::commands::DependencyArg;
use super::{Cli, CliCommand};

pub(super) fn parse_cli(args: &[&str]) -> Cli {
    parse_ordered(args).0
}

pub(super) fn parse(args: &[&str]) -> CliCommand {
    parse_cli(args).command
}

pub(super) fn parse_ordered(args: &[&str]) -> (Cli, Vec<DependencyArg>) {
    Cli::try_parse_ordered(args.iter().copied()).unwrap()
}
