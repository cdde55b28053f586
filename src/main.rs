//! # spdxify
//!
//! A tool that keeps SPDX license and copyright headers present and current
//! in source files.

use anyhow::Result;
use spdxify::cli::{Cli, run};

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run(cli.run_args)
}
