#![allow(dead_code)]

use std::path::Path;
use std::process::{Command, Output};

use assert_cmd::prelude::*;

/// Runs the spdxify binary in the given directory with the given arguments.
pub fn run_spdxify(dir: &Path, args: &[&str]) -> Result<Output, Box<dyn std::error::Error>> {
  let output = Command::cargo_bin("spdxify")?.args(args).current_dir(dir).output()?;
  Ok(output)
}

/// Writes a file under the given directory, creating parent directories as
/// needed.
pub fn write_file(dir: &Path, rel: &str, content: &str) -> std::io::Result<()> {
  let path = dir.join(rel);
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent)?;
  }
  std::fs::write(path, content)
}

/// Reads a file under the given directory.
pub fn read_file(dir: &Path, rel: &str) -> std::io::Result<String> {
  std::fs::read_to_string(dir.join(rel))
}
