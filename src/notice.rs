//! # Notice Module
//!
//! Loads an optional notice template file whose lines are appended after the
//! copyright line of every synthesized header.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

/// Reads a notice template into header-ready lines.
///
/// Blank lines are dropped; the synthesizer supplies its own spacer between
/// the copyright line and the notice block. A missing template file is
/// tolerated with a warning so a shared invocation still works in checkouts
/// that lack the file.
pub fn load_notice_template(path: &Path) -> Result<Vec<String>> {
  if !path.exists() {
    warn!("Notice template {} does not exist, skipping", path.display());
    return Ok(Vec::new());
  }

  let content =
    std::fs::read_to_string(path).with_context(|| format!("Failed to read notice template {}", path.display()))?;

  Ok(
    content
      .lines()
      .filter(|line| !line.trim().is_empty())
      .map(|line| line.trim_end().to_string())
      .collect(),
  )
}
