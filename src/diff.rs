//! # Diff Module
//!
//! Renders diffs between original and updated file content, used to preview
//! header changes in check mode.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use similar::{ChangeTag, TextDiff};

/// Manages diff rendering for header changes.
///
/// If `show_diff` is set, diffs are written to stderr. If `save_diff_path`
/// is set, diffs from all files are appended to that file, producing one
/// consolidated diff for the run.
pub struct DiffManager {
  pub show_diff: bool,
  pub save_diff_path: Option<PathBuf>,
}

impl DiffManager {
  pub fn new(show_diff: bool, save_diff_path: Option<PathBuf>) -> Self {
    Self {
      show_diff,
      save_diff_path,
    }
  }

  /// True when any diff output was requested.
  pub fn is_active(&self) -> bool {
    self.show_diff || self.save_diff_path.is_some()
  }

  /// Truncates a stale diff file from a previous run.
  pub fn init(&self) -> Result<()> {
    if let Some(ref path) = self.save_diff_path
      && path.exists()
    {
      std::fs::remove_file(path).with_context(|| format!("Failed to remove old diff file {}", path.display()))?;
    }
    Ok(())
  }

  /// Displays and/or saves the diff between original and updated content.
  pub fn display_diff(&self, path: &Path, original: &str, updated: &str) -> Result<()> {
    if !self.is_active() {
      return Ok(());
    }

    let diff = TextDiff::from_lines(original, updated);

    let mut diff_content = format!("Diff for {}:\n", path.display());
    for change in diff.iter_all_changes() {
      let sign = match change.tag() {
        ChangeTag::Delete => "-",
        ChangeTag::Insert => "+",
        ChangeTag::Equal => " ",
      };
      diff_content.push_str(&format!("{sign}{change}"));
    }
    diff_content.push('\n');

    if self.show_diff {
      eprint!("{diff_content}");
    }

    if let Some(ref diff_path) = self.save_diff_path {
      let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(diff_path)
        .with_context(|| format!("Failed to open diff file {}", diff_path.display()))?;
      file
        .write_all(diff_content.as_bytes())
        .with_context(|| format!("Failed to write diff to {}", diff_path.display()))?;
    }

    Ok(())
  }
}
