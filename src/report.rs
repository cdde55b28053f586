//! # Report Module
//!
//! This module captures the outcome of header processing per file and can
//! write a machine-readable JSON report of a run.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::plan::PlanAction;

/// Information about a processed file for reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
  /// Path to the file
  #[serde(with = "path_serialization")]
  pub path: PathBuf,
  /// Whether the file had a recognizable header before processing
  pub has_header: bool,
  /// Action taken (or needed, in check mode) on the file
  pub action: FileAction,
  /// Reason the file was skipped, if applicable
  #[serde(skip_serializing_if = "Option::is_none")]
  pub skip_reason: Option<String>,
}

impl FileReport {
  /// True when the file needs (or received) a modification.
  pub fn is_change(&self) -> bool {
    matches!(
      self.action,
      FileAction::Inserted | FileAction::YearUpdated | FileAction::Replaced
    )
  }
}

/// Possible actions taken on a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileAction {
  /// A header was inserted into the file
  Inserted,
  /// The copyright year range was extended
  #[serde(rename = "updated")]
  YearUpdated,
  /// The header was replaced wholesale
  Replaced,
  /// No action was needed (file already had the correct header)
  #[serde(rename = "none")]
  NoActionNeeded,
  /// File was skipped (ignored, binary, symlink, ...)
  Skipped,
}

impl From<PlanAction> for FileAction {
  fn from(action: PlanAction) -> Self {
    match action {
      PlanAction::NoChange => FileAction::NoActionNeeded,
      PlanAction::Insert => FileAction::Inserted,
      PlanAction::UpdateYear => FileAction::YearUpdated,
      PlanAction::ReplaceHeader => FileAction::Replaced,
    }
  }
}

/// Helper module for serializing/deserializing PathBuf
mod path_serialization {
  use std::path::PathBuf;

  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S>(path: &std::path::Path, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&path.to_string_lossy())
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
  where
    D: Deserializer<'de>,
  {
    let s = String::deserialize(deserializer)?;
    Ok(PathBuf::from(s))
  }
}

/// Summary of the processing results
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingSummary {
  /// Total number of files considered
  pub total_files: usize,
  /// Number of files already carrying a correct header
  pub files_ok: usize,
  /// Number of files needing (or given) a fresh header
  pub headers_inserted: usize,
  /// Number of files needing (or given) a year update
  pub years_updated: usize,
  /// Number of files needing (or given) a full header replacement
  pub headers_replaced: usize,
  /// Number of files skipped
  pub files_skipped: usize,
  /// Total processing time
  #[serde(skip_serializing)]
  pub processing_time: Duration,
  /// Processing time in seconds for serialization
  #[serde(rename = "processing_time_seconds")]
  pub processing_time_secs: f64,
}

impl ProcessingSummary {
  /// Builds a summary by tallying the per-file reports.
  pub fn from_reports(reports: &[FileReport], processing_time: Duration) -> Self {
    let mut summary = Self {
      total_files: reports.len(),
      files_ok: 0,
      headers_inserted: 0,
      years_updated: 0,
      headers_replaced: 0,
      files_skipped: 0,
      processing_time,
      processing_time_secs: processing_time.as_secs_f64(),
    };

    for report in reports {
      match report.action {
        FileAction::NoActionNeeded => summary.files_ok += 1,
        FileAction::Inserted => summary.headers_inserted += 1,
        FileAction::YearUpdated => summary.years_updated += 1,
        FileAction::Replaced => summary.headers_replaced += 1,
        FileAction::Skipped => summary.files_skipped += 1,
      }
    }

    summary
  }

  /// Total number of files that need (or received) a change.
  pub fn total_changes(&self) -> usize {
    self.headers_inserted + self.years_updated + self.headers_replaced
  }
}

/// Writes a JSON report of the run to the given path.
pub fn write_json_report(output_path: &Path, reports: &[FileReport], summary: &ProcessingSummary) -> Result<()> {
  let report = serde_json::json!({
    "summary": summary,
    "files": reports,
  });

  let content = serde_json::to_string_pretty(&report).context("Failed to serialize JSON report")?;
  fs::write(output_path, content).with_context(|| format!("Failed to write report to {}", output_path.display()))
}
