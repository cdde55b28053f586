//! # Processor Module
//!
//! This module drives header processing across a file tree. It owns the
//! traversal, the per-file pipeline (ignore-check, profile resolution, read,
//! parse, plan, apply), and the collection of per-file reports.
//!
//! Per-file planning is pure and shares no mutable state, so files are
//! processed in parallel with rayon; reports are merged after the parallel
//! stage.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::comment_style::CommentProfile;
use crate::diff::DiffManager;
use crate::header::HeaderRequest;
use crate::ignore::IgnoreMatcher;
use crate::plan::{self, PlanAction};
use crate::report::{FileAction, FileReport};

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  /// Target header state applied to every file.
  pub request: HeaderRequest,
  /// Compiled ignore matcher, consulted with root-relative paths.
  pub matcher: IgnoreMatcher,
  /// Root directory of the scan; relative paths are computed against it.
  pub root: PathBuf,
  /// Check-only mode: report what would change without writing.
  pub check_only: bool,
  /// Recurse into subdirectories when traversing the root.
  pub recursive: bool,
  /// Optional diff rendering.
  pub diff_manager: Option<DiffManager>,
}

/// Processor for applying SPDX headers across files.
///
/// The `Processor` is responsible for:
/// - Scanning the root directory recursively
/// - Filtering files through the ignore matcher
/// - Planning and applying header updates per file
/// - Showing diffs in check mode
/// - Collecting report data about processed files
pub struct Processor {
  request: HeaderRequest,
  matcher: IgnoreMatcher,
  root: PathBuf,
  check_only: bool,
  recursive: bool,
  diff_manager: DiffManager,

  /// Collection of file reports for output and report generation
  pub file_reports: Arc<Mutex<Vec<FileReport>>>,
}

impl Processor {
  /// Creates a new processor with the specified configuration.
  pub fn new(config: ProcessorConfig) -> Self {
    let diff_manager = config.diff_manager.unwrap_or_else(|| DiffManager::new(false, None));

    Self {
      request: config.request,
      matcher: config.matcher,
      root: config.root,
      check_only: config.check_only,
      recursive: config.recursive,
      diff_manager,
      file_reports: Arc::new(Mutex::new(Vec::new())),
    }
  }

  /// Computes the root-relative path used for ignore matching and display.
  fn relative_path(&self, path: &Path) -> String {
    let rel = path.strip_prefix(&self.root).unwrap_or(path);
    let text = rel.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
      text.into_owned()
    } else {
      text.replace(std::path::MAIN_SEPARATOR, "/")
    }
  }

  /// Collects the files to process.
  ///
  /// When `explicit` is non-empty those files are used directly (missing
  /// paths are an error); otherwise the root directory is traversed.
  /// Ignored directories are pruned during traversal and symlinks are never
  /// followed.
  pub fn collect_files(&self, explicit: &[PathBuf]) -> Result<Vec<PathBuf>> {
    if !explicit.is_empty() {
      let mut files = Vec::with_capacity(explicit.len());
      for path in explicit {
        if !path.is_file() {
          anyhow::bail!("File does not exist: {}", path.display());
        }
        files.push(path.clone());
      }
      return Ok(files);
    }

    let max_depth = if self.recursive { usize::MAX } else { 1 };
    let walker = WalkDir::new(&self.root).max_depth(max_depth).into_iter();

    let mut files = Vec::new();
    for entry in walker.filter_entry(|e| {
      if !e.file_type().is_dir() || e.depth() == 0 {
        return true;
      }
      let rel = e
        .path()
        .strip_prefix(&self.root)
        .unwrap_or(e.path())
        .to_string_lossy()
        .replace(std::path::MAIN_SEPARATOR, "/");
      if self.matcher.is_ignored(&rel) {
        trace!("Pruning directory: {rel}");
        false
      } else {
        true
      }
    }) {
      let entry = entry.context("Directory traversal failed")?;
      if entry.file_type().is_symlink() {
        trace!("Skipping symlink: {}", entry.path().display());
        continue;
      }
      if entry.file_type().is_file() {
        files.push(entry.into_path());
      }
    }

    debug!("Collected {} files under {}", files.len(), self.root.display());
    Ok(files)
  }

  /// Processes the given files, planning and optionally applying header
  /// updates.
  ///
  /// Returns `true` if any file needs (check mode) or received (fix mode) a
  /// change. Per-file errors are reported and counted, never fatal to the
  /// run.
  pub fn process(&self, files: Vec<PathBuf>) -> Result<bool> {
    if files.is_empty() {
      debug!("No files to process");
      return Ok(false);
    }

    debug!("Processing {} files with rayon", files.len());

    let results: Vec<(FileReport, bool)> = files
      .into_par_iter()
      .map(|path| match self.process_single_file(&path) {
        Ok(report) => (report, false),
        Err(e) => {
          eprintln!("Error processing {}: {e:#}", path.display());
          (
            FileReport {
              path,
              has_header: false,
              action: FileAction::Skipped,
              skip_reason: Some(format!("Error: {e}")),
            },
            true,
          )
        }
      })
      .collect();

    let mut has_errors = false;
    let mut local_reports = Vec::with_capacity(results.len());
    for (report, errored) in results {
      has_errors |= errored;
      local_reports.push(report);
    }

    let has_changes = local_reports.iter().any(FileReport::is_change);

    let mut reports = self.file_reports.lock().expect("mutex poisoned");
    reports.extend(local_reports);

    Ok(has_changes || has_errors)
  }

  /// Runs the per-file pipeline: ignore-check, resolve, read, plan, apply.
  fn process_single_file(&self, path: &Path) -> Result<FileReport> {
    let rel = self.relative_path(path);

    if self.matcher.is_ignored(&rel) {
      trace!("Skipping: {rel} (ignored)");
      return Ok(FileReport {
        path: path.to_path_buf(),
        has_header: false,
        action: FileAction::Skipped,
        skip_reason: Some("Matched ignore pattern".to_string()),
      });
    }

    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let Ok(content) = String::from_utf8(bytes) else {
      trace!("Skipping: {rel} (not UTF-8)");
      return Ok(FileReport {
        path: path.to_path_buf(),
        has_header: false,
        action: FileAction::Skipped,
        skip_reason: Some("Not valid UTF-8".to_string()),
      });
    };

    if content.is_empty() {
      trace!("Skipping: {rel} (empty)");
      return Ok(FileReport {
        path: path.to_path_buf(),
        has_header: false,
        action: FileAction::Skipped,
        skip_reason: Some("Empty file".to_string()),
      });
    }

    let file_name = path
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_default();
    let profile = CommentProfile::resolve(&file_name);

    let lines: Vec<&str> = content.lines().collect();
    let update = plan::plan_update(&lines, &self.request, &profile);
    let action = FileAction::from(update.action);
    let has_header = !matches!(update.action, PlanAction::Insert);

    if update.is_change() {
      let new_lines = plan::apply_plan(&lines, &update);
      let mut new_content = new_lines.join("\n");
      if content.ends_with('\n') || content.is_empty() {
        new_content.push('\n');
      }

      if self.diff_manager.is_active() {
        self.diff_manager.display_diff(path, &content, &new_content)?;
      }

      if !self.check_only {
        std::fs::write(path, new_content).with_context(|| format!("Failed to write {}", path.display()))?;
      }
    }

    Ok(FileReport {
      path: path.to_path_buf(),
      has_header,
      action,
      skip_reason: None,
    })
  }
}
