//! # Output Module
//!
//! This module centralizes all user-facing output for the spdxify tool.
//! It provides consistent formatting, colors, and symbols for terminal
//! output.
//!
//! ## Design Goals
//!
//! - **Informative**: Show actionable information without requiring flags
//! - **Scannable**: Use formatting to make output easy to parse visually
//! - **Progressive**: More detail with `-v`, silence with `-q`
//! - **Scriptable**: Keep stdout predictable for piping/automation

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::report::{FileAction, FileReport, ProcessingSummary};

/// Symbols used in output
pub mod symbols {
  /// Success/header present
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Missing header/failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// Year updated
  pub const UPDATED: &str = "\u{21bb}"; // ↻
  /// Header replaced
  pub const REPLACED: &str = "\u{2260}"; // ≠
}

/// Maximum number of files to show in the default output before truncating
const DEFAULT_FILE_LIST_LIMIT: usize = 20;

/// Print the initial "Checking N files..." or "Fixing N files..." message.
pub fn print_start_message(file_count: usize, fix_mode: bool) {
  if is_quiet() {
    return;
  }

  let verb = if fix_mode { "Fixing" } else { "Checking" };
  let files_word = if file_count == 1 { "file" } else { "files" };

  println!("{verb} {file_count} {files_word}...");
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

/// Colored symbol variants for file list headers.
#[derive(Debug, Clone, Copy)]
enum ListSymbol {
  Success,
  Failure,
  Updated,
  Replaced,
}

impl ListSymbol {
  fn render(self) -> String {
    match self {
      ListSymbol::Success => symbols::SUCCESS
        .if_supports_color(Stream::Stdout, |s| s.green())
        .to_string(),
      ListSymbol::Failure => symbols::FAILURE
        .if_supports_color(Stream::Stdout, |s| s.red())
        .to_string(),
      ListSymbol::Updated => symbols::UPDATED
        .if_supports_color(Stream::Stdout, |s| s.yellow())
        .to_string(),
      ListSymbol::Replaced => symbols::REPLACED
        .if_supports_color(Stream::Stdout, |s| s.yellow())
        .to_string(),
    }
  }
}

/// Print a sorted, truncated list of files under a category header.
///
/// In quiet mode only the paths are printed, for scripting. In verbose mode
/// the full list is shown; otherwise it is truncated at
/// `DEFAULT_FILE_LIST_LIMIT` entries.
fn print_file_list(symbol: ListSymbol, header: &str, files: &[&FileReport], root: Option<&Path>) {
  if files.is_empty() {
    return;
  }

  let mut sorted_files: Vec<_> = files.to_vec();
  sorted_files.sort_by(|a, b| a.path.cmp(&b.path));

  if is_quiet() {
    for file in &sorted_files {
      println!("{}", make_relative_path(&file.path, root));
    }
    return;
  }

  println!("{} {}", symbol.render(), header);

  let count = sorted_files.len();
  let show_all = is_verbose();
  let limit = if show_all { count } else { DEFAULT_FILE_LIST_LIMIT };

  for file in sorted_files.iter().take(limit) {
    println!("  {}", make_relative_path(&file.path, root));
  }

  if !show_all && count > limit {
    let remaining = count - limit;
    println!("  ... and {remaining} more (use -v to see all)");
  }
}

/// Print the list of files missing SPDX headers.
pub fn print_missing_files(files: &[&FileReport], root: Option<&Path>) {
  let count = files.len();
  let header = format!(
    "{} {} missing SPDX headers:",
    count,
    if count == 1 { "file" } else { "files" }
  );
  print_file_list(ListSymbol::Failure, &header, files, root);
}

/// Print the list of files with outdated copyright years.
pub fn print_outdated_files(files: &[&FileReport], root: Option<&Path>) {
  let count = files.len();
  let header = format!(
    "{} {} with outdated year:",
    count,
    if count == 1 { "file" } else { "files" }
  );
  print_file_list(ListSymbol::Updated, &header, files, root);
}

/// Print the list of files whose headers do not match the request.
pub fn print_mismatched_files(files: &[&FileReport], root: Option<&Path>) {
  let count = files.len();
  let header = format!(
    "{} {} with mismatched headers:",
    count,
    if count == 1 { "file" } else { "files" }
  );
  print_file_list(ListSymbol::Replaced, &header, files, root);
}

/// Print the list of files that had headers inserted (fix mode).
pub fn print_inserted_files(files: &[&FileReport], root: Option<&Path>) {
  let count = files.len();
  let header = format!(
    "Added SPDX header to {} {}:",
    count,
    if count == 1 { "file" } else { "files" }
  );
  print_file_list(ListSymbol::Success, &header, files, root);
}

/// Print the list of files that had years updated (fix mode).
pub fn print_updated_files(files: &[&FileReport], root: Option<&Path>) {
  let count = files.len();
  let header = format!(
    "Updated year in {} {}:",
    count,
    if count == 1 { "file" } else { "files" }
  );
  print_file_list(ListSymbol::Updated, &header, files, root);
}

/// Print the list of files that had headers replaced (fix mode).
pub fn print_replaced_files(files: &[&FileReport], root: Option<&Path>) {
  let count = files.len();
  let header = format!(
    "Replaced header in {} {}:",
    count,
    if count == 1 { "file" } else { "files" }
  );
  print_file_list(ListSymbol::Replaced, &header, files, root);
}

/// Print the success message when all files carry correct headers.
pub fn print_all_files_ok() {
  if is_quiet() {
    return;
  }

  println!(
    "{} All files have SPDX headers.",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green())
  );
}

/// Print the processing summary.
///
/// Format: "Summary: X OK, Y to fix, Z skipped" in check mode, "Summary: X
/// OK, Y fixed, Z skipped" in fix mode. In verbose mode, also shows timing.
pub fn print_summary(summary: &ProcessingSummary, check_mode: bool) {
  if is_quiet() {
    return;
  }

  let ok_count = summary.files_ok;
  let change_count = summary.total_changes();
  let skipped_count = summary.files_skipped;

  let ok_str = ok_count.if_supports_color(Stream::Stdout, |s| s.cyan()).to_string();
  let change_str = if change_count > 0 {
    change_count.if_supports_color(Stream::Stdout, |s| s.red()).to_string()
  } else {
    change_count.if_supports_color(Stream::Stdout, |s| s.cyan()).to_string()
  };
  let skipped_str = skipped_count
    .if_supports_color(Stream::Stdout, |s| s.dimmed())
    .to_string();

  let change_word = if check_mode { "to fix" } else { "fixed" };
  let mut summary_line = format!("Summary: {ok_str} OK, {change_str} {change_word}, {skipped_str} skipped");

  if is_verbose() {
    summary_line.push_str(&format!(" ({:.2}s)", summary.processing_time.as_secs_f64()));
  }

  println!("{summary_line}");
}

/// Print a hint for the user about what to do next.
pub fn print_hint(message: &str) {
  if is_quiet() {
    return;
  }

  println!("{}", message.if_supports_color(Stream::Stdout, |s| s.yellow()));
}

/// Categorize file reports into different groups for output.
pub struct CategorizedReports<'a> {
  /// Files missing headers (insert needed or performed)
  pub inserted: Vec<&'a FileReport>,
  /// Files with year updates (needed or performed)
  pub updated: Vec<&'a FileReport>,
  /// Files with header replacements (needed or performed)
  pub replaced: Vec<&'a FileReport>,
  /// Files that already had correct headers
  pub ok: Vec<&'a FileReport>,
  /// Files that were skipped
  pub skipped: Vec<&'a FileReport>,
}

impl<'a> CategorizedReports<'a> {
  /// Categorize a slice of file reports.
  pub fn from_reports(reports: &'a [FileReport]) -> Self {
    let mut inserted = Vec::new();
    let mut updated = Vec::new();
    let mut replaced = Vec::new();
    let mut ok = Vec::new();
    let mut skipped = Vec::new();

    for report in reports {
      match report.action {
        FileAction::Inserted => inserted.push(report),
        FileAction::YearUpdated => updated.push(report),
        FileAction::Replaced => replaced.push(report),
        FileAction::NoActionNeeded => ok.push(report),
        FileAction::Skipped => skipped.push(report),
      }
    }

    Self {
      inserted,
      updated,
      replaced,
      ok,
      skipped,
    }
  }

  /// True when any file needs (or received) a change.
  pub fn has_changes(&self) -> bool {
    !self.inserted.is_empty() || !self.updated.is_empty() || !self.replaced.is_empty()
  }
}

/// Make a path relative to the scan root for display.
fn make_relative_path(path: &Path, root: Option<&Path>) -> String {
  if let Some(root) = root {
    path
      .strip_prefix(root)
      .map(|p| p.to_string_lossy().to_string())
      .unwrap_or_else(|_| path.to_string_lossy().to_string())
  } else {
    path.to_string_lossy().to_string()
  }
}
