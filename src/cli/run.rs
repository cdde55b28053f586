//! # Run Command
//!
//! This module implements the check/fix command, which is the whole of the
//! spdxify CLI surface: it assembles a header request from arguments and
//! configuration, compiles the ignore matcher, and drives the processor.

use std::path::PathBuf;
use std::process;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Args;
use tracing::debug;

use crate::config::load_config;
use crate::diff::DiffManager;
use crate::header::HeaderRequest;
use crate::ignore::{IgnoreMatcher, default_patterns};
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::notice::load_notice_template;
use crate::output::{
  CategorizedReports, print_all_files_ok, print_blank_line, print_hint, print_inserted_files, print_mismatched_files,
  print_missing_files, print_outdated_files, print_replaced_files, print_start_message, print_summary,
  print_updated_files,
};
use crate::processor::{Processor, ProcessorConfig};
use crate::report::{ProcessingSummary, write_json_report};
use crate::{info_log, verbose_log};

/// Arguments for the run command
#[derive(Args, Debug, Default)]
pub struct RunArgs {
  /// SPDX license identifier to apply (e.g., "MIT", "GPL-2.0-or-later")
  #[arg(required = false, value_name = "LICENSE")]
  pub license: Option<String>,

  /// Copyright holder name
  #[arg(required = false, value_name = "AUTHOR")]
  pub author: Option<String>,

  /// Specific files to process (overrides --dir traversal)
  #[arg(value_name = "FILES")]
  pub files: Vec<PathBuf>,

  /// Check mode: report files whose headers would change (default)
  #[arg(long, group = "mode")]
  pub check: bool,

  /// Fix mode: add or update headers in files
  #[arg(
    long,
    group = "mode",
    help = "Fix mode: add or update headers in files

[default: --check]"
  )]
  pub fix: bool,

  /// Root directory to process
  #[arg(long, short = 'd', value_name = "DIR", default_value = ".")]
  pub dir: PathBuf,

  /// Copyright year (default: current year)
  #[arg(long)]
  pub year: Option<i32>,

  /// Don't process subdirectories
  #[arg(long)]
  pub no_recursive: bool,

  /// Path to an ignore file (default: .licenseignore, else .gitignore, in
  /// the root directory)
  #[arg(long, value_name = "FILE")]
  pub ignore_file: Option<PathBuf>,

  /// Additional ignore patterns, gitignore syntax (repeatable)
  #[arg(long, short = 'i', value_name = "PATTERN")]
  pub ignore: Vec<String>,

  /// Path to a notice template file to append after the copyright line
  #[arg(long, value_name = "FILE")]
  pub notice_template: Option<PathBuf>,

  /// Show diff of changes in check mode
  #[arg(long)]
  pub show_diff: bool,

  /// Save diff of changes to a file
  #[arg(long, short = 'o', value_name = "FILE")]
  pub save_diff: Option<PathBuf>,

  /// Generate a JSON report of header status and save to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Path to config file (default: .spdxify.toml in the root directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

/// Run the check/fix command with the given arguments
pub fn run(args: RunArgs) -> Result<()> {
  // Initialize tracing subscriber for structured logging
  init_tracing(args.quiet, args.verbose);

  // Set verbose mode for output formatting and the logging macros
  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let root = args
    .dir
    .canonicalize()
    .with_context(|| format!("Root directory does not exist: {}", args.dir.display()))?;

  // Load configuration file if present
  let config = match load_config(args.config.as_deref(), &root, args.no_config) {
    Ok(config) => config,
    Err(e) => {
      eprintln!("ERROR: {e}");
      process::exit(1);
    }
  };

  if config.is_some() {
    debug!("Using configuration file defaults");
  }
  let config = config.unwrap_or_default();

  // CLI arguments take precedence over config values
  let Some(license_id) = args.license.or(config.license) else {
    eprintln!("ERROR: Missing required argument: <LICENSE>");
    process::exit(2);
  };
  let Some(author) = args.author.or(config.author) else {
    eprintln!("ERROR: Missing required argument: <AUTHOR>");
    process::exit(2);
  };
  let year = args
    .year
    .or(config.year)
    .unwrap_or_else(|| chrono::Local::now().year());

  let notice_lines = match args.notice_template.or(config.notice_template) {
    Some(path) => load_notice_template(&path)?,
    None => Vec::new(),
  };

  let request = HeaderRequest {
    license_id,
    author,
    year,
    notice_lines,
  };

  // Assemble ignore patterns: built-in defaults first, then the ignore
  // file, then config patterns, then CLI patterns. Later patterns win.
  let mut patterns: Vec<String> = default_patterns().map(str::to_string).collect();
  if let Some(ignore_path) = discover_ignore_file(args.ignore_file.or(config.ignore_file), &root) {
    verbose_log!("Using ignore file: {}", ignore_path.display());
    let content = std::fs::read_to_string(&ignore_path)
      .with_context(|| format!("Failed to read ignore file {}", ignore_path.display()))?;
    patterns.extend(content.lines().map(str::to_string));
  }
  patterns.extend(config.ignore);
  patterns.extend(args.ignore.iter().cloned());

  let matcher = IgnoreMatcher::compile(patterns.iter().map(String::as_str));
  debug!("Compiled {} ignore rules", matcher.len());

  // Determine mode (check is the default when neither flag is given)
  let check_only = args.check || !args.fix;

  let diff_manager = DiffManager::new(args.show_diff, args.save_diff.clone());
  diff_manager.init()?;

  let processor = Processor::new(ProcessorConfig {
    request,
    matcher,
    root: root.clone(),
    check_only,
    recursive: !args.no_recursive,
    diff_manager: Some(diff_manager),
  });

  let files = processor.collect_files(&args.files)?;

  print_start_message(files.len(), !check_only);

  if files.is_empty() {
    print_blank_line();
    print_all_files_ok();
    return Ok(());
  }

  let start_time = Instant::now();
  let has_issues = processor.process(files)?;
  let elapsed = start_time.elapsed();

  // Take ownership of the reports to avoid a clone
  let file_reports = std::mem::take(&mut *processor.file_reports.lock().expect("mutex poisoned"));

  let summary = ProcessingSummary::from_reports(&file_reports, elapsed);
  let categorized = CategorizedReports::from_reports(&file_reports);

  print_blank_line();

  if check_only {
    if !has_issues {
      print_all_files_ok();
    } else {
      print_missing_files(&categorized.inserted, Some(&root));
      if !categorized.updated.is_empty() {
        if !categorized.inserted.is_empty() {
          print_blank_line();
        }
        print_outdated_files(&categorized.updated, Some(&root));
      }
      if !categorized.replaced.is_empty() {
        if !categorized.inserted.is_empty() || !categorized.updated.is_empty() {
          print_blank_line();
        }
        print_mismatched_files(&categorized.replaced, Some(&root));
      }
    }
  } else {
    print_inserted_files(&categorized.inserted, Some(&root));
    if !categorized.updated.is_empty() {
      if !categorized.inserted.is_empty() {
        print_blank_line();
      }
      print_updated_files(&categorized.updated, Some(&root));
    }
    if !categorized.replaced.is_empty() {
      if !categorized.inserted.is_empty() || !categorized.updated.is_empty() {
        print_blank_line();
      }
      print_replaced_files(&categorized.replaced, Some(&root));
    }
    if !categorized.has_changes() && !has_issues {
      print_all_files_ok();
    }
  }

  print_blank_line();
  print_summary(&summary, check_only);

  if check_only && has_issues {
    print_blank_line();
    print_hint("Run with --fix to update headers.");
  }

  // Generate JSON report if requested
  if let Some(ref output_path) = args.report_json {
    if let Err(e) = write_json_report(output_path, &file_reports, &summary) {
      eprintln!("Error generating JSON report: {e}");
    } else {
      info_log!("Generated JSON report at {}", output_path.display());
    }
  }

  // Check mode fails when any file needs a change; fix mode fails only
  // when a file could not be read or written.
  let had_errors = file_reports
    .iter()
    .any(|r| r.skip_reason.as_deref().is_some_and(|s| s.starts_with("Error:")));
  if (check_only && has_issues) || had_errors {
    process::exit(1);
  }

  Ok(())
}

/// Resolves the ignore file for a run.
///
/// An explicit path wins when it exists; otherwise `.licenseignore` is
/// preferred over `.gitignore` in the root directory, matching the ignore
/// file convention of license tooling while still honoring a project's
/// existing gitignore.
fn discover_ignore_file(explicit: Option<PathBuf>, root: &std::path::Path) -> Option<PathBuf> {
  if let Some(path) = explicit {
    if path.exists() {
      return Some(path);
    }
    eprintln!("Warning: ignore file {} does not exist", path.display());
  }

  let licenseignore = root.join(".licenseignore");
  if licenseignore.exists() {
    return Some(licenseignore);
  }

  let gitignore = root.join(".gitignore");
  if gitignore.exists() {
    return Some(gitignore);
  }

  None
}
