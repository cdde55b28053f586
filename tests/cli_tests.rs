mod common;

use std::process::Command;

use assert_cmd::prelude::*;
use common::{read_file, run_spdxify, write_file};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_check_mode_reports_missing_and_exits_nonzero() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = tempdir()?;
  write_file(temp_dir.path(), "src/main.rs", "fn main() {}\n")?;

  let output = run_spdxify(temp_dir.path(), &["MIT", "Test Author", "--check", "--year", "2025"])?;

  assert_eq!(output.status.code(), Some(1));
  let stdout = String::from_utf8(output.stdout)?;
  assert!(stdout.contains("missing SPDX headers"), "stdout was: {stdout}");
  assert!(stdout.contains("src/main.rs"));
  assert!(stdout.contains("Run with --fix"));

  // Check mode must not modify the file
  assert_eq!(read_file(temp_dir.path(), "src/main.rs")?, "fn main() {}\n");
  Ok(())
}

#[test]
fn test_check_mode_passes_on_annotated_tree() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = tempdir()?;
  write_file(
    temp_dir.path(),
    "src/lib.rs",
    "// SPDX-License-Identifier: MIT\n// Copyright (C) 2025  Test Author\n\npub fn f() {}\n",
  )?;

  Command::cargo_bin("spdxify")?
    .args(["MIT", "Test Author", "--check", "--year", "2025"])
    .current_dir(temp_dir.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("All files have SPDX headers"));
  Ok(())
}

#[test]
fn test_fix_mode_inserts_header() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = tempdir()?;
  write_file(temp_dir.path(), "script.py", "print(\"hi\")\n")?;

  let output = run_spdxify(temp_dir.path(), &["MIT", "Test Author", "--fix", "--year", "2025"])?;

  assert!(output.status.success());
  assert_eq!(
    read_file(temp_dir.path(), "script.py")?,
    "# SPDX-License-Identifier: MIT\n# Copyright (C) 2025  Test Author\n\nprint(\"hi\")\n"
  );
  Ok(())
}

#[test]
fn test_fix_mode_preserves_shebang() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = tempdir()?;
  write_file(temp_dir.path(), "tool.sh", "#!/bin/sh\necho hi\n")?;

  run_spdxify(temp_dir.path(), &["MIT", "Test Author", "--fix", "--year", "2025"])?;

  assert_eq!(
    read_file(temp_dir.path(), "tool.sh")?,
    "#!/bin/sh\n# SPDX-License-Identifier: MIT\n# Copyright (C) 2025  Test Author\n\necho hi\n"
  );
  Ok(())
}

#[test]
fn test_fix_mode_extends_year_range() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = tempdir()?;
  write_file(
    temp_dir.path(),
    "main.go",
    "// SPDX-License-Identifier: MIT\n// Copyright (C) 2023  Test Author\n\npackage main\n",
  )?;

  let output = run_spdxify(temp_dir.path(), &["MIT", "Test Author", "--fix", "--year", "2025"])?;

  assert!(output.status.success());
  let content = read_file(temp_dir.path(), "main.go")?;
  assert!(content.contains("// Copyright (C) 2023-2025  Test Author"));
  let stdout = String::from_utf8(output.stdout)?;
  assert!(stdout.contains("Updated year"));
  Ok(())
}

#[test]
fn test_fix_mode_replaces_mismatched_license() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = tempdir()?;
  write_file(
    temp_dir.path(),
    "app.c",
    "// SPDX-License-Identifier: MIT\n// Copyright (C) 2020  Test Author\n\nint main(void) {}\n",
  )?;

  run_spdxify(temp_dir.path(), &["Apache-2.0", "Test Author", "--fix", "--year", "2025"])?;

  let content = read_file(temp_dir.path(), "app.c")?;
  assert!(content.contains("// SPDX-License-Identifier: Apache-2.0"));
  assert!(content.contains("// Copyright (C) 2020-2025  Test Author"));
  Ok(())
}

#[test]
fn test_fix_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = tempdir()?;
  write_file(temp_dir.path(), "style.css", "body { margin: 0; }\n")?;

  run_spdxify(temp_dir.path(), &["MIT", "Test Author", "--fix", "--year", "2025"])?;
  let after_first = read_file(temp_dir.path(), "style.css")?;

  let output = run_spdxify(temp_dir.path(), &["MIT", "Test Author", "--check", "--year", "2025"])?;
  assert!(output.status.success(), "second check should find nothing to do");
  assert_eq!(read_file(temp_dir.path(), "style.css")?, after_first);

  // Block comment family: one open/close pair around the whole header
  assert!(after_first.starts_with("/*\n * SPDX-License-Identifier: MIT\n"));
  assert!(after_first.contains(" */\n\nbody { margin: 0; }\n"));
  Ok(())
}

#[test]
fn test_explicit_files_override_traversal() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = tempdir()?;
  write_file(temp_dir.path(), "a.rs", "fn a() {}\n")?;
  write_file(temp_dir.path(), "b.rs", "fn b() {}\n")?;

  run_spdxify(
    temp_dir.path(),
    &["MIT", "Test Author", "--fix", "--year", "2025", "a.rs"],
  )?;

  assert!(read_file(temp_dir.path(), "a.rs")?.contains("SPDX-License-Identifier"));
  assert_eq!(read_file(temp_dir.path(), "b.rs")?, "fn b() {}\n");
  Ok(())
}

#[test]
fn test_notice_template_appended() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = tempdir()?;
  write_file(temp_dir.path(), "module.py", "pass\n")?;
  write_file(
    temp_dir.path(),
    "NOTICE.template",
    "This program comes with ABSOLUTELY NO WARRANTY.\nSee the LICENSE file for details.\n",
  )?;

  run_spdxify(
    temp_dir.path(),
    &[
      "GPL-2.0-or-later",
      "Test Author",
      "--fix",
      "--year",
      "2025",
      "--notice-template",
      "NOTICE.template",
    ],
  )?;

  let content = read_file(temp_dir.path(), "module.py")?;
  assert_eq!(
    content,
    "# SPDX-License-Identifier: GPL-2.0-or-later\n\
     # Copyright (C) 2025  Test Author\n\
     #\n\
     # This program comes with ABSOLUTELY NO WARRANTY.\n\
     # See the LICENSE file for details.\n\
     \n\
     pass\n"
  );
  Ok(())
}

#[test]
fn test_json_report_written() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = tempdir()?;
  write_file(temp_dir.path(), "main.rs", "fn main() {}\n")?;

  run_spdxify(
    temp_dir.path(),
    &[
      "MIT",
      "Test Author",
      "--check",
      "--year",
      "2025",
      "--report-json",
      "report.json",
    ],
  )?;

  let report = read_file(temp_dir.path(), "report.json")?;
  assert!(report.contains("\"summary\""));
  assert!(report.contains("\"inserted\""));
  assert!(report.contains("main.rs"));
  Ok(())
}

#[test]
fn test_show_diff_previews_changes() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = tempdir()?;
  write_file(temp_dir.path(), "main.rs", "fn main() {}\n")?;

  let output = run_spdxify(
    temp_dir.path(),
    &["MIT", "Test Author", "--check", "--year", "2025", "--show-diff"],
  )?;

  let stderr = String::from_utf8(output.stderr)?;
  assert!(stderr.contains("Diff for"), "stderr was: {stderr}");
  assert!(stderr.contains("+// SPDX-License-Identifier: MIT"));
  Ok(())
}

#[test]
fn test_quiet_mode_prints_bare_paths() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = tempdir()?;
  write_file(temp_dir.path(), "main.rs", "fn main() {}\n")?;

  let output = run_spdxify(temp_dir.path(), &["MIT", "Test Author", "--check", "--year", "2025", "-q"])?;

  assert_eq!(output.status.code(), Some(1));
  let stdout = String::from_utf8(output.stdout)?;
  assert_eq!(stdout.trim(), "main.rs");
  Ok(())
}

#[test]
fn test_colors_never_has_no_ansi_codes() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = tempdir()?;
  write_file(temp_dir.path(), "main.rs", "fn main() {}\n")?;

  let output = run_spdxify(
    temp_dir.path(),
    &["MIT", "Test Author", "--check", "--year", "2025", "--colors=never"],
  )?;

  let stdout = String::from_utf8(output.stdout)?;
  assert!(!stdout.contains("\x1b["));
  Ok(())
}

#[test]
fn test_missing_license_argument_is_usage_error() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = tempdir()?;
  write_file(temp_dir.path(), "main.rs", "fn main() {}\n")?;

  let output = run_spdxify(temp_dir.path(), &["--check"])?;

  assert_eq!(output.status.code(), Some(2));
  let stderr = String::from_utf8(output.stderr)?;
  assert!(stderr.contains("LICENSE"));
  Ok(())
}

#[test]
fn test_config_file_supplies_defaults() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = tempdir()?;
  write_file(
    temp_dir.path(),
    ".spdxify.toml",
    "license = \"MIT\"\nauthor = \"Config Author\"\nyear = 2025\n",
  )?;
  write_file(temp_dir.path(), "main.rs", "fn main() {}\n")?;

  let output = run_spdxify(temp_dir.path(), &["--fix"])?;

  assert!(output.status.success());
  let content = read_file(temp_dir.path(), "main.rs")?;
  assert!(content.contains("// SPDX-License-Identifier: MIT"));
  assert!(content.contains("// Copyright (C) 2025  Config Author"));
  Ok(())
}

#[test]
fn test_cli_overrides_config() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = tempdir()?;
  write_file(
    temp_dir.path(),
    ".spdxify.toml",
    "license = \"MIT\"\nauthor = \"Config Author\"\n",
  )?;
  write_file(temp_dir.path(), "main.rs", "fn main() {}\n")?;

  run_spdxify(
    temp_dir.path(),
    &["Apache-2.0", "CLI Author", "--fix", "--year", "2025"],
  )?;

  let content = read_file(temp_dir.path(), "main.rs")?;
  assert!(content.contains("// SPDX-License-Identifier: Apache-2.0"));
  assert!(content.contains("CLI Author"));
  Ok(())
}

#[test]
fn test_no_recursive_skips_subdirectories() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = tempdir()?;
  write_file(temp_dir.path(), "top.rs", "fn top() {}\n")?;
  write_file(temp_dir.path(), "sub/nested.rs", "fn nested() {}\n")?;

  run_spdxify(
    temp_dir.path(),
    &["MIT", "Test Author", "--fix", "--year", "2025", "--no-recursive"],
  )?;

  assert!(read_file(temp_dir.path(), "top.rs")?.contains("SPDX-License-Identifier"));
  assert_eq!(read_file(temp_dir.path(), "sub/nested.rs")?, "fn nested() {}\n");
  Ok(())
}
