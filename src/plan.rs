//! # Plan Module
//!
//! This module decides what, if anything, to do with a file's SPDX header
//! and renders the replacement text. Planning is pure: it looks at the
//! file's lines, the parsed header state and the requested header state,
//! and produces an [`UpdatePlan`] that the caller applies (fix mode) or
//! merely reports (check mode).
//!
//! Year handling is monotonic. An existing copyright range is only ever
//! extended forward; a request for an older year never shrinks or rewinds
//! the range.

use std::ops::Range;

use crate::comment_style::CommentProfile;
use crate::header::{self, HeaderRequest};

/// What the plan does to the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanAction {
  /// Header already matches the request. Nothing to write.
  NoChange,
  /// No recognizable header; insert a fresh one above the content.
  Insert,
  /// Header matches except for the year range, which extends forward.
  UpdateYear,
  /// License, author, or notice differ; replace the whole header.
  ReplaceHeader,
}

/// A computed header update for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePlan {
  pub action: PlanAction,
  /// Rendered header lines, including the trailing blank separator. Empty
  /// for [`PlanAction::NoChange`].
  pub lines: Vec<String>,
  /// Span of original lines the rendered text replaces. Empty span for an
  /// insertion.
  pub splice: Range<usize>,
}

impl UpdatePlan {
  /// True when applying this plan would modify the file.
  pub fn is_change(&self) -> bool {
    self.action != PlanAction::NoChange
  }
}

/// Computes the update plan for a file.
///
/// `lines` are the file's lines without trailing newlines; `request` is the
/// target header state. Recognition failures inside the file degrade to an
/// insertion, never to a destructive merge.
pub fn plan_update(lines: &[&str], request: &HeaderRequest, profile: &CommentProfile) -> UpdatePlan {
  let parsed = header::parse_header(lines, profile);

  let Some(existing) = parsed else {
    let insert_at = if header::has_shebang(lines) { 1 } else { 0 };
    // Swallow any leading blank run so the separator stays a single line.
    let mut end = insert_at;
    while end < lines.len() && lines[end].trim().is_empty() {
      end += 1;
    }
    return UpdatePlan {
      action: PlanAction::Insert,
      lines: render_header(request, request.year, None, &expected_notice(request), profile),
      splice: insert_at..end,
    };
  };

  // A template in the request is authoritative; without one the existing
  // notice block is preserved as found.
  let desired_notice = if request.notice_lines.is_empty() {
    existing.notice_lines.clone()
  } else {
    expected_notice(request)
  };

  let identity_matches = existing.license_id == request.license_id
    && existing.author == request.author
    && existing.notice_lines == desired_notice;

  let merged_end = existing.effective_year_end().max(request.year);
  let years_change = merged_end != existing.effective_year_end()
    || (existing.year_end.is_none() && merged_end != existing.year_start);

  if identity_matches && !years_change {
    return UpdatePlan {
      action: PlanAction::NoChange,
      lines: Vec::new(),
      splice: existing.line_range.clone(),
    };
  }

  if identity_matches {
    return UpdatePlan {
      action: PlanAction::UpdateYear,
      lines: render_header(request, existing.year_start, Some(merged_end), &desired_notice, profile),
      splice: existing.line_range.clone(),
    };
  }

  // A replacement keeps the original start year and merges the requested
  // year into the range with the same never-backward rule.
  UpdatePlan {
    action: PlanAction::ReplaceHeader,
    lines: render_header(request, existing.year_start, Some(merged_end), &desired_notice, profile),
    splice: existing.line_range.clone(),
  }
}

/// Applies a plan to a file's lines, producing the new line sequence.
///
/// [`PlanAction::NoChange`] returns the input unchanged.
pub fn apply_plan(lines: &[&str], plan: &UpdatePlan) -> Vec<String> {
  if !plan.is_change() {
    return lines.iter().map(|l| (*l).to_string()).collect();
  }
  let mut out: Vec<String> = Vec::with_capacity(lines.len() + plan.lines.len());
  out.extend(lines[..plan.splice.start].iter().map(|l| (*l).to_string()));
  out.extend(plan.lines.iter().cloned());
  out.extend(lines[plan.splice.end..].iter().map(|l| (*l).to_string()));
  // A header inserted into an empty file should not leave a dangling
  // separator.
  while out.last().is_some_and(|l| l.trim().is_empty()) && out.len() > plan.splice.start.max(1) {
    if lines[plan.splice.end..].iter().any(|l| !l.trim().is_empty()) {
      break;
    }
    out.pop();
  }
  out
}

/// The notice block a request synthesizes: a blank spacer line followed by
/// the template lines, or nothing at all.
fn expected_notice(request: &HeaderRequest) -> Vec<String> {
  if request.notice_lines.is_empty() {
    return Vec::new();
  }
  let mut notice = Vec::with_capacity(request.notice_lines.len() + 1);
  notice.push(String::new());
  notice.extend(request.notice_lines.iter().cloned());
  notice
}

fn year_token(start: i32, end: Option<i32>) -> String {
  match end {
    Some(end) if end != start => format!("{start}-{end}"),
    _ => start.to_string(),
  }
}

/// Renders the full header: comment-wrapped SPDX and copyright lines, the
/// notice block, and a single trailing blank separator.
fn render_header(
  request: &HeaderRequest,
  year_start: i32,
  year_end: Option<i32>,
  notice: &[String],
  profile: &CommentProfile,
) -> Vec<String> {
  let mut inner = Vec::with_capacity(notice.len() + 2);
  inner.push(format!("SPDX-License-Identifier: {}", request.license_id));
  inner.push(format!(
    "Copyright (C) {}  {}",
    year_token(year_start, year_end),
    request.author
  ));
  inner.extend(notice.iter().cloned());
  let mut rendered = profile.wrap(&inner);
  rendered.push(String::new());
  rendered
}

#[cfg(test)]
mod tests {
  use super::*;

  fn request(license: &str, author: &str, year: i32) -> HeaderRequest {
    HeaderRequest {
      license_id: license.to_string(),
      author: author.to_string(),
      year,
      notice_lines: Vec::new(),
    }
  }

  fn hash() -> CommentProfile {
    CommentProfile::resolve("script.py")
  }

  fn slash() -> CommentProfile {
    CommentProfile::resolve("main.rs")
  }

  fn plan(content: &str, request: &HeaderRequest, profile: &CommentProfile) -> UpdatePlan {
    let lines: Vec<&str> = content.lines().collect();
    plan_update(&lines, request, profile)
  }

  fn apply(content: &str, request: &HeaderRequest, profile: &CommentProfile) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let plan = plan_update(&lines, request, profile);
    let mut out = apply_plan(&lines, &plan).join("\n");
    out.push('\n');
    out
  }

  #[test]
  fn test_insert_into_bare_file() {
    let out = apply("fn main() {}\n", &request("MIT", "A", 2024), &slash());
    assert_eq!(
      out,
      "// SPDX-License-Identifier: MIT\n// Copyright (C) 2024  A\n\nfn main() {}\n"
    );
  }

  #[test]
  fn test_insert_preserves_shebang() {
    let out = apply("#!/bin/sh\necho hi\n", &request("MIT", "A", 2024), &hash());
    assert_eq!(
      out,
      "#!/bin/sh\n# SPDX-License-Identifier: MIT\n# Copyright (C) 2024  A\n\necho hi\n"
    );
  }

  #[test]
  fn test_insert_collapses_leading_blanks() {
    let out = apply("\n\nfn main() {}\n", &request("MIT", "A", 2024), &slash());
    assert_eq!(
      out,
      "// SPDX-License-Identifier: MIT\n// Copyright (C) 2024  A\n\nfn main() {}\n"
    );
  }

  #[test]
  fn test_matching_header_is_no_change() {
    let content = "# SPDX-License-Identifier: MIT\n# Copyright (C) 2024  A\n\ncode()\n";
    let plan = plan(content, &request("MIT", "A", 2024), &hash());
    assert_eq!(plan.action, PlanAction::NoChange);
  }

  #[test]
  fn test_newer_year_extends_range() {
    // MIT 2023 header touched in 2025 grows to 2023-2025.
    let content = "# SPDX-License-Identifier: MIT\n# Copyright (C) 2023  A\n\ncode()\n";
    let plan = plan(content, &request("MIT", "A", 2025), &hash());
    assert_eq!(plan.action, PlanAction::UpdateYear);
    let out = apply(content, &request("MIT", "A", 2025), &hash());
    assert_eq!(
      out,
      "# SPDX-License-Identifier: MIT\n# Copyright (C) 2023-2025  A\n\ncode()\n"
    );
  }

  #[test]
  fn test_older_year_never_rewinds_range() {
    let content = "# SPDX-License-Identifier: MIT\n# Copyright (C) 2020-2024  A\n\ncode()\n";
    let plan = plan(content, &request("MIT", "A", 2021), &hash());
    assert_eq!(plan.action, PlanAction::NoChange);
  }

  #[test]
  fn test_existing_range_end_extends() {
    let content = "# SPDX-License-Identifier: MIT\n# Copyright (C) 2020-2023  A\n\ncode()\n";
    let out = apply(content, &request("MIT", "A", 2026), &hash());
    assert!(out.contains("Copyright (C) 2020-2026  A"));
  }

  #[test]
  fn test_different_license_replaces_header() {
    let content = "// SPDX-License-Identifier: MIT\n// Copyright (C) 2020  Old Corp\n\nfn main() {}\n";
    let plan = plan(content, &request("Apache-2.0", "New Corp", 2025), &slash());
    assert_eq!(plan.action, PlanAction::ReplaceHeader);
    let out = apply(content, &request("Apache-2.0", "New Corp", 2025), &slash());
    assert_eq!(
      out,
      "// SPDX-License-Identifier: Apache-2.0\n// Copyright (C) 2020-2025  New Corp\n\nfn main() {}\n"
    );
  }

  #[test]
  fn test_same_author_license_change_keeps_years() {
    let content = "# SPDX-License-Identifier: MIT\n# Copyright (C) 2020  A\n\ncode()\n";
    let out = apply(content, &request("Apache-2.0", "A", 2025), &hash());
    assert!(out.contains("Copyright (C) 2020-2025  A"));
    assert!(out.contains("SPDX-License-Identifier: Apache-2.0"));
  }

  #[test]
  fn test_replace_collapses_blank_run() {
    let content = "# SPDX-License-Identifier: MIT\n# Copyright (C) 2020  A\n\n\n\ncode()\n";
    let out = apply(content, &request("MIT", "A", 2025), &hash());
    assert_eq!(
      out,
      "# SPDX-License-Identifier: MIT\n# Copyright (C) 2020-2025  A\n\ncode()\n"
    );
  }

  #[test]
  fn test_notice_template_rendered_and_recognized() {
    let mut req = request("GPL-2.0-or-later", "A", 2024);
    req.notice_lines = vec![
      "This program is free software.".to_string(),
      "There is no warranty.".to_string(),
    ];
    let out = apply("code()\n", &req, &hash());
    assert_eq!(
      out,
      "# SPDX-License-Identifier: GPL-2.0-or-later\n# Copyright (C) 2024  A\n#\n# This program is free software.\n# There is no warranty.\n\ncode()\n"
    );
    let plan = plan(&out, &req, &hash());
    assert_eq!(plan.action, PlanAction::NoChange);
  }

  #[test]
  fn test_existing_notice_preserved_without_template() {
    let content = "# SPDX-License-Identifier: MIT\n# Copyright (C) 2023  A\n#\n# Keep this notice.\n\ncode()\n";
    let out = apply(content, &request("MIT", "A", 2025), &hash());
    assert!(out.contains("# Keep this notice."));
    assert!(out.contains("Copyright (C) 2023-2025  A"));
  }

  #[test]
  fn test_notice_template_mismatch_replaces() {
    let content = "# SPDX-License-Identifier: MIT\n# Copyright (C) 2023  A\n#\n# Old notice.\n\ncode()\n";
    let mut req = request("MIT", "A", 2023);
    req.notice_lines = vec!["New notice.".to_string()];
    let plan = plan(content, &req, &hash());
    assert_eq!(plan.action, PlanAction::ReplaceHeader);
  }

  #[test]
  fn test_malformed_header_degrades_to_insert() {
    // An unparsable copyright line means the block is not recognized and a
    // fresh header lands above it.
    let content = "# SPDX-License-Identifier: MIT\n# Copyright (C) 2023 A\n\ncode()\n";
    let plan = plan(content, &request("MIT", "A", 2024), &hash());
    assert_eq!(plan.action, PlanAction::Insert);
  }

  #[test]
  fn test_insert_into_empty_file() {
    let plan = plan_update(&[], &request("MIT", "A", 2024), &hash());
    assert_eq!(plan.action, PlanAction::Insert);
    let out = apply_plan(&[], &plan);
    assert_eq!(out, vec!["# SPDX-License-Identifier: MIT", "# Copyright (C) 2024  A"]);
  }

  #[test]
  fn test_block_profile_replacement() {
    let content = "/*\n * SPDX-License-Identifier: MIT\n * Copyright (C) 2022  A\n */\n\nbody {}\n";
    let profile = CommentProfile::resolve("style.css");
    let out = apply(content, &request("MIT", "A", 2024), &profile);
    assert_eq!(
      out,
      "/*\n * SPDX-License-Identifier: MIT\n * Copyright (C) 2022-2024  A\n */\n\nbody {}\n"
    );
  }

  #[test]
  fn test_year_update_leaves_banner_comment_in_place() {
    // A comment above the tag belongs to the code; extending the year must
    // not pull it into the header or move it below the copyright line.
    let content =
      "# Utility helpers for the build.\n# SPDX-License-Identifier: MIT\n# Copyright (C) 2023  A\n\ncode()\n";
    let plan = plan(content, &request("MIT", "A", 2025), &hash());
    assert_eq!(plan.action, PlanAction::UpdateYear);
    let out = apply(content, &request("MIT", "A", 2025), &hash());
    assert_eq!(
      out,
      "# Utility helpers for the build.\n# SPDX-License-Identifier: MIT\n# Copyright (C) 2023-2025  A\n\ncode()\n"
    );
  }

  #[test]
  fn test_fix_is_idempotent() {
    let req = request("MIT", "Example Dev", 2025);
    for content in [
      "fn main() {}\n",
      "#!/usr/bin/env python\nprint()\n",
      "# SPDX-License-Identifier: MIT\n# Copyright (C) 2019  Example Dev\n\ncode()\n",
    ] {
      let profile = hash();
      let once = apply(content, &req, &profile);
      let lines: Vec<&str> = once.lines().collect();
      let second = plan_update(&lines, &req, &profile);
      assert_eq!(second.action, PlanAction::NoChange, "not idempotent for {content:?}");
    }
  }
}
