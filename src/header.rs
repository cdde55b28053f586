//! # Header Module
//!
//! This module recognizes existing SPDX headers in the leading lines of a
//! file. A file is only considered annotated when a well-formed
//! `SPDX-License-Identifier` tag *and* a parsable `Copyright (C)` line are
//! found inside the leading comment block; anything malformed degrades to
//! "no header" so the caller inserts a fresh header instead of guessing at a
//! partial merge.
//!
//! The scan is a small state machine over a bounded prefix of the file:
//! `BeforeHeader` (skip a shebang and leading blanks), `InHeader` (accumulate
//! comment lines for the active [`CommentProfile`]), `AfterHeader` (absorb
//! the blank separator). No source parsing happens here; files are line
//! sequences.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::comment_style::CommentProfile;

/// An SPDX header found in a file.
///
/// Absence of a header is represented by `Option::None` at the call site,
/// never by a zero-valued struct, so an empty notice block stays
/// distinguishable from "no header".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpdxHeader {
  /// License identifier from the `SPDX-License-Identifier` tag.
  pub license_id: String,
  /// Copyright holder, the exact remainder after the two-space separator.
  pub author: String,
  /// First (or only) copyright year.
  pub year_start: i32,
  /// End of the year range, when the header carries one.
  pub year_end: Option<i32>,
  /// Comment lines following the SPDX tag besides the Copyright line,
  /// captured with their comment wrapper stripped.
  pub notice_lines: Vec<String>,
  /// Line span the header occupies in the file, including the trailing
  /// blank separator line(s). Replacement text is spliced at exactly this
  /// span.
  pub line_range: Range<usize>,
}

impl SpdxHeader {
  /// The effective end of the copyright range.
  pub fn effective_year_end(&self) -> i32 {
    self.year_end.unwrap_or(self.year_start)
  }
}

/// Caller-supplied target header state for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRequest {
  /// Requested SPDX license identifier.
  pub license_id: String,
  /// Requested copyright holder.
  pub author: String,
  /// Requested copyright year.
  pub year: i32,
  /// Notice template lines to append after the copyright line; empty for no
  /// notice block.
  pub notice_lines: Vec<String>,
}

/// True when the file opens with a shebang line.
pub fn has_shebang(lines: &[&str]) -> bool {
  lines.first().is_some_and(|l| l.starts_with("#!"))
}

static SPDX_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^SPDX-License-Identifier:\s*(\S+)\s*$").expect("spdx regex must compile"));

static COPYRIGHT_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^Copyright \(C\) (\d{4})(?:-(\d{4}))?  (.*)$").expect("copyright regex must compile"));

/// Parses an existing SPDX header from the leading lines of a file.
///
/// Returns `None` when no header is present or when the candidate block is
/// malformed in any way (missing SPDX tag, unparsable copyright line,
/// inverted year range, unterminated block comment). The caller treats both
/// identically and inserts a fresh header above the existing content.
pub fn parse_header(lines: &[&str], profile: &CommentProfile) -> Option<SpdxHeader> {
  let block = scan_block(lines, profile)?;

  let mut license_id: Option<(usize, String)> = None;
  let mut copyright: Option<(usize, i32, Option<i32>, String)> = None;

  for (i, text) in block.stripped.iter().enumerate() {
    if license_id.is_none() && text.contains("SPDX-License-Identifier") {
      let caps = SPDX_RE.captures(text.trim())?;
      license_id = Some((i, caps[1].to_string()));
      continue;
    }

    if copyright.is_none() && text.starts_with("Copyright") {
      // A copyright-looking line that does not parse poisons the whole
      // block: the tool must not guess at a partial merge.
      let caps = COPYRIGHT_RE.captures(text)?;
      let year_start: i32 = caps[1].parse().ok()?;
      let year_end: Option<i32> = match caps.get(2) {
        Some(m) => {
          let end: i32 = m.as_str().parse().ok()?;
          if end < year_start {
            return None;
          }
          Some(end)
        }
        None => None,
      };
      copyright = Some((i, year_start, year_end, caps[3].to_string()));
    }
  }

  let (license_idx, license_id) = license_id?;
  let (copyright_idx, year_start, year_end, author) = copyright?;
  if copyright_idx < license_idx {
    return None;
  }

  // Comment lines above the SPDX tag are a banner, not part of the header.
  // In a line family the header simply starts at the tag; a block wrapper
  // cannot be split, so a banner inside one aborts recognition.
  let mut range = block.range;
  if license_idx > 0 {
    if profile.is_line() {
      range.start += license_idx;
    } else if block.stripped[..license_idx].iter().any(|l| !l.trim().is_empty()) {
      return None;
    }
  }

  let notice_lines: Vec<String> = block
    .stripped
    .into_iter()
    .enumerate()
    .filter(|(i, _)| *i > license_idx && *i != copyright_idx)
    .map(|(_, line)| line)
    .collect();

  Some(SpdxHeader {
    license_id,
    author,
    year_start,
    year_end,
    notice_lines,
    line_range: range,
  })
}

/// The leading comment block of a file, with comment wrappers stripped.
struct CandidateBlock {
  stripped: Vec<String>,
  range: Range<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
  BeforeHeader,
  InHeader,
  AfterHeader,
}

/// Scans the leading lines for a comment block in the given profile.
///
/// Returns `None` when the file has no leading comment block. The returned
/// range covers the block plus any immediately following blank lines, so a
/// replacement ending in a single blank separator collapses pre-existing
/// blank runs to exactly one.
fn scan_block(lines: &[&str], profile: &CommentProfile) -> Option<CandidateBlock> {
  let mut idx = if has_shebang(lines) { 1 } else { 0 };
  let mut state = ScanState::BeforeHeader;
  let mut start = idx;
  let mut stripped = Vec::new();

  if profile.is_line() {
    while idx < lines.len() {
      let line = lines[idx];
      match state {
        ScanState::BeforeHeader => {
          if line.trim().is_empty() {
            idx += 1;
          } else if let Some(inner) = profile.strip_line(line) {
            state = ScanState::InHeader;
            start = idx;
            stripped.push(inner.to_string());
            idx += 1;
          } else {
            return None;
          }
        }
        ScanState::InHeader => {
          if let Some(inner) = profile.strip_line(line) {
            stripped.push(inner.to_string());
            idx += 1;
          } else {
            state = ScanState::AfterHeader;
          }
        }
        ScanState::AfterHeader => {
          if line.trim().is_empty() {
            idx += 1;
          } else {
            break;
          }
        }
      }
    }
    if state == ScanState::BeforeHeader {
      return None;
    }
    return Some(CandidateBlock {
      stripped,
      range: start..idx,
    });
  }

  // Block comment families: the wrapper markers define the block's extent.
  let (open, close) = match profile {
    CommentProfile::Block { open, close, .. } => (open.trim(), close.trim()),
    CommentProfile::Line { .. } => unreachable!("line profiles handled above"),
  };

  while idx < lines.len() && lines[idx].trim().is_empty() {
    idx += 1;
  }
  let first = lines.get(idx)?;
  let rest = first.trim_start().strip_prefix(open)?;
  start = idx;
  idx += 1;

  if let Some(pos) = rest.find(close) {
    // Single-line block.
    stripped.push(rest[..pos].trim().to_string());
  } else {
    if !rest.trim().is_empty() {
      stripped.push(rest.trim().to_string());
    }
    let mut closed = false;
    while idx < lines.len() {
      let line = lines[idx];
      idx += 1;
      if let Some(pos) = line.find(close) {
        let before = profile.strip_block_body(&line[..pos]);
        if !before.trim().is_empty() {
          stripped.push(before.to_string());
        }
        closed = true;
        break;
      }
      stripped.push(profile.strip_block_body(line).to_string());
    }
    // An unterminated block is malformed; refuse to recognize it.
    if !closed {
      return None;
    }
  }

  while idx < lines.len() && lines[idx].trim().is_empty() {
    idx += 1;
  }

  Some(CandidateBlock {
    stripped,
    range: start..idx,
  })
}
