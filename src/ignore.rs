//! # Ignore Module
//!
//! This module compiles gitignore-style pattern lines into a matcher that
//! classifies relative paths as included or excluded.
//!
//! Supported semantics (gitignore-compatible subset):
//! - blank lines and `#` comments are skipped
//! - a trailing unescaped `/` marks a directory-only pattern
//! - a leading `/` anchors the pattern to the root; unanchored patterns match
//!   at any depth
//! - `*` matches within one path segment, `**` across segments, `?` matches
//!   one character, `[...]` matches a character class
//! - a leading `!` negates the rule; the last matching rule wins
//!
//! Malformed patterns (unbalanced brackets) never fail compilation: the rule
//! degrades to literal segment comparison and a warning is logged.

use tracing::warn;

/// Built-in directory exclusions applied ahead of any user ignore file.
/// User rules come later in evaluation order, so a negation can re-include.
const DEFAULT_EXCLUDE_DIRS: &[&str] = &[
  ".git/",
  ".svn/",
  ".hg/",
  "build/",
  "dist/",
  "target/",
  "out/",
  "bin/",
  "__pycache__/",
  ".pytest_cache/",
  ".mypy_cache/",
  "node_modules/",
  "vendor/",
  "third_party/",
  "venv/",
  ".venv/",
  "env/",
  ".env/",
  ".idea/",
  ".vscode/",
  ".vs/",
  "public/build/",
  "public/hot/",
  ".air/",
];

/// Built-in file exclusions: generated, minified, lock, and metadata files
/// that never want a license header.
const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
  "*.min.js",
  "*.min.css",
  "*.generated.*",
  "*.pb.go",
  "*.pb.cc",
  "*_pb2.py",
  "*.log",
  "*.json",
  "*.toml",
  "*.yml",
  "*.yaml",
  "*.lock",
  "*.sum",
  "*.md",
  "*.svg",
  "LICENSE",
  "NOTICE",
  "COPYING",
  ".gitkeep",
  ".gitignore",
  ".licenseignore",
  ".go-version",
  "go.mod",
  ".pre-commit-config.yaml",
  ".golangci.yml",
];

/// Returns the built-in exclusion pattern lines.
///
/// Callers compile these in front of user-supplied lines so that user rules
/// (including negations) take precedence.
pub fn default_patterns() -> impl Iterator<Item = &'static str> {
  DEFAULT_EXCLUDE_DIRS.iter().chain(DEFAULT_EXCLUDE_PATTERNS).copied()
}

/// A single compiled ignore rule.
#[derive(Debug, Clone)]
struct IgnoreRule {
  /// Pattern split on `/`, with markers (`!`, leading/trailing `/`) removed.
  segments: Vec<String>,
  /// Re-includes a previously excluded path when it matches.
  negated: bool,
  /// Matches only from the root rather than at any depth.
  anchored: bool,
  /// Matches the path's directories rather than the path itself.
  dir_only: bool,
  /// Degraded to exact segment comparison (malformed wildcard pattern).
  literal: bool,
}

/// Matcher compiled once per invocation from ignore-file lines.
///
/// Immutable after compilation and shared read-only across all path checks,
/// so it can be used freely from parallel workers.
#[derive(Debug, Clone, Default)]
pub struct IgnoreMatcher {
  rules: Vec<IgnoreRule>,
}

impl IgnoreMatcher {
  /// Compiles pattern lines into a matcher.
  ///
  /// Order is significant: later rules override earlier matches. Compilation
  /// never fails; malformed patterns degrade to literal matching.
  pub fn compile<I, S>(lines: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let mut rules = Vec::new();

    for line in lines {
      let line = line.as_ref().trim();
      if line.is_empty() || line.starts_with('#') {
        continue;
      }

      let (negated, rest) = match line.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, line),
      };

      let (dir_only, rest) = if rest.ends_with('/') && !rest.ends_with("\\/") {
        (true, rest.trim_end_matches('/'))
      } else {
        (false, rest)
      };

      let (anchored, rest) = match rest.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, rest),
      };

      let pattern = rest.replace("\\/", "/");
      if pattern.is_empty() {
        continue;
      }

      let literal = !brackets_balanced(&pattern);
      if literal {
        warn!(pattern = %line, "malformed ignore pattern, matching literally");
      }

      rules.push(IgnoreRule {
        segments: pattern.split('/').filter(|s| !s.is_empty()).map(str::to_string).collect(),
        negated,
        anchored,
        dir_only,
        literal,
      });
    }

    Self { rules }
  }

  /// Classifies a relative path.
  ///
  /// Rules are tested in file order and the last matching rule wins; a path
  /// that matches no rule is included by default. Matching is case-sensitive
  /// and purely textual (no symlink resolution).
  pub fn is_ignored(&self, relative_path: &str) -> bool {
    let normalized = relative_path.replace('\\', "/");
    let path: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();

    let mut ignored = false;
    for rule in &self.rules {
      if rule.matches(&path) {
        ignored = !rule.negated;
      }
    }
    ignored
  }

  /// Number of compiled rules.
  pub fn len(&self) -> usize {
    self.rules.len()
  }

  /// True when no rules were compiled.
  pub fn is_empty(&self) -> bool {
    self.rules.is_empty()
  }
}

impl IgnoreRule {
  fn matches(&self, path: &[&str]) -> bool {
    if self.dir_only {
      // Directory patterns match the path itself or any of its ancestors.
      (1..=path.len()).any(|k| self.matches_target(&path[..k]))
    } else {
      self.matches_target(path)
    }
  }

  fn matches_target(&self, target: &[&str]) -> bool {
    if self.anchored {
      match_segments(&self.segments, target, self.literal)
    } else {
      // Unanchored patterns match against every suffix of path segments.
      (0..target.len()).any(|i| match_segments(&self.segments, &target[i..], self.literal))
    }
  }
}

/// Matches a pattern segment sequence against a path segment sequence.
/// `**` matches zero or more whole segments.
fn match_segments(pattern: &[String], path: &[&str], literal: bool) -> bool {
  match pattern.first() {
    None => path.is_empty(),
    Some(seg) if seg == "**" && !literal => (0..=path.len()).any(|i| match_segments(&pattern[1..], &path[i..], literal)),
    Some(seg) => match path.first() {
      Some(head) if match_one(seg, head, literal) => match_segments(&pattern[1..], &path[1..], literal),
      _ => false,
    },
  }
}

fn match_one(pattern: &str, segment: &str, literal: bool) -> bool {
  if literal {
    pattern == segment
  } else {
    let pat: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = segment.chars().collect();
    glob_match(&pat, &text)
  }
}

/// Wildcard match within a single path segment.
/// Only called on patterns with balanced brackets.
fn glob_match(pattern: &[char], text: &[char]) -> bool {
  let Some(&first) = pattern.first() else {
    return text.is_empty();
  };

  match first {
    '*' => glob_match(&pattern[1..], text) || (!text.is_empty() && glob_match(pattern, &text[1..])),
    '?' => !text.is_empty() && glob_match(&pattern[1..], &text[1..]),
    '[' => {
      let Some(close) = find_class_end(pattern) else {
        // Unreachable for validated patterns; treat as a literal bracket.
        return !text.is_empty() && text[0] == '[' && glob_match(&pattern[1..], &text[1..]);
      };
      let Some(&ch) = text.first() else {
        return false;
      };
      class_contains(&pattern[1..close], ch) && glob_match(&pattern[close + 1..], &text[1..])
    }
    c => !text.is_empty() && text[0] == c && glob_match(&pattern[1..], &text[1..]),
  }
}

/// Finds the index of the `]` closing a class that starts at `pattern[0]`.
/// A `]` in first position (after optional negation) is a literal member.
fn find_class_end(pattern: &[char]) -> Option<usize> {
  let mut i = 1;
  if pattern.get(i).is_some_and(|&c| c == '!' || c == '^') {
    i += 1;
  }
  if pattern.get(i).is_some_and(|&c| c == ']') {
    i += 1;
  }
  while i < pattern.len() {
    if pattern[i] == ']' {
      return Some(i);
    }
    i += 1;
  }
  None
}

/// Tests membership of `ch` in a character class body (between brackets).
fn class_contains(body: &[char], ch: char) -> bool {
  let (negated, body) = match body.first() {
    Some('!') | Some('^') => (true, &body[1..]),
    _ => (false, body),
  };

  let mut contains = false;
  let mut i = 0;
  while i < body.len() {
    if i + 2 < body.len() && body[i + 1] == '-' {
      if body[i] <= ch && ch <= body[i + 2] {
        contains = true;
      }
      i += 3;
    } else {
      if body[i] == ch {
        contains = true;
      }
      i += 1;
    }
  }

  contains != negated
}

/// Checks that every `[` opens a class closed by a later `]`.
fn brackets_balanced(pattern: &str) -> bool {
  let chars: Vec<char> = pattern.chars().collect();
  let mut i = 0;
  while i < chars.len() {
    if chars[i] == '[' {
      match find_class_end(&chars[i..]) {
        Some(end) => i += end + 1,
        None => return false,
      }
    } else {
      i += 1;
    }
  }
  true
}
