//! # Comment Style Module
//!
//! This module maps filenames to the comment syntax used to embed a license
//! header in that file type. Resolution is pure and filename-only: exact
//! matches on special extension-less files (`Makefile`, `Dockerfile`, ...)
//! win over case-insensitive extension lookups, and unknown types fall back
//! to hash line comments so every file resolves to *some* profile.

/// Comment syntax profile for a file type.
///
/// Exactly one variant applies per file. `Line` profiles prefix every header
/// line independently; `Block` profiles emit a single open/close pair around
/// the whole header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentProfile {
  /// Line comments, e.g. `# ...` or `// ...`.
  Line {
    /// Comment marker without trailing space (e.g. `#`, `//`).
    prefix: &'static str,
  },
  /// Block comments, e.g. `/* ... */` or `<!-- ... -->`.
  Block {
    /// Opening marker emitted on its own line.
    open: &'static str,
    /// Per-line prefix inside the block, including trailing space when
    /// non-empty (e.g. `" * "`). Empty for markup blocks.
    line_prefix: &'static str,
    /// Closing marker emitted on its own line.
    close: &'static str,
  },
}

const HASH: CommentProfile = CommentProfile::Line { prefix: "#" };
const SLASH: CommentProfile = CommentProfile::Line { prefix: "//" };
const DASH: CommentProfile = CommentProfile::Line { prefix: "--" };
const QUOTE: CommentProfile = CommentProfile::Line { prefix: "\"" };
const CSS_BLOCK: CommentProfile = CommentProfile::Block {
  open: "/*",
  line_prefix: " * ",
  close: " */",
};
const MARKUP_BLOCK: CommentProfile = CommentProfile::Block {
  open: "<!--",
  line_prefix: " ",
  close: "-->",
};

/// Extension-less files that are still valid source, with their profiles.
/// Matched case-sensitively against the full filename.
const SPECIAL_FILES: &[(&str, CommentProfile)] = &[
  ("Dockerfile", HASH),
  ("Makefile", HASH),
  ("Jenkinsfile", SLASH),
  ("Vagrantfile", HASH),
  ("Rakefile", HASH),
  ("Gemfile", HASH),
  ("Podfile", HASH),
  ("Fastfile", HASH),
  ("CMakeLists.txt", HASH),
];

impl CommentProfile {
  /// Resolves the comment profile for a filename.
  ///
  /// This is a total function: files with unknown or missing extensions
  /// resolve to the default hash line profile. Only the filename is
  /// consulted, never the file content.
  pub fn resolve(filename: &str) -> Self {
    for (name, profile) in SPECIAL_FILES {
      if filename == *name {
        return *profile;
      }
    }

    let Some((stem, extension)) = filename.rsplit_once('.') else {
      return HASH;
    };
    // Dotfiles like ".bashrc" have no extension in the usual sense.
    if stem.is_empty() {
      return HASH;
    }

    match extension.to_lowercase().as_str() {
      "sh" | "bash" | "zsh" | "fish" | "py" | "rb" | "pl" | "r" | "yaml" | "yml" | "toml" | "cmake" => HASH,
      "go" | "js" | "jsx" | "ts" | "tsx" | "c" | "cpp" | "cc" | "cxx" | "h" | "hpp" | "hh" | "hxx" | "java"
      | "scala" | "kt" | "swift" | "cs" | "rs" | "php" | "m" | "mm" | "gradle" | "groovy" | "scss" | "sass"
      | "less" => SLASH,
      "sql" | "lua" | "hs" | "elm" => DASH,
      "vim" => QUOTE,
      "css" => CSS_BLOCK,
      "html" | "xml" | "svg" => MARKUP_BLOCK,
      _ => HASH,
    }
  }

  /// Returns true for line-comment families.
  pub const fn is_line(&self) -> bool {
    matches!(self, Self::Line { .. })
  }

  /// Renders one line of header text as a comment body line.
  ///
  /// Empty text renders as the bare marker (no trailing whitespace).
  pub fn render_line(&self, text: &str) -> String {
    match self {
      Self::Line { prefix } => {
        if text.is_empty() {
          (*prefix).to_string()
        } else {
          format!("{prefix} {text}")
        }
      }
      Self::Block { line_prefix, .. } => {
        if text.is_empty() {
          line_prefix.trim_end().to_string()
        } else {
          format!("{line_prefix}{text}")
        }
      }
    }
  }

  /// Wraps header text lines in this comment syntax.
  ///
  /// Line families prefix every line independently; block families emit a
  /// single open/close pair around all lines.
  pub fn wrap(&self, lines: &[String]) -> Vec<String> {
    match self {
      Self::Line { .. } => lines.iter().map(|l| self.render_line(l)).collect(),
      Self::Block { open, close, .. } => {
        let mut out = Vec::with_capacity(lines.len() + 2);
        out.push((*open).to_string());
        out.extend(lines.iter().map(|l| self.render_line(l)));
        out.push((*close).to_string());
        out
      }
    }
  }

  /// Strips the line-comment marker from a line, returning the inner text.
  ///
  /// Returns `None` if the line is not a comment under a `Line` profile, and
  /// always `None` for `Block` profiles (block scanning is driven by the
  /// open/close markers instead).
  pub fn strip_line<'a>(&self, line: &'a str) -> Option<&'a str> {
    match self {
      Self::Line { prefix } => {
        let rest = line.strip_prefix(prefix)?;
        Some(rest.strip_prefix(' ').unwrap_or(rest))
      }
      Self::Block { .. } => None,
    }
  }

  /// Strips the block body prefix from an interior block line.
  ///
  /// Lines inside a block are comment text by position, so this never
  /// rejects a line: it removes the body prefix when present and otherwise
  /// returns the line with leading whitespace intact only past the marker.
  pub fn strip_block_body<'a>(&self, line: &'a str) -> &'a str {
    match self {
      Self::Line { .. } => line,
      Self::Block { line_prefix, .. } => {
        if let Some(rest) = line.strip_prefix(line_prefix) {
          return rest;
        }
        // Tolerate marker-only lines and missing trailing space.
        let marker = line_prefix.trim();
        if marker.is_empty() {
          return line.strip_prefix(' ').unwrap_or(line);
        }
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix(marker) {
          return rest.strip_prefix(' ').unwrap_or(rest);
        }
        trimmed
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_resolve_special_files() {
    assert_eq!(CommentProfile::resolve("Makefile"), CommentProfile::Line { prefix: "#" });
    assert_eq!(
      CommentProfile::resolve("Dockerfile"),
      CommentProfile::Line { prefix: "#" }
    );
    assert_eq!(
      CommentProfile::resolve("Jenkinsfile"),
      CommentProfile::Line { prefix: "//" }
    );
    assert_eq!(
      CommentProfile::resolve("CMakeLists.txt"),
      CommentProfile::Line { prefix: "#" }
    );
  }

  #[test]
  fn test_special_files_are_case_sensitive() {
    // "makefile" is not the special name; falls through to default
    assert_eq!(CommentProfile::resolve("makefile"), CommentProfile::Line { prefix: "#" });
    // but "jenkinsfile" loses its slash profile
    assert_eq!(
      CommentProfile::resolve("jenkinsfile"),
      CommentProfile::Line { prefix: "#" }
    );
  }

  #[test]
  fn test_resolve_by_extension() {
    assert_eq!(CommentProfile::resolve("app.rs"), CommentProfile::Line { prefix: "//" });
    assert_eq!(CommentProfile::resolve("script.py"), CommentProfile::Line { prefix: "#" });
    assert_eq!(
      CommentProfile::resolve("query.sql"),
      CommentProfile::Line { prefix: "--" }
    );
    assert_eq!(
      CommentProfile::resolve("style.css"),
      CommentProfile::Block {
        open: "/*",
        line_prefix: " * ",
        close: " */",
      }
    );
    assert_eq!(
      CommentProfile::resolve("index.html"),
      CommentProfile::Block {
        open: "<!--",
        line_prefix: " ",
        close: "-->",
      }
    );
  }

  #[test]
  fn test_extension_match_is_case_insensitive() {
    assert_eq!(CommentProfile::resolve("MAIN.RS"), CommentProfile::Line { prefix: "//" });
    assert_eq!(CommentProfile::resolve("Setup.PY"), CommentProfile::Line { prefix: "#" });
  }

  #[test]
  fn test_resolve_unknown_defaults_to_hash() {
    assert_eq!(
      CommentProfile::resolve("unknown.xyz"),
      CommentProfile::Line { prefix: "#" }
    );
    assert_eq!(CommentProfile::resolve("README"), CommentProfile::Line { prefix: "#" });
    assert_eq!(
      CommentProfile::resolve(".gitattributes"),
      CommentProfile::Line { prefix: "#" }
    );
  }

  #[test]
  fn test_render_line() {
    let hash = CommentProfile::resolve("a.py");
    assert_eq!(hash.render_line("SPDX-License-Identifier: MIT"), "# SPDX-License-Identifier: MIT");
    assert_eq!(hash.render_line(""), "#");

    let css = CommentProfile::resolve("a.css");
    assert_eq!(css.render_line("hello"), " * hello");
    assert_eq!(css.render_line(""), " *");
  }

  #[test]
  fn test_wrap_line_family() {
    let profile = CommentProfile::resolve("a.rs");
    let wrapped = profile.wrap(&["first".to_string(), "second".to_string()]);
    assert_eq!(wrapped, vec!["// first", "// second"]);
  }

  #[test]
  fn test_wrap_block_family_single_pair() {
    let profile = CommentProfile::resolve("a.css");
    let wrapped = profile.wrap(&["first".to_string(), "second".to_string()]);
    assert_eq!(wrapped, vec!["/*", " * first", " * second", " */"]);
  }

  #[test]
  fn test_strip_line() {
    let hash = CommentProfile::resolve("a.py");
    assert_eq!(hash.strip_line("# hello"), Some("hello"));
    assert_eq!(hash.strip_line("#hello"), Some("hello"));
    assert_eq!(hash.strip_line("#"), Some(""));
    assert_eq!(hash.strip_line("hello"), None);

    let slash = CommentProfile::resolve("a.rs");
    assert_eq!(slash.strip_line("// hello"), Some("hello"));
    assert_eq!(slash.strip_line("# hello"), None);
  }

  #[test]
  fn test_strip_block_body() {
    let css = CommentProfile::resolve("a.css");
    assert_eq!(css.strip_block_body(" * hello"), "hello");
    assert_eq!(css.strip_block_body(" *"), "");
    assert_eq!(css.strip_block_body("hello"), "hello");

    let markup = CommentProfile::resolve("a.html");
    assert_eq!(markup.strip_block_body(" hello"), "hello");
  }
}
