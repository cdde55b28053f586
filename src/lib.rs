//! # spdxify
//!
//! A tool that keeps SPDX license and copyright headers present and current
//! in source files.
//!
//! `spdxify` scans a directory tree (or an explicit file list), recognizes
//! existing `SPDX-License-Identifier` headers, and inserts, extends, or
//! replaces them to match a requested license, author, and year. It modifies
//! files in place in fix mode and reports what would change in check mode,
//! making it suitable for CI gates and pre-commit hooks.
//!
//! ## Features
//!
//! * Comment style detection per file type (hash, slash, and block families)
//! * gitignore-semantics ignore patterns with `.licenseignore`/`.gitignore`
//!   discovery
//! * Monotonic copyright year ranges that only ever extend forward
//! * Notice block templates appended after the copyright line
//! * Check-only mode with diff preview and JSON reporting
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! use spdxify::header::HeaderRequest;
//! use spdxify::ignore::{IgnoreMatcher, default_patterns};
//! use spdxify::processor::{Processor, ProcessorConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let processor = Processor::new(ProcessorConfig {
//!         request: HeaderRequest {
//!             license_id: "MIT".to_string(),
//!             author: "ACME Corp".to_string(),
//!             year: 2025,
//!             notice_lines: Vec::new(),
//!         },
//!         matcher: IgnoreMatcher::compile(default_patterns()),
//!         root: PathBuf::from("src"),
//!         check_only: true,
//!         recursive: true,
//!         diff_manager: None,
//!     });
//!
//!     let files = processor.collect_files(&[])?;
//!     let has_changes = processor.process(files)?;
//!
//!     if has_changes {
//!         println!("Some files need header updates");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`comment_style`] - Comment profile resolution per file type
//! * [`ignore`] - gitignore-semantics path matching
//! * [`header`] - SPDX header recognition
//! * [`plan`] - Header synthesis and year-range merging
//! * [`processor`] - Traversal and per-file processing

pub mod cli;
pub mod comment_style;
pub mod config;
pub mod diff;
pub mod header;
pub mod ignore;
pub mod logging;
pub mod notice;
pub mod output;
pub mod plan;
pub mod processor;
pub mod report;
