//! `mdlsync_core` is the core library for the `mdlsync` tool. It keeps the
//! constant values of Vensim-style model files (`mdl`) synchronized with
//! calibration output files (`out`, `cin`, `voc`, …) and performs safe bulk
//! renaming of variables across whole suites of text-readable model files.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Calibration output file
//!   → Lexer (tokenizes each physical line with byte spans)
//!   → Line parser (classifies lines, resolves names, discards bound syntax)
//!   → Extractor (ordered sequence of name = value assignments)
//!   → Engine (rewrites matching value literals in the model file in place)
//! ```
//!
//! The rename engine is independent of the pipeline above: it compiles a
//! dictionary of old → new names into a single longest-key-first matcher and
//! rewrites arbitrary text in one pass.
//!
//! ## Modules
//!
//! - [`config`] — Configuration loading from `mdlsync.toml`, including backup
//!   behavior and file size limits.
//!
//! ## Key Types
//!
//! - [`Assignment`] — A parsed `name = value` pair extracted from text.
//! - [`ApplyOutcome`] — How one assignment attempt against a model document
//!   concluded: applied, no anchored match, or unsupported compact form.
//! - [`Substitution`] — The rewritten document plus per-assignment outcomes.
//! - [`RuleSet`] — A longest-key-first rename dictionary.
//! - [`MdlsyncConfig`] — Configuration loaded from `mdlsync.toml`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use mdlsync_core::DEFAULT_BACKUP_SUFFIX;
//! use mdlsync_core::DEFAULT_MAX_FILE_SIZE;
//! use mdlsync_core::compute_param_sync;
//! use mdlsync_core::write_param_sync;
//!
//! let sync = compute_param_sync(
//! 	Path::new("calibration.out"),
//! 	Path::new("model.mdl"),
//! 	DEFAULT_MAX_FILE_SIZE,
//! )
//! .unwrap();
//!
//! if sync.is_changed() {
//! 	write_param_sync(&sync, Some(DEFAULT_BACKUP_SUFFIX)).unwrap();
//! }
//! ```

pub use config::*;
pub use engine::*;
pub use error::*;
pub use parser::*;
pub use rename::*;

pub mod config;
mod engine;
mod error;
pub(crate) mod lexer;
mod parser;
mod rename;

#[cfg(test)]
mod __fixtures;
