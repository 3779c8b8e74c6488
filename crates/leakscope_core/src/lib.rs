//! Core detection pipeline for leakscope.
//!
//! This crate holds the pure parts of the git-history secret scan: the data
//! model for commits, per-file diffs, and findings, the pre-scan filter, the
//! regex rule catalog, the entropy heuristic, and the severity classifier.
//! Repository traversal and LLM escalation live in the companion crates so
//! this one stays free of I/O.
//!
//! # Main Types
//!
//! - [`RuleCatalog`] - Compiled regex rules with keyword pre-filtering
//! - [`Finding`] - A flagged candidate secret within one file change
//! - [`FileChange`] - The unified diff of one file in one commit
//! - [`SeverityTier`] - Five-tier classification of an escalation score
//!
//! # Error Handling
//!
//! This crate uses [`thiserror`] for structured, typed errors:
//!
//! - [`RuleError`] - Rule catalog compilation failures
//! - [`FindingError`] - Finding invariant violations
//!
//! The CLI crate (`leakscope_cli`) uses `anyhow` for error propagation.

/// Commit and file-change value types shared across the pipeline.
pub mod change;
/// The pattern and entropy detectors.
pub mod detector;
/// Shannon entropy and the entropy-based token classifier.
pub mod entropy;
/// Error types for rule compilation and finding validation.
pub mod error;
/// The pre-detection file-change filter.
pub mod filter;
/// Types representing flagged candidate secrets.
pub mod finding;
/// Common re-exports for internal use.
pub mod prelude;
/// Rule definitions and the keyword-indexed catalog.
pub mod rules;
/// Severity classification of semantic scores.
pub mod severity;

pub use change::{Commit, FileChange};
pub use detector::{detect_entropy, detect_patterns};
pub use entropy::{EntropyThresholds, shannon_entropy};
pub use error::{FindingError, RuleError};
pub use filter::should_skip;
pub use finding::{Detector, ENTROPY_CONFIDENCE, Finding, PATTERN_CONFIDENCE};
pub use rules::{Rule, RuleCatalog, RuleDef};
pub use severity::{SeverityTier, is_likely_secret};
