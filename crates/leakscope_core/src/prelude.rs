//! Convenience re-exports of the most commonly used types.

pub use crate::change::{Commit, FileChange};
pub use crate::detector::{detect_entropy, detect_patterns};
pub use crate::entropy::{EntropyThresholds, shannon_entropy};
pub use crate::error::{FindingError, RuleError};
pub use crate::filter::should_skip;
pub use crate::finding::{Detector, Finding};
pub use crate::rules::{Rule, RuleCatalog};
pub use crate::severity::{SeverityTier, is_likely_secret};
