//! Pre-detection exclusion of file changes.

use std::sync::LazyLock;

use regex::Regex;

static VENDOR_DIR: LazyLock<Regex> = LazyLock::new(|| {
    #[expect(clippy::unwrap_used, reason = "literal pattern, verified by tests")]
    Regex::new(r"(?i)(^|/)(vendor|node_modules|third_party)(/|$)").unwrap()
});

static TEST_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    #[expect(clippy::unwrap_used, reason = "literal pattern, verified by tests")]
    Regex::new(r"(?i)(^|/)(test|tests|spec|unit|integration)(/|_)").unwrap()
});

static TEST_FILENAME: LazyLock<Regex> = LazyLock::new(|| {
    #[expect(clippy::unwrap_used, reason = "literal pattern, verified by tests")]
    Regex::new(r"(?i)[_\-]?tests?\.(py|java|js|ts)$").unwrap()
});

/// Decides whether a file change is excluded from detection.
///
/// A change is skipped when its path sits under a vendored-dependency
/// directory, when the path follows a test-file convention, or when the diff
/// text is empty or whitespace-only. First match wins; the predicate is pure
/// and order-stable.
#[must_use]
pub fn should_skip(file_path: &str, diff_content: &str) -> bool {
    if VENDOR_DIR.is_match(file_path) {
        #[cfg(feature = "tracing")]
        tracing::debug!(file = %file_path, "skipping vendored path");
        return true;
    }

    if TEST_SEGMENT.is_match(file_path) || TEST_FILENAME.is_match(file_path) {
        #[cfg(feature = "tracing")]
        tracing::debug!(file = %file_path, "skipping test path");
        return true;
    }

    if diff_content.trim().is_empty() {
        #[cfg(feature = "tracing")]
        tracing::debug!(file = %file_path, "skipping whitespace-only diff");
        return true;
    }

    false
}
