//! Severity classification of semantic scores.
//!
//! The scorer answers with an integer in `0..=4`; the mapping to tiers is a
//! total pure function, with anything outside the known scores collapsing to
//! [`SeverityTier::Info`].

use std::fmt;

use serde::Serialize;

/// Severity tier derived from a semantic score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    /// Score 4: an active, directly usable credential.
    Critical,
    /// Score 3: very likely a real secret.
    High,
    /// Score 2: plausibly a secret, needs review.
    Medium,
    /// Score 1: probably benign.
    Low,
    /// Score 0 or unrecognized: informational only.
    Info,
}

impl SeverityTier {
    /// Maps a score to its tier. Scores outside `1..=4` map to `Info`.
    #[must_use]
    pub fn from_score(score: i64) -> Self {
        match score {
            4 => Self::Critical,
            3 => Self::High,
            2 => Self::Medium,
            1 => Self::Low,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Info => "info",
        };
        f.write_str(name)
    }
}

/// Whether a score marks the finding as a likely real secret.
#[must_use]
pub fn is_likely_secret(score: i64) -> bool {
    score >= 3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_known_score_maps_to_its_tier() {
        assert_eq!(SeverityTier::from_score(4), SeverityTier::Critical);
        assert_eq!(SeverityTier::from_score(3), SeverityTier::High);
        assert_eq!(SeverityTier::from_score(2), SeverityTier::Medium);
        assert_eq!(SeverityTier::from_score(1), SeverityTier::Low);
        assert_eq!(SeverityTier::from_score(0), SeverityTier::Info);
    }

    #[test]
    fn out_of_range_scores_collapse_to_info() {
        assert_eq!(SeverityTier::from_score(-1), SeverityTier::Info);
        assert_eq!(SeverityTier::from_score(5), SeverityTier::Info);
        assert_eq!(SeverityTier::from_score(i64::MAX), SeverityTier::Info);
    }

    #[test]
    fn likely_secret_starts_at_score_three() {
        assert!(is_likely_secret(4));
        assert!(is_likely_secret(3));
        assert!(!is_likely_secret(2));
        assert!(!is_likely_secret(0));
        assert!(!is_likely_secret(-1));
    }

    #[test]
    fn tier_serializes_as_lowercase() {
        assert_eq!(
            serde_json::to_value(SeverityTier::Critical).unwrap(),
            "critical"
        );
        assert_eq!(serde_json::to_value(SeverityTier::Info).unwrap(), "info");
    }

    #[test]
    fn display_matches_serialization() {
        assert_eq!(SeverityTier::High.to_string(), "high");
        assert_eq!(SeverityTier::Medium.to_string(), "medium");
    }
}
