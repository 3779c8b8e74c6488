//! Shannon entropy and the shapes of tokens worth measuring.

use std::sync::LazyLock;

use regex::Regex;

static BASE64_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    #[expect(clippy::unwrap_used, reason = "literal pattern, verified by tests")]
    Regex::new(r"\A[A-Za-z0-9+/]{20,}={0,2}\z").unwrap()
});

static HEX_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    #[expect(clippy::unwrap_used, reason = "literal pattern, verified by tests")]
    Regex::new(r"\A[0-9A-Fa-f]{20,}\z").unwrap()
});

/// Per-category entropy thresholds, in bits per character.
///
/// A token's entropy must strictly exceed the threshold of its category for
/// a finding to be emitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntropyThresholds {
    /// Threshold for base64-shaped tokens.
    pub base64: f64,
    /// Threshold for hex-shaped tokens.
    pub hex: f64,
}

impl Default for EntropyThresholds {
    fn default() -> Self {
        Self {
            base64: 4.5,
            hex: 3.0,
        }
    }
}

/// Category a candidate token falls into, checked in order: base64 shape
/// first, then hex. A pure-hex run is also a valid base64 run, so it lands
/// in the base64 category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenShape {
    Base64,
    Hex,
}

impl TokenShape {
    /// Classifies a token, or returns `None` when it fits neither shape.
    pub(crate) fn classify(token: &str) -> Option<Self> {
        if BASE64_SHAPE.is_match(token) {
            Some(Self::Base64)
        } else if HEX_SHAPE.is_match(token) {
            Some(Self::Hex)
        } else {
            None
        }
    }

    pub(crate) fn finding_type(self) -> &'static str {
        match self {
            Self::Base64 => "High-entropy base64 string",
            Self::Hex => "High-entropy hex string",
        }
    }

    pub(crate) fn threshold(self, thresholds: EntropyThresholds) -> f64 {
        match self {
            Self::Base64 => thresholds.base64,
            Self::Hex => thresholds.hex,
        }
    }
}

/// Calculates Shannon entropy in bits per character.
///
/// Returns 0.0 for the empty string and for any string made of a single
/// repeated character; the maximum for byte-level analysis is 8.0.
#[must_use]
pub fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq = [0u32; 256];
    #[expect(
        clippy::cast_precision_loss,
        reason = "string length fits in f64 without meaningful loss"
    )]
    let len = s.len() as f64;

    for byte in s.bytes() {
        freq[byte as usize] += 1;
    }

    freq.iter()
        .copied()
        .filter(|&count| count > 0)
        .map(|count| {
            let p = f64::from(count) / len;
            -p * p.log2()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entropy_of_empty_string_is_zero() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn entropy_of_repeated_char_is_zero() {
        assert!((shannon_entropy("aaaaaaaaaaaaaaaaaaaa") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn entropy_of_two_alternating_chars_is_one_bit() {
        let entropy = shannon_entropy("abababab");
        assert!((entropy - 1.0).abs() < 0.001, "expected ~1.0, got {entropy}");
    }

    #[test]
    fn entropy_of_four_equal_chars_is_two_bits() {
        let entropy = shannon_entropy("abcdabcdabcd");
        assert!((entropy - 2.0).abs() < 0.001, "expected ~2.0, got {entropy}");
    }

    #[test]
    fn entropy_of_full_alphanumeric_is_near_six_bits() {
        let chars: String = ('a'..='z').chain('A'..='Z').chain('0'..='9').collect();
        let entropy = shannon_entropy(&chars);
        assert!(entropy > 5.9 && entropy < 6.0, "expected ~5.95, got {entropy}");
    }

    #[test]
    fn entropy_of_real_aws_secret_exceeds_base64_threshold_neighborhood() {
        let key = "wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY";
        let entropy = shannon_entropy(key);
        assert!(entropy > 4.0, "expected > 4.0, got {entropy}");
    }

    #[test]
    fn default_thresholds_match_documented_values() {
        let thresholds = EntropyThresholds::default();
        assert!((thresholds.base64 - 4.5).abs() < f64::EPSILON);
        assert!((thresholds.hex - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn classify_recognizes_base64_shape_with_padding() {
        assert_eq!(
            TokenShape::classify("dGhpcyBpcyBhIHNlY3JldA=="),
            Some(TokenShape::Base64)
        );
    }

    #[test]
    fn classify_prefers_base64_for_pure_hex_runs() {
        // Hex runs are a subset of the base64 alphabet, so they classify as
        // base64 and face the higher threshold.
        assert_eq!(
            TokenShape::classify("deadbeefdeadbeefdeadbeef"),
            Some(TokenShape::Base64)
        );
    }

    #[test]
    fn classify_recognizes_hex_only_when_base64_shape_fails() {
        // Interior padding breaks the base64 shape but hex has no '=' either,
        // so this token fits neither category.
        assert_eq!(TokenShape::classify("deadbeef=deadbeefdeadbeef"), None);
    }

    #[test]
    fn classify_rejects_short_tokens() {
        assert_eq!(TokenShape::classify("deadbeef"), None);
    }

    #[test]
    fn classify_rejects_tokens_with_foreign_chars() {
        assert_eq!(TokenShape::classify("not a token at all, far too spaced"), None);
    }

    #[test]
    fn finding_type_labels_are_stable() {
        assert_eq!(TokenShape::Base64.finding_type(), "High-entropy base64 string");
        assert_eq!(TokenShape::Hex.finding_type(), "High-entropy hex string");
    }

    #[test]
    fn threshold_selects_per_category_value() {
        let thresholds = EntropyThresholds {
            base64: 5.0,
            hex: 2.0,
        };
        assert!((TokenShape::Base64.threshold(thresholds) - 5.0).abs() < f64::EPSILON);
        assert!((TokenShape::Hex.threshold(thresholds) - 2.0).abs() < f64::EPSILON);
    }
}
