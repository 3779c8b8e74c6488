use thiserror::Error;

/// Errors that can occur when compiling the detection rule catalog.
#[derive(Debug, Error)]
pub enum RuleError {
    /// A rule's regular expression failed to compile.
    #[error("invalid regex in rule '{label}': {source}")]
    InvalidRegex {
        /// Label of the rule that failed (e.g. `"AWS Access Key ID"`).
        label: String,
        /// The underlying regex compilation error.
        #[source]
        source: regex::Error,
    },
}

/// Violations of the finding invariants, rejected at construction time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FindingError {
    /// The snippet was empty; every finding must carry the matched text.
    #[error("finding snippet must be a non-empty substring of the diff")]
    EmptySnippet,

    /// The confidence value fell outside `[0.0, 1.0]`.
    #[error("finding confidence {0} is outside the range 0.0..=1.0")]
    ConfidenceOutOfRange(f64),
}
