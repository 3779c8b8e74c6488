use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while escalating findings to the scorer.
#[derive(Debug, Error)]
pub enum EscalationError {
    /// The `OPENAI_API_KEY` environment variable is not set.
    #[error("OPENAI_API_KEY environment variable is not set")]
    MissingApiKey,

    /// The HTTP client could not be initialised.
    #[error("failed to initialize HTTP client: {0}")]
    ClientInit(String),

    /// An HTTP request to the scoring API failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The scoring request exceeded the configured timeout.
    #[error("scoring timed out after {0:?}")]
    Timeout(Duration),

    /// The scorer's response could not be interpreted.
    #[error("unparseable scorer response: {0}")]
    Parse(String),
}
