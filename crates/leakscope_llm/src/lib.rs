//! LLM escalation of heuristic findings for leakscope.
//!
//! Heuristic findings are cheap but noisy. This crate sends each finding,
//! together with its commit message and diff context, to a semantic scorer
//! and normalizes the answer into an [`Evaluation`] carrying a 0-4 score, a
//! confidence, and a short rationale. Scorer failures degrade to the zero
//! evaluation per finding; they never abort a batch.

mod error;
mod escalate;
mod scorer;

pub use error::EscalationError;
pub use escalate::{Escalator, Evaluation, parse_score_payload};
pub use scorer::{BoxFuture, OpenAiScorer, ScoreRequest, ScoreResponse, SecretScorer};

/// HTTP `User-Agent` header sent with scoring requests.
pub(crate) const USER_AGENT: &str = concat!("leakscope/", env!("CARGO_PKG_VERSION"));
