use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Fatal conditions raised while dispatching pairs to the oracle. Every
/// variant aborts the run; no item is skipped and no batch is retried.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Transport failure: the oracle call returned a non-success status or
    /// could not complete.
    #[error("oracle call failed: {0}")]
    Oracle(#[from] anyhow::Error),

    /// The number of verdicts recovered from a batched response does not
    /// match the batch's pair count, or the JSON index set does not cover
    /// exactly `1..=expected`.
    #[error("could not recover {expected} verdicts from oracle output (got {got}):\n{raw}")]
    BatchSizeMismatch {
        expected: usize,
        got: usize,
        raw: String,
    },

    /// The JSON-batched response is not parseable as an array, even after
    /// bracket extraction, or the top-level value is not an array.
    #[error("failed to parse JSON verdict array from oracle output: {reason}\n{raw}")]
    MalformedBatchJson { reason: String, raw: String },
}

#[derive(Debug)]
pub struct ConfigError(pub String);

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ConfigError: {}", self.0)
    }
}
impl std::error::Error for ConfigError {}
