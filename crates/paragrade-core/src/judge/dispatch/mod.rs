mod concurrent;
mod json_batch;
mod line_batch;
mod sequential;

pub use concurrent::judge_concurrent;
pub use json_batch::judge_json_batched;
pub use line_batch::judge_line_batched;
pub use sequential::judge_sequential;

use crate::config::DispatchConfig;
use crate::errors::DispatchError;
use crate::model::{JudgedRecord, Pair};
use crate::prompts;
use crate::providers::oracle::Oracle;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Dispatch policy: how an ordered collection of pairs becomes judged
/// records. All strategies return the same multiset of `test_id`s as the
/// input; only `Concurrent` may return them out of input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Sequential,
    LineBatched,
    JsonBatched,
    Concurrent,
}

pub async fn judge_pairs(
    strategy: Strategy,
    oracle: Arc<dyn Oracle>,
    pairs: &[Pair],
    config: &DispatchConfig,
) -> Result<Vec<JudgedRecord>, DispatchError> {
    tracing::info!(
        strategy = ?strategy,
        pairs = pairs.len(),
        oracle = oracle.name(),
        "dispatching judge run"
    );
    match strategy {
        Strategy::Sequential => judge_sequential(oracle.as_ref(), pairs, config).await,
        Strategy::LineBatched => judge_line_batched(oracle.as_ref(), pairs, config).await,
        Strategy::JsonBatched => judge_json_batched(oracle.as_ref(), pairs, config).await,
        Strategy::Concurrent => judge_concurrent(oracle, pairs, config).await,
    }
}

/// Optional warmup call so model load time is not billed to the first real
/// pair. Returns the elapsed seconds.
pub async fn warmup(oracle: &dyn Oracle) -> anyhow::Result<f64> {
    let started = Instant::now();
    oracle.generate(prompts::WARMUP_PROMPT, 0.0, 4).await?;
    Ok(started.elapsed().as_secs_f64())
}
