use crate::config::DispatchConfig;
use crate::errors::DispatchError;
use crate::judge::normalize::normalize_bool;
use crate::model::{JudgedRecord, Pair};
use crate::prompts;
use crate::providers::oracle::Oracle;
use std::time::Instant;

/// One oracle call per pair, strictly in input order. The latency/ordering
/// baseline: fully deterministic given a deterministic oracle.
pub async fn judge_sequential(
    oracle: &dyn Oracle,
    pairs: &[Pair],
    config: &DispatchConfig,
) -> Result<Vec<JudgedRecord>, DispatchError> {
    let mut records = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let prompt = prompts::judge_prompt(pair);

        let started = Instant::now();
        let raw = oracle
            .generate(&prompt, config.temperature, config.max_output_tokens)
            .await?;
        let latency_sec = started.elapsed().as_secs_f64();

        let model_bool = normalize_bool(&raw);
        tracing::debug!(test_id = %pair.test_id, verdict = model_bool, "judged pair");
        records.push(JudgedRecord::from_pair(pair.clone(), raw, model_bool, latency_sec));
    }
    Ok(records)
}
