use crate::config::DispatchConfig;
use crate::errors::DispatchError;
use crate::judge::normalize::normalize_bool;
use crate::judge::parse::parse_line_batch;
use crate::model::{JudgedRecord, Pair};
use crate::prompts;
use crate::providers::oracle::Oracle;
use std::time::Instant;

/// One prompt per batch, one boolean-like line expected per pair. A batch
/// whose response cannot be resolved to exactly `batch.len()` answers aborts
/// the whole run.
pub async fn judge_line_batched(
    oracle: &dyn Oracle,
    pairs: &[Pair],
    config: &DispatchConfig,
) -> Result<Vec<JudgedRecord>, DispatchError> {
    let batch_size = config.batch_size.max(1);
    let mut records = Vec::with_capacity(pairs.len());

    for batch in pairs.chunks(batch_size) {
        let prompt = prompts::line_batch_prompt(batch);
        // a few tokens per answer
        let budget = config.max_output_tokens * batch.len() as u32;

        let started = Instant::now();
        let raw = oracle.generate(&prompt, config.temperature, budget).await?;
        let batch_latency = started.elapsed().as_secs_f64();

        let answers = parse_line_batch(&raw, batch.len())?;
        // per-example latency inside this batch is approximate
        let per_pair_latency = batch_latency / batch.len() as f64;

        for (pair, answer) in batch.iter().zip(answers) {
            let model_bool = normalize_bool(&answer);
            records.push(JudgedRecord::from_pair(
                pair.clone(),
                answer,
                model_bool,
                per_pair_latency,
            ));
        }
    }
    Ok(records)
}
