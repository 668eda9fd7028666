use crate::config::DispatchConfig;
use crate::errors::DispatchError;
use crate::judge::parse::parse_json_batch;
use crate::model::{JudgedRecord, Pair};
use crate::prompts;
use crate::providers::oracle::Oracle;
use std::time::Instant;

/// Each JSON array entry costs far more tokens than a bare True/False line.
const JSON_ANSWER_TOKENS_PER_PAIR: u32 = 64;

/// One prompt per batch; the oracle answers with a JSON array of
/// `{"index", "correct"}` objects, reassembled in index order. Any parse
/// failure or index-coverage gap aborts the whole run.
pub async fn judge_json_batched(
    oracle: &dyn Oracle,
    pairs: &[Pair],
    config: &DispatchConfig,
) -> Result<Vec<JudgedRecord>, DispatchError> {
    let batch_size = config.batch_size.max(1);
    let mut records = Vec::with_capacity(pairs.len());

    for batch in pairs.chunks(batch_size) {
        let prompt = prompts::json_batch_prompt(batch);
        let budget = JSON_ANSWER_TOKENS_PER_PAIR * batch.len() as u32;

        let started = Instant::now();
        let raw = oracle.generate(&prompt, config.temperature, budget).await?;
        let batch_latency = started.elapsed().as_secs_f64();

        let answers = parse_json_batch(&raw, batch.len())?;
        let per_pair_latency = batch_latency / batch.len() as f64;

        for (pair, (model_output, model_bool)) in batch.iter().zip(answers) {
            records.push(JudgedRecord::from_pair(
                pair.clone(),
                model_output,
                model_bool,
                per_pair_latency,
            ));
        }
    }
    Ok(records)
}
