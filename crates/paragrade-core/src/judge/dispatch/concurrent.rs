use crate::config::DispatchConfig;
use crate::errors::DispatchError;
use crate::judge::normalize::normalize_bool;
use crate::model::{JudgedRecord, Pair};
use crate::prompts;
use crate::providers::oracle::Oracle;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Per-item work identical to the sequential strategy, dispatched across a
/// bounded pool: at most `max_concurrency` calls in flight, independent of
/// total pair count. Results are harvested in completion order; each record
/// carries its full pair, so callers must not assume input order. The first
/// failure aborts the run; dropping the join set aborts still-running calls.
pub async fn judge_concurrent(
    oracle: Arc<dyn Oracle>,
    pairs: &[Pair],
    config: &DispatchConfig,
) -> Result<Vec<JudgedRecord>, DispatchError> {
    let semaphore = Arc::new(Semaphore::new(config.max_concurrency.max(1)));
    let mut join_set = JoinSet::new();

    for pair in pairs.iter().cloned() {
        let oracle = oracle.clone();
        let semaphore = semaphore.clone();
        let temperature = config.temperature;
        let max_output_tokens = config.max_output_tokens;
        join_set.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|e| anyhow::anyhow!("worker pool closed: {e}"))?;

            let prompt = prompts::judge_prompt(&pair);
            let started = Instant::now();
            let raw = oracle
                .generate(&prompt, temperature, max_output_tokens)
                .await?;
            let latency_sec = started.elapsed().as_secs_f64();

            let model_bool = normalize_bool(&raw);
            Ok::<_, anyhow::Error>(JudgedRecord::from_pair(pair, raw, model_bool, latency_sec))
        });
    }

    let mut records = Vec::with_capacity(pairs.len());
    while let Some(joined) = join_set.join_next().await {
        let record =
            joined.map_err(|e| anyhow::anyhow!("judge task failed to complete: {e}"))??;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::oracle::FakeOracle;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn pairs(n: usize) -> Vec<Pair> {
        (0..n)
            .map(|i| Pair {
                test_id: format!("t{i}"),
                expected_error: format!("expected {i}"),
                student_error: format!("student {i}"),
                label: true,
            })
            .collect()
    }

    /// Records the high-water mark of simultaneously in-flight calls.
    struct GaugeOracle {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl Oracle for GaugeOracle {
        async fn generate(
            &self,
            _prompt: &str,
            _temperature: f32,
            _max_output_tokens: u32,
        ) -> anyhow::Result<String> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok("True".to_string())
        }

        fn name(&self) -> &'static str {
            "gauge"
        }
    }

    #[tokio::test]
    async fn output_multiset_matches_input_regardless_of_order() {
        let input = pairs(12);
        let oracle = Arc::new(FakeOracle::with_response("True"));
        let config = DispatchConfig {
            max_concurrency: 3,
            ..DispatchConfig::default()
        };
        let records = judge_concurrent(oracle, &input, &config).await.unwrap();

        let mut got: Vec<String> = records.iter().map(|r| r.test_id.clone()).collect();
        let mut want: Vec<String> = input.iter().map(|p| p.test_id.clone()).collect();
        got.sort();
        want.sort();
        assert_eq!(got, want);
    }

    #[tokio::test]
    async fn records_keep_their_own_pair_data() {
        let input = pairs(6);
        let oracle = Arc::new(FakeOracle::with_response("True"));
        let records = judge_concurrent(oracle, &input, &DispatchConfig::default())
            .await
            .unwrap();
        for record in records {
            let i: usize = record.test_id[1..].parse().unwrap();
            assert_eq!(record.expected_error, format!("expected {i}"));
            assert_eq!(record.student_error, format!("student {i}"));
        }
    }

    #[tokio::test]
    async fn concurrency_never_exceeds_the_cap() {
        let oracle = Arc::new(GaugeOracle {
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        });
        let config = DispatchConfig {
            max_concurrency: 4,
            ..DispatchConfig::default()
        };
        judge_concurrent(oracle.clone(), &pairs(20), &config)
            .await
            .unwrap();
        assert!(oracle.peak.load(Ordering::SeqCst) <= 4);
    }

    #[tokio::test]
    async fn any_failure_aborts_the_run() {
        // queue shorter than the pair count: one task must fail
        let oracle = Arc::new(FakeOracle::with_queue(vec!["True".into(), "True".into()]));
        let err = judge_concurrent(oracle, &pairs(4), &DispatchConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::Oracle(_)));
    }
}
