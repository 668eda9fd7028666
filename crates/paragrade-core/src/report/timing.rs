use serde::{Deserialize, Serialize};

/// Wall-clock figures for one judging run, reported alongside the scores so
/// strategies can be compared on speed as well as agreement.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RunTiming {
    /// Optional warmup/model-load call, 0.0 when skipped.
    pub warmup_secs: f64,
    pub total_secs: f64,
}

impl RunTiming {
    pub fn avg_ms_per_pair(&self, pairs: usize) -> f64 {
        if pairs == 0 {
            return 0.0;
        }
        self.total_secs / pairs as f64 * 1000.0
    }
}

/// Index-based percentile over per-call latencies, matching the reporting
/// convention p50 = sorted[len/2], p95 = sorted[len * 95 / 100].
pub fn latency_percentile(latencies: &[f64], quantile: f64) -> f64 {
    if latencies.is_empty() {
        return 0.0;
    }
    let mut sorted = latencies.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let idx = ((sorted.len() as f64 * quantile) as usize).min(sorted.len() - 1);
    sorted[idx]
}
