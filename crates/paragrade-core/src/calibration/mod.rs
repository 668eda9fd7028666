pub mod model;

pub use model::CalibrationResult;

use crate::report;

pub const THRESHOLD_GRID_START: f64 = 0.50;
pub const THRESHOLD_GRID_END: f64 = 0.95;
pub const THRESHOLD_GRID_STEPS: usize = 10;

/// Ten evenly spaced candidate thresholds, endpoints inclusive.
pub fn threshold_grid() -> Vec<f64> {
    (0..THRESHOLD_GRID_STEPS)
        .map(|i| {
            THRESHOLD_GRID_START
                + (THRESHOLD_GRID_END - THRESHOLD_GRID_START) * i as f64
                    / (THRESHOLD_GRID_STEPS - 1) as f64
        })
        .collect()
}

/// Per-pair similarity between expected-side and student-side embeddings.
/// Inputs are unit-normalized, so the dot product equals cosine similarity.
pub fn similarity_scores(
    expected: &[Vec<f32>],
    student: &[Vec<f32>],
) -> anyhow::Result<Vec<f64>> {
    if expected.len() != student.len() {
        anyhow::bail!(
            "embedding count mismatch: {} expected-side vs {} student-side",
            expected.len(),
            student.len()
        );
    }
    expected
        .iter()
        .zip(student)
        .map(|(a, b)| dot(a, b))
        .collect()
}

fn dot(a: &[f32], b: &[f32]) -> anyhow::Result<f64> {
    if a.len() != b.len() {
        anyhow::bail!("embedding dimension mismatch: {} vs {}", a.len(), b.len());
    }
    Ok(a.iter()
        .zip(b)
        .map(|(x, y)| f64::from(*x) * f64::from(*y))
        .sum())
}

/// Sweep the threshold grid in ascending order; predicted label is
/// `similarity >= threshold`. The best accuracy wins, and only a strict
/// improvement replaces the incumbent, so ties keep the lower threshold.
pub fn sweep(similarities: &[f64], labels: &[bool]) -> anyhow::Result<CalibrationResult> {
    if similarities.len() != labels.len() {
        anyhow::bail!(
            "similarity/label count mismatch: {} vs {}",
            similarities.len(),
            labels.len()
        );
    }

    let mut best: Option<CalibrationResult> = None;
    for threshold in threshold_grid() {
        let predictions: Vec<bool> = similarities.iter().map(|&s| s >= threshold).collect();
        let scored = report::score_preds(labels, &predictions);
        let improves = best
            .as_ref()
            .map(|b| scored.accuracy > b.accuracy)
            .unwrap_or(true);
        if improves {
            best = Some(CalibrationResult {
                threshold,
                accuracy: scored.accuracy,
                true_class: scored.true_class,
                false_class: scored.false_class,
                predictions,
            });
        }
    }
    best.ok_or_else(|| anyhow::anyhow!("threshold grid is empty"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_spans_endpoints_with_ten_steps() {
        let grid = threshold_grid();
        assert_eq!(grid.len(), 10);
        assert!((grid[0] - 0.50).abs() < 1e-12);
        assert!((grid[9] - 0.95).abs() < 1e-12);
        assert!(grid.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn similarity_is_dot_product() {
        let expected = vec![vec![1.0, 0.0], vec![0.6, 0.8]];
        let student = vec![vec![1.0, 0.0], vec![0.6, 0.8]];
        let sims = similarity_scores(&expected, &student).unwrap();
        assert!((sims[0] - 1.0).abs() < 1e-6);
        assert!((sims[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn mismatched_dimensions_error() {
        let err = similarity_scores(&[vec![1.0, 0.0]], &[vec![1.0]]).unwrap_err();
        assert!(err.to_string().contains("dimension mismatch"));
        let err = similarity_scores(&[vec![1.0]], &[]).unwrap_err();
        assert!(err.to_string().contains("count mismatch"));
    }

    #[test]
    fn sweep_is_deterministic() {
        let sims = vec![0.92, 0.74, 0.31, 0.88, 0.55];
        let labels = vec![true, true, false, true, false];
        let a = sweep(&sims, &labels).unwrap();
        let b = sweep(&sims, &labels).unwrap();
        assert_eq!(a.threshold, b.threshold);
        assert_eq!(a.accuracy, b.accuracy);
        assert_eq!(a.predictions, b.predictions);
    }

    #[test]
    fn tie_keeps_the_lowest_threshold() {
        // perfectly separated far from every grid point: all ten thresholds
        // score 1.0, so the first evaluated (0.50) must win
        let sims = vec![0.99, 0.02];
        let labels = vec![true, false];
        let best = sweep(&sims, &labels).unwrap();
        assert!((best.threshold - 0.50).abs() < 1e-12);
        assert!((best.accuracy - 1.0).abs() < 1e-12);
        assert_eq!(best.predictions, vec![true, false]);
    }

    #[test]
    fn higher_threshold_wins_when_it_separates_better() {
        // a hard negative at 0.62 forces the cutoff above it
        let sims = vec![0.93, 0.62];
        let labels = vec![true, false];
        let best = sweep(&sims, &labels).unwrap();
        assert!(best.threshold > 0.62);
        assert!((best.accuracy - 1.0).abs() < 1e-12);
    }

    #[test]
    fn prediction_uses_inclusive_comparison() {
        // similarity exactly at the 0.50 grid point counts as positive
        let sims = vec![0.50];
        let labels = vec![true];
        let best = sweep(&sims, &labels).unwrap();
        assert!((best.accuracy - 1.0).abs() < 1e-12);
        assert_eq!(best.predictions, vec![true]);
    }

    #[test]
    fn empty_input_keeps_first_threshold() {
        let best = sweep(&[], &[]).unwrap();
        assert!((best.threshold - 0.50).abs() < 1e-12);
        assert_eq!(best.accuracy, 0.0);
        assert!(best.predictions.is_empty());
    }
}
