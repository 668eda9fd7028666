pub mod console;
pub mod timing;

use crate::model::JudgedRecord;
use serde::{Deserialize, Serialize};

/// Counts of (gold, predicted) label combinations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_positive: u64,
    pub false_positive: u64,
    pub true_negative: u64,
    pub false_negative: u64,
}

impl ConfusionMatrix {
    pub fn observe(&mut self, gold: bool, predicted: bool) {
        match (gold, predicted) {
            (true, true) => self.true_positive += 1,
            (false, true) => self.false_positive += 1,
            (false, false) => self.true_negative += 1,
            (true, false) => self.false_negative += 1,
        }
    }

    pub fn count(&self, gold: bool, predicted: bool) -> u64 {
        match (gold, predicted) {
            (true, true) => self.true_positive,
            (false, true) => self.false_positive,
            (false, false) => self.true_negative,
            (true, false) => self.false_negative,
        }
    }

    pub fn total(&self) -> u64 {
        self.true_positive + self.false_positive + self.true_negative + self.false_negative
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl ClassMetrics {
    /// Counts are relative to the class under evaluation: `tp` correct
    /// predictions of it, `fp` wrong predictions of it, `misses` members
    /// predicted as the other class. Zero denominators yield zero metrics.
    fn from_counts(tp: u64, fp: u64, misses: u64) -> Self {
        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + misses);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        Self { precision, recall, f1 }
    }
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    pub total: u64,
    pub accuracy: f64,
    pub confusion: ConfusionMatrix,
    pub true_class: ClassMetrics,
    pub false_class: ClassMetrics,
}

/// Score judged records against their gold labels. Pure and
/// order-independent: any permutation of the same multiset scores the same.
pub fn score(records: &[JudgedRecord]) -> ScoreReport {
    score_outcomes(records.iter().map(|r| (r.label, r.model_bool)))
}

/// Same computation over parallel label/prediction slices (threshold
/// calibration path). Slices must be equal length.
pub fn score_preds(labels: &[bool], preds: &[bool]) -> ScoreReport {
    debug_assert_eq!(labels.len(), preds.len());
    score_outcomes(labels.iter().copied().zip(preds.iter().copied()))
}

fn score_outcomes(outcomes: impl Iterator<Item = (bool, bool)>) -> ScoreReport {
    let mut confusion = ConfusionMatrix::default();
    for (gold, predicted) in outcomes {
        confusion.observe(gold, predicted);
    }
    let true_class = ClassMetrics::from_counts(
        confusion.true_positive,
        confusion.false_positive,
        confusion.false_negative,
    );
    let false_class = ClassMetrics::from_counts(
        confusion.true_negative,
        confusion.false_negative,
        confusion.false_positive,
    );
    ScoreReport {
        total: confusion.total(),
        accuracy: ratio(
            confusion.true_positive + confusion.true_negative,
            confusion.total(),
        ),
        confusion,
        true_class,
        false_class,
    }
}

/// Records the judge got wrong, for the console report's case listing.
pub fn mismatches(records: &[JudgedRecord]) -> Vec<&JudgedRecord> {
    records
        .iter()
        .filter(|r| r.model_bool != r.label)
        .collect()
}
