use crate::report::ClassMetrics;
use serde::{Deserialize, Serialize};

/// The winning threshold from a sweep, with the metrics and per-pair
/// predictions it produced. Only the best candidate is retained; ties keep
/// the earliest (lowest) threshold evaluated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationResult {
    pub threshold: f64,
    pub accuracy: f64,
    pub true_class: ClassMetrics,
    pub false_class: ClassMetrics,
    pub predictions: Vec<bool>,
}
