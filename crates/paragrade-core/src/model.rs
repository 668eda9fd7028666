use serde::{Deserialize, Serialize};

/// One official error message harvested from a gold test suite.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GoldCase {
    pub test_id: String,
    pub expected_error: String,
}

/// A labeled evaluation pair: the official error next to a student-compiler
/// message, with the gold verdict on whether they describe the same root
/// cause. Negative variants carry a `_neg` suffix on `test_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pair {
    pub test_id: String,
    pub expected_error: String,
    pub student_error: String,
    pub label: bool,
}

/// A `Pair` after judging. Created exactly once per pair by a dispatch
/// strategy and never mutated afterward; the serialized form is one flat
/// JSON object per line in the judged log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JudgedRecord {
    pub test_id: String,
    pub expected_error: String,
    pub student_error: String,
    pub label: bool,
    /// Raw oracle text for a single-item call, or the recovered per-pair
    /// answer for batched calls.
    pub model_output: String,
    pub model_bool: bool,
    pub latency_sec: f64,
}

impl JudgedRecord {
    pub fn from_pair(pair: Pair, model_output: String, model_bool: bool, latency_sec: f64) -> Self {
        Self {
            test_id: pair.test_id,
            expected_error: pair.expected_error,
            student_error: pair.student_error,
            label: pair.label,
            model_output,
            model_bool,
            latency_sec,
        }
    }
}
