use super::timing::{latency_percentile, RunTiming};
use super::{mismatches, ScoreReport};
use crate::model::JudgedRecord;

/// Render the evaluation summary: headline accuracy, the four confusion
/// cells, per-class metric blocks, and the wrongly-judged cases in full so
/// prompt/format problems are diagnosable from the log alone.
pub fn print_report(label: &str, records: &[JudgedRecord], report: &ScoreReport) {
    println!("=== MODEL EVALUATION ({label}) ===");
    println!("Generated at: {}", chrono::Utc::now().to_rfc3339());
    println!("Total pairs: {}", report.total);
    println!("Accuracy: {:.3}\n", report.accuracy);

    println!("Confusion matrix (gold -> model):");
    for gold in [true, false] {
        for predicted in [true, false] {
            println!(
                "  gold={gold:5} pred={predicted:5}: {}",
                report.confusion.count(gold, predicted)
            );
        }
    }

    println!("\n--- Metrics for predicting True ---");
    println!("Precision: {:.3}", report.true_class.precision);
    println!("Recall:    {:.3}", report.true_class.recall);
    println!("F1-score:  {:.3}", report.true_class.f1);

    println!("\n--- Metrics for predicting False ---");
    println!("Precision: {:.3}", report.false_class.precision);
    println!("Recall:    {:.3}", report.false_class.recall);
    println!("F1-score:  {:.3}", report.false_class.f1);

    let wrong = mismatches(records);
    if !wrong.is_empty() {
        println!("\nWrong cases:\n");
        for r in wrong {
            println!("test_id        : {}", r.test_id);
            println!("expected_error : {}", r.expected_error);
            println!("student_error  : {}", r.student_error);
            println!("gold label     : {}", r.label);
            println!("model_output   : {}", r.model_output);
            println!("---");
        }
    }
}

/// Timing block matching the score report, with per-call percentiles.
pub fn print_timing(label: &str, timing: &RunTiming, records: &[JudgedRecord]) {
    let latencies: Vec<f64> = records.iter().map(|r| r.latency_sec).collect();
    println!("=== TIMING ({label}) ===");
    println!("Model warmup/load time (s): {:.3}", timing.warmup_secs);
    println!("Total inference time (s): {:.3}", timing.total_secs);
    println!(
        "Avg inference time per pair (ms): {:.3}",
        timing.avg_ms_per_pair(records.len())
    );
    println!(
        "P50 single-call latency (ms): {:.3}",
        latency_percentile(&latencies, 0.5) * 1000.0
    );
    println!(
        "P95 single-call latency (ms): {:.3}",
        latency_percentile(&latencies, 0.95) * 1000.0
    );
}
