use crate::model::{GoldCase, Pair};
use crate::prompts;
use crate::providers::oracle::Oracle;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// A bit creative for paraphrasing, unlike the temperature-0 judge calls.
pub const PARAPHRASE_TEMPERATURE: f32 = 0.7;
pub const PARAPHRASE_MAX_TOKENS: u32 = 64;

/// Seeded permutation of `0..n`. Pure: same seed, same permutation. Used to
/// mismatch gold cases without touching the oracle.
pub fn negative_permutation(n: usize, seed: u64) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);
    indices
}

/// Negative pairs: each gold case is paired with a permuted other case's
/// official error, posing as a student message about a different root cause.
/// Self-pairs are skipped, so slightly fewer than `gold.len()` pairs may
/// come back. Fewer than two gold cases yields no negatives.
pub fn derive_negative_pairs(gold: &[GoldCase], seed: u64) -> Vec<Pair> {
    if gold.len() < 2 {
        return Vec::new();
    }
    let permutation = negative_permutation(gold.len(), seed);
    let mut pairs = Vec::new();
    for (case, &wrong_idx) in gold.iter().zip(&permutation) {
        let wrong = &gold[wrong_idx];
        if case.test_id == wrong.test_id {
            continue;
        }
        pairs.push(Pair {
            test_id: format!("{}_neg", case.test_id),
            expected_error: case.expected_error.clone(),
            student_error: format!("student compiler: {}", wrong.expected_error),
            label: false,
        });
    }
    pairs
}

/// Positive pairs: the oracle paraphrases each official error into a
/// plausible student-compiler message.
pub async fn generate_positive_pairs(
    oracle: &dyn Oracle,
    gold: &[GoldCase],
) -> anyhow::Result<Vec<Pair>> {
    let mut pairs = Vec::with_capacity(gold.len());
    for case in gold {
        let prompt = prompts::paraphrase_prompt(&case.expected_error);
        let student = oracle
            .generate(&prompt, PARAPHRASE_TEMPERATURE, PARAPHRASE_MAX_TOKENS)
            .await?;
        pairs.push(Pair {
            test_id: case.test_id.clone(),
            expected_error: case.expected_error.clone(),
            student_error: student.trim().to_string(),
            label: true,
        });
    }
    Ok(pairs)
}
