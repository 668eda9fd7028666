//! Prompt templates for the judging oracle. Placeholders are substituted
//! with `str::replace` rather than a formatting macro: the JSON batch
//! template contains literal braces that must stay inert.

use crate::model::Pair;

pub const WARMUP_PROMPT: &str = "You are a health check. Reply with True.\nANSWER:\n";

pub const JUDGE_FEWSHOT_TEMPLATE: &str = r#"You are an automatic grader for a compiler course.

Task:
You will receive two compiler error messages:
1. EXPECTED_ERROR: the reference/official compiler's message for a specific program.
2. STUDENT_ERROR: the message printed by a student's custom compiler on the same program.

Decide if the STUDENT_ERROR is an acceptable match for EXPECTED_ERROR.

Rules for "acceptable match":
- The STUDENT_ERROR must describe the SAME underlying problem (same root cause).
- Different wording is allowed. Synonyms are allowed.
  Examples:
    - "token", "symbol", "operator", "character" can mean the same thing.
    - "EOL" means "end of line".
    - "EOF" means "end of file".
    - "identifier not found" means "variable not defined".
    - "incompatible types" means "expected integer but found string".
- Extra detail like line numbers, hints, or variable names is allowed.
- It's still acceptable if the student message explains the expected thing instead of repeating the wrong thing.
- It is NOT acceptable if the STUDENT_ERROR points to a different root cause.

Output ONLY one token: True or False

Examples (study them carefully):

Example 1:
EXPECTED_ERROR: "Invalid token ,"
STUDENT_ERROR: "Line 5: Unknown symbol ',' found. Did you mean to use a different operator?"
ANSWER: True

Example 2:
EXPECTED_ERROR: "Unexpected token EOF"
STUDENT_ERROR: "Line 10: Unexpected end of file. Did you forget to close that parenthesis?"
ANSWER: True

Example 3:
EXPECTED_ERROR: "Identifier not found"
STUDENT_ERROR: "On line 10, the variable 'count' was used but not defined. Make sure you declare your variables before using them."
ANSWER: True

Example 4:
EXPECTED_ERROR: "Incompatible Type"
STUDENT_ERROR: "Error: Expected integer but found string on line 10 near var age."
ANSWER: True

Example 5:
EXPECTED_ERROR: "Unexpected token EOL"
STUDENT_ERROR: "Line 5: Expected a value after 'x='"
ANSWER: True

Example 6:
EXPECTED_ERROR: "Unexpected token EOL"
STUDENT_ERROR: "student compiler: Unexpected token EOF"
ANSWER: False

Now judge this pair:

EXPECTED_ERROR:
"{expected_error}"

STUDENT_ERROR:
"{student_error}"

ANSWER:
"#;

pub const BATCH_JUDGE_TEMPLATE: &str = r#"You are an automatic grader for a compiler course.

Task:
You will receive multiple pairs of compiler error messages:
1. EXPECTED_ERROR: the reference/official compiler's message for a specific program.
2. STUDENT_ERROR: the message printed by a student's custom compiler on the same program.

For each pair, decide if the STUDENT_ERROR is an acceptable match for EXPECTED_ERROR.

Rules for "acceptable match":
- The STUDENT_ERROR must describe the SAME underlying problem (same root cause).
- Different wording is allowed. Synonyms are allowed.
- Extra detail like line numbers, hints, or variable names is allowed.
- It is NOT acceptable if the STUDENT_ERROR points to a different root cause.

Your output format:
- Return one line per pair, in order.
- Each line must be exactly either: True or False (case-insensitive is okay).

Here are the pairs:

{pairs_block}

ANSWERS:
"#;

pub const BATCH_JUDGE_JSON_TEMPLATE: &str = r#"You are an automatic grader for a compiler course.

Task:
You will receive multiple pairs of compiler error messages:
  - EXPECTED_ERROR: the official/reference compiler error for a program.
  - STUDENT_ERROR: the message printed by a student's custom compiler on the same program.

For each pair, decide if the STUDENT_ERROR is an acceptable match for EXPECTED_ERROR:
same underlying root cause, any wording, extra detail allowed. A different
root cause is NOT acceptable.

Output format:
You MUST output a single JSON array.
Each element MUST be an object with two keys:
  - "index": an integer index of the pair, starting from 1
  - "correct": a boolean (true or false)

The JSON must look like:
[
  { "index": 1, "correct": true },
  { "index": 2, "correct": false },
  ...
]

Do NOT output anything before or after the JSON array.
Do NOT include comments, explanations, or extra keys.

Here are the pairs:

{pairs_block}
"#;

pub const PARAPHRASE_TEMPLATE: &str = r#"You are helping generate plausible compiler error messages written by student compilers.

You will be given the official compiler error message for a program. Write an alternative error message that:
- Describes the SAME root cause in your own natural wording.
- May simplify terms, reorder phrases, or add hints like line numbers, variable names, etc.
- Looks like it was printed by a student-built compiler (so it's okay if it's a bit rough or inconsistent).
- Must NOT claim to be an official or reference compiler.
- Must NOT copy the exact text verbatim.

Return ONLY the student's error message, nothing else.

OFFICIAL ERROR:
"{expected_error}"

STUDENT COMPILER MESSAGE:
"#;

/// Single-pair few-shot judge prompt.
pub fn judge_prompt(pair: &Pair) -> String {
    JUDGE_FEWSHOT_TEMPLATE
        .replace("{expected_error}", &pair.expected_error)
        .replace("{student_error}", &pair.student_error)
}

/// Numbered enumeration of a batch, referenced positionally (line-batched)
/// or via `index` (JSON-batched).
pub fn pairs_block(batch: &[Pair]) -> String {
    let mut parts = Vec::with_capacity(batch.len());
    for (i, pair) in batch.iter().enumerate() {
        parts.push(format!(
            "Pair {}:\nEXPECTED_ERROR:\n{}\n\nSTUDENT_ERROR:\n{}\n",
            i + 1,
            pair.expected_error,
            pair.student_error
        ));
    }
    parts.join("\n")
}

pub fn line_batch_prompt(batch: &[Pair]) -> String {
    BATCH_JUDGE_TEMPLATE.replace("{pairs_block}", &pairs_block(batch))
}

pub fn json_batch_prompt(batch: &[Pair]) -> String {
    BATCH_JUDGE_JSON_TEMPLATE.replace("{pairs_block}", &pairs_block(batch))
}

pub fn paraphrase_prompt(expected_error: &str) -> String {
    PARAPHRASE_TEMPLATE.replace("{expected_error}", expected_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(id: &str, expected: &str, student: &str) -> Pair {
        Pair {
            test_id: id.into(),
            expected_error: expected.into(),
            student_error: student.into(),
            label: true,
        }
    }

    #[test]
    fn judge_prompt_embeds_both_messages() {
        let p = judge_prompt(&pair("t1", "undefined variable x", "identifier x not declared"));
        assert!(p.contains("\"undefined variable x\""));
        assert!(p.contains("\"identifier x not declared\""));
        assert!(!p.contains("{expected_error}"));
    }

    #[test]
    fn pairs_block_enumerates_from_one() {
        let block = pairs_block(&[
            pair("a", "e1", "s1"),
            pair("b", "e2", "s2"),
        ]);
        assert!(block.contains("Pair 1:"));
        assert!(block.contains("Pair 2:"));
        let one = block.find("Pair 1:").unwrap();
        let two = block.find("Pair 2:").unwrap();
        assert!(one < two);
    }

    #[test]
    fn json_template_braces_survive_substitution() {
        let p = json_batch_prompt(&[pair("a", "e1", "s1")]);
        assert!(p.contains(r#"{ "index": 1, "correct": true }"#));
        assert!(!p.contains("{pairs_block}"));
    }
}
