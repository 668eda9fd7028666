use crate::errors::DispatchError;
use crate::judge::normalize::decode_verdict;
use std::collections::HashMap;

/// Recover one answer per pair from a line-batched response.
///
/// Primary path: if the response has at least `batch_len` non-blank lines,
/// the first `batch_len` trimmed lines are the answers, positionally mapped.
/// Fallback: scan all whitespace-separated tokens for ones that
/// case-insensitively start with "true" or "false", in appearance order.
/// Anything other than exactly `batch_len` recovered answers is fatal: this
/// strategy has no partial-success mode.
pub fn parse_line_batch(raw: &str, batch_len: usize) -> Result<Vec<String>, DispatchError> {
    let lines: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let answers: Vec<String> = if lines.len() >= batch_len {
        lines[..batch_len].iter().map(|s| s.to_string()).collect()
    } else {
        let mut found = Vec::new();
        for token in raw.split_whitespace() {
            let lowered = token.to_ascii_lowercase();
            if lowered.starts_with("true") || lowered.starts_with("false") {
                found.push(token.to_string());
                if found.len() == batch_len {
                    break;
                }
            }
        }
        found
    };

    if answers.len() != batch_len {
        return Err(DispatchError::BatchSizeMismatch {
            expected: batch_len,
            got: answers.len(),
            raw: raw.to_string(),
        });
    }
    Ok(answers)
}

/// Parse a JSON-batched response into `(model_output, verdict)` pairs in
/// index order `1..=batch_len`.
///
/// The trimmed response is parsed directly; if that fails, the substring
/// from the first `[` to the last `]` is re-attempted. The index is the
/// correspondence key; array emission order is irrelevant. Duplicate
/// indexes overwrite (last write wins). The index map must cover exactly
/// `1..=batch_len` or the batch is fatal.
pub fn parse_json_batch(
    raw: &str,
    batch_len: usize,
) -> Result<Vec<(String, bool)>, DispatchError> {
    let trimmed = raw.trim();

    let value: serde_json::Value = serde_json::from_str(trimmed).or_else(|first_err| {
        match (trimmed.find('['), trimmed.rfind(']')) {
            (Some(start), Some(end)) if end > start => serde_json::from_str(&trimmed[start..=end]),
            _ => Err(first_err),
        }
    })
    .map_err(|e| DispatchError::MalformedBatchJson {
        reason: e.to_string(),
        raw: raw.to_string(),
    })?;

    let array = value.as_array().ok_or_else(|| DispatchError::MalformedBatchJson {
        reason: "top-level value is not an array".to_string(),
        raw: raw.to_string(),
    })?;

    let mut by_index: HashMap<usize, serde_json::Value> = HashMap::new();
    for entry in array {
        let Some(obj) = entry.as_object() else {
            continue;
        };
        let Some(index) = obj.get("index").and_then(|v| v.as_u64()) else {
            continue;
        };
        let correct = obj.get("correct").cloned().unwrap_or(serde_json::Value::Null);
        by_index.insert(index as usize, correct);
    }

    let covered = (1..=batch_len)
        .filter(|i| by_index.contains_key(i))
        .count();
    if covered != batch_len || by_index.len() != batch_len {
        return Err(DispatchError::BatchSizeMismatch {
            expected: batch_len,
            got: covered,
            raw: raw.to_string(),
        });
    }

    Ok((1..=batch_len)
        .map(|i| decode_verdict(&by_index[&i]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_batch_takes_first_n_lines_in_order() {
        let raw = "True\nFalse\ntrue\n";
        let answers = parse_line_batch(raw, 3).unwrap();
        assert_eq!(answers, vec!["True", "False", "true"]);
    }

    #[test]
    fn line_batch_ignores_blank_lines() {
        let raw = "True\n\n\nFalse\n";
        let answers = parse_line_batch(raw, 2).unwrap();
        assert_eq!(answers, vec!["True", "False"]);
    }

    #[test]
    fn line_batch_surplus_lines_truncated_to_batch_len() {
        let raw = "True\nFalse\nTrue\nFalse";
        let answers = parse_line_batch(raw, 2).unwrap();
        assert_eq!(answers, vec!["True", "False"]);
    }

    #[test]
    fn line_batch_falls_back_to_token_scan() {
        let raw = "Sure! The answers are: True False, in that order.";
        let answers = parse_line_batch(raw, 2).unwrap();
        assert_eq!(answers, vec!["True", "False,"]);
    }

    #[test]
    fn line_batch_token_scan_matches_prefixes_case_insensitively() {
        let raw = "the verdicts: TRUE. and falsely";
        let answers = parse_line_batch(raw, 2).unwrap();
        assert_eq!(answers, vec!["TRUE.", "falsely"]);
    }

    #[test]
    fn line_batch_under_recovery_is_fatal() {
        let raw = "True";
        let err = parse_line_batch(raw, 3).unwrap_err();
        match err {
            DispatchError::BatchSizeMismatch { expected, got, raw } => {
                assert_eq!(expected, 3);
                assert_eq!(got, 1);
                assert!(raw.contains("True"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn json_batch_round_trip() {
        let raw = r#"[{"index":1,"correct":true},{"index":2,"correct":false}]"#;
        let answers = parse_json_batch(raw, 2).unwrap();
        assert_eq!(
            answers,
            vec![("True".to_string(), true), ("False".to_string(), false)]
        );
    }

    #[test]
    fn json_batch_reassembles_by_index_not_emission_order() {
        let raw = r#"[{"index":2,"correct":false},{"index":1,"correct":true}]"#;
        let answers = parse_json_batch(raw, 2).unwrap();
        assert!(answers[0].1);
        assert!(!answers[1].1);
    }

    #[test]
    fn json_batch_extracts_wrapped_array() {
        let raw = "Here is the result:\n[{\"index\":1,\"correct\":true}]\nHope that helps!";
        let answers = parse_json_batch(raw, 1).unwrap();
        assert_eq!(answers, vec![("True".to_string(), true)]);
    }

    #[test]
    fn json_batch_unparseable_is_fatal_with_raw_text() {
        let raw = "I cannot produce JSON today";
        let err = parse_json_batch(raw, 2).unwrap_err();
        match err {
            DispatchError::MalformedBatchJson { raw: r, .. } => {
                assert!(r.contains("cannot produce JSON"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn json_batch_non_array_is_fatal() {
        let raw = r#"{"index":1,"correct":true}"#;
        let err = parse_json_batch(raw, 1).unwrap_err();
        assert!(matches!(err, DispatchError::MalformedBatchJson { .. }));
    }

    #[test]
    fn json_batch_missing_index_is_fatal() {
        let raw = r#"[{"index":1,"correct":true},{"index":3,"correct":false}]"#;
        let err = parse_json_batch(raw, 3).unwrap_err();
        match err {
            DispatchError::BatchSizeMismatch { expected, got, .. } => {
                assert_eq!(expected, 3);
                assert_eq!(got, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn json_batch_out_of_range_index_is_fatal() {
        // right count, wrong key set
        let raw = r#"[{"index":0,"correct":true},{"index":1,"correct":false}]"#;
        assert!(matches!(
            parse_json_batch(raw, 2),
            Err(DispatchError::BatchSizeMismatch { .. })
        ));
    }

    #[test]
    fn json_batch_duplicate_index_last_write_wins() {
        let raw = r#"[{"index":1,"correct":true},{"index":1,"correct":false}]"#;
        let answers = parse_json_batch(raw, 1).unwrap();
        assert_eq!(answers, vec![("False".to_string(), false)]);
    }

    #[test]
    fn json_batch_string_verdicts_are_normalized() {
        let raw = r#"[{"index":1,"correct":"True"},{"index":2,"correct":"nonsense"}]"#;
        let answers = parse_json_batch(raw, 2).unwrap();
        assert_eq!(answers[0], ("True".to_string(), true));
        assert_eq!(answers[1], ("nonsense".to_string(), false));
    }

    #[test]
    fn json_batch_missing_correct_key_fails_closed() {
        let raw = r#"[{"index":1}]"#;
        let answers = parse_json_batch(raw, 1).unwrap();
        assert_eq!(answers, vec![("null".to_string(), false)]);
    }

    #[test]
    fn json_batch_non_object_entries_are_skipped() {
        let raw = r#"["noise", {"index":1,"correct":true}]"#;
        let answers = parse_json_batch(raw, 1).unwrap();
        assert_eq!(answers, vec![("True".to_string(), true)]);
    }
}
