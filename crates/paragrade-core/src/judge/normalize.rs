/// Strict verdict extraction from a raw oracle answer: the first
/// whitespace-delimited token counts as true iff its lowercase form starts
/// with "true". Everything else, including "false", empty input and
/// unrecognized text, is a negative judgment, never an error (fail-to-false).
pub fn normalize_bool(raw: &str) -> bool {
    raw.split_whitespace()
        .next()
        .map(|token| token.to_ascii_lowercase().starts_with("true"))
        .unwrap_or(false)
}

/// Tagged conversion for verdict values arriving as JSON: a native boolean
/// is accepted directly; anything else is rendered to a string and pushed
/// through `normalize_bool`. Returns the stringified form (stored as
/// `model_output`) alongside the verdict.
pub fn decode_verdict(value: &serde_json::Value) -> (String, bool) {
    match value {
        serde_json::Value::Bool(b) => {
            let text = if *b { "True" } else { "False" };
            (text.to_string(), *b)
        }
        serde_json::Value::String(s) => (s.clone(), normalize_bool(s)),
        other => {
            let text = other.to_string();
            let verdict = normalize_bool(&text);
            (text, verdict)
        }
    }
}
