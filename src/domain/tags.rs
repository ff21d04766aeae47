//! Tag normalization and stable per-label display colors.

use serde_json::Value;

const FULL_WIDTH_COMMA: char = '\u{FF0C}';

/// Normalize a raw `tags` field into an ordered list of non-empty labels.
///
/// Sequences keep their order with each element stringified and trimmed; strings
/// are split on ASCII or full-width commas. Any other shape yields no tags.
pub fn normalize_tags(raw: &Value) -> Vec<String> {
    match raw {
        Value::Array(items) => items
            .iter()
            .filter_map(scalar_label)
            .map(|label| label.trim().to_string())
            .filter(|label| !label.is_empty())
            .collect(),
        Value::String(text) => split_tag_string(text),
        _ => Vec::new(),
    }
}

/// Split a delimiter-separated tag string, dropping empty segments.
pub fn split_tag_string(text: &str) -> Vec<String> {
    text.split([',', FULL_WIDTH_COMMA])
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

fn scalar_label(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Deterministic hue in `0..360` for a label.
///
/// Polynomial rolling hash (multiplier 31) over UTF-16 code units with 32-bit
/// wraparound, then absolute value modulo 360. Collisions are expected.
pub fn hash_hue(label: &str) -> u16 {
    let hash = label
        .encode_utf16()
        .fold(0i32, |acc, unit| acc.wrapping_mul(31).wrapping_add(i32::from(unit)));
    // i64 so that i32::MIN has an absolute value.
    (i64::from(hash).abs() % 360) as u16
}

/// Inline style for a colored pill derived from `hue`.
pub fn pill_style(hue: u16) -> String {
    format!(
        "background:hsl({hue},70%,92%);color:hsl({hue},45%,28%);border-color:hsl({hue},55%,80%)"
    )
}
