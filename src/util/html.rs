//! HTML escaping for untrusted text embedded in fragments.

/// Escape the five HTML-sensitive characters `& < > " '`.
///
/// Not idempotent: escaping already-escaped text escapes the ampersands again,
/// so each render path must apply it exactly once.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}
