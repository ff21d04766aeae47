use crate::{
    domain::tags::{hash_hue, pill_style},
    util::html::escape_html,
};

/// Static message shown in place of a section whose resource could not be loaded.
pub fn failed_message(resource: &str) -> String {
    format!(
        "<p class=\"muted\">Failed to load <code>{}</code>. Please check the file.</p>",
        escape_html(resource)
    )
}

/// Empty-state message for a section that loaded but has nothing to show.
pub fn empty_message(message: &str) -> String {
    format!("<p class=\"muted\">{}</p>", escape_html(message))
}

/// A tag label colored by its stable hue.
pub fn tag_pill(label: &str) -> String {
    format!(
        "<span class=\"tag-pill\" style=\"{}\">{}</span>",
        pill_style(hash_hue(label)),
        escape_html(label)
    )
}

/// A plain tag label.
pub fn tag_chip(label: &str) -> String {
    format!("<span class=\"tag-chip\">{}</span>", escape_html(label))
}

/// Wrap labels in a `div` with the given class; nothing at all when there are no
/// labels.
pub fn tag_row<S: AsRef<str>>(class: &str, labels: &[S], colored: bool) -> String {
    if labels.is_empty() {
        return String::new();
    }
    let items = labels
        .iter()
        .map(|label| {
            if colored {
                tag_pill(label.as_ref())
            } else {
                tag_chip(label.as_ref())
            }
        })
        .collect::<Vec<_>>()
        .join("");
    format!("<div class=\"{class}\">{items}</div>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_message_names_the_resource() {
        assert_eq!(
            failed_message("content.md"),
            "<p class=\"muted\">Failed to load <code>content.md</code>. Please check the file.</p>"
        );
    }

    #[test]
    fn tag_pill_uses_label_hue() {
        let pill = tag_pill("ab");
        assert!(pill.contains("hsl(225,70%,92%)"));
        assert!(pill.ends_with(">ab</span>"));
    }

    #[test]
    fn tag_labels_are_escaped() {
        assert_eq!(tag_chip("<x>"), "<span class=\"tag-chip\">&lt;x&gt;</span>");
    }

    #[test]
    fn empty_tag_row_renders_nothing() {
        let labels: [&str; 0] = [];
        assert_eq!(tag_row("tags", &labels, true), "");
    }

    #[test]
    fn tag_row_keeps_label_order() {
        let row = tag_row("tags", &["b", "a"], false);
        assert_eq!(
            row,
            "<div class=\"tags\"><span class=\"tag-chip\">b</span><span class=\"tag-chip\">a</span></div>"
        );
    }
}
