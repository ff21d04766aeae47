use once_cell::sync::Lazy;
use regex::Regex;

static PUBLICATIONS_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^##[ \t]+Publications[ \t]*\r?$")
        .expect("publications heading pattern is valid")
});

/// Return the "about" part of the content document: everything before the first
/// `## Publications` heading, trimmed. The remainder is discarded because the
/// publication list is rendered from structured data instead.
pub fn split_about(document: &str) -> &str {
    match PUBLICATIONS_HEADING.find(document) {
        Some(heading) => document[..heading.start()].trim(),
        None => document.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_text_before_publications_heading() {
        let document = "# Me\n\nResearcher.\n\n## Publications\n\n- Paper A\n";
        assert_eq!(split_about(document), "# Me\n\nResearcher.");
    }

    #[test]
    fn heading_match_is_case_insensitive() {
        let document = "About me\n## PUBLICATIONS  \nrest";
        assert_eq!(split_about(document), "About me");
    }

    #[test]
    fn whole_document_without_heading() {
        assert_eq!(split_about("\n# Only about\n"), "# Only about");
    }

    #[test]
    fn other_headings_do_not_split() {
        let document = "## Publications and talks\n\nbody\n\n### Publications\n";
        assert_eq!(split_about(document), document.trim());
    }

    #[test]
    fn crlf_document_splits() {
        assert_eq!(split_about("About\r\n## Publications\r\nrest"), "About");
    }
}
