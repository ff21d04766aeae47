use crate::{
    domain::{entities::Publication, tags::split_tag_string, venue::abbr_venue},
    util::html::escape_html,
};

use super::common::{empty_message, tag_row};

/// Optional display enrichment for publication entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicationDisplay {
    /// Abbreviated venue badge in front of the title.
    pub venue_pill: bool,
    /// Colored tag pills above the title; plain chips when disabled.
    pub tag_pills: bool,
    /// A button row with every link that has an href.
    pub link_buttons: bool,
}

impl Default for PublicationDisplay {
    fn default() -> Self {
        Self {
            venue_pill: true,
            tag_pills: true,
            link_buttons: true,
        }
    }
}

impl PublicationDisplay {
    /// Title, authors and venue only.
    pub fn plain() -> Self {
        Self {
            venue_pill: false,
            tag_pills: false,
            link_buttons: false,
        }
    }
}

pub fn render_publication(publication: &Publication, display: PublicationDisplay) -> String {
    let mut parts: Vec<String> = Vec::new();

    let tags = split_tag_string(&publication.tags);
    let tag_html = tag_row("pub-tags", &tags, display.tag_pills);
    if !tag_html.is_empty() {
        parts.push(tag_html);
    }

    let title = escape_html(&publication.title);
    // Hrefs come from author-curated data and are interpolated as provided.
    let linked_title = match publication.primary_link() {
        Some(link) => format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{title}</a>",
            link.href
        ),
        None => title,
    };
    let venue_pill = if display.venue_pill && !publication.venue.is_empty() {
        format!(
            "<span class=\"venue-pill\">{}</span> ",
            escape_html(&abbr_venue(&publication.venue))
        )
    } else {
        String::new()
    };
    parts.push(format!(
        "<div class=\"pub-title\">{venue_pill}{linked_title}</div>"
    ));

    if !publication.authors.is_empty() {
        parts.push(format!(
            "<div class=\"pub-authors\">{}</div>",
            escape_html(&publication.authors)
        ));
    }

    if !publication.venue.is_empty() && !publication.year.is_empty() {
        parts.push(format!(
            "<div class=\"pub-venue\">{}, {}</div>",
            escape_html(&publication.venue),
            escape_html(&publication.year)
        ));
    }

    if display.link_buttons {
        let buttons = publication
            .links
            .iter()
            .filter(|link| !link.href.is_empty())
            .map(|link| {
                let label = if link.label.is_empty() {
                    "link"
                } else {
                    link.label.as_str()
                };
                format!(
                    "<a class=\"pub-link\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
                    link.href,
                    escape_html(label)
                )
            })
            .collect::<Vec<_>>();
        if !buttons.is_empty() {
            parts.push(format!("<div class=\"pub-links\">{}</div>", buttons.join(" ")));
        }
    }

    format!("<article class=\"pub\">\n{}\n</article>", parts.join("\n"))
}

/// Render a whole list, or an empty-state message when there is nothing to show.
pub fn render_publication_list(
    publications: &[Publication],
    display: PublicationDisplay,
) -> String {
    if publications.is_empty() {
        return empty_message("No publications found.");
    }
    let items = publications
        .iter()
        .map(|publication| render_publication(publication, display))
        .collect::<Vec<_>>()
        .join("\n");
    format!("<div class=\"pub-list\">\n{items}\n</div>")
}
