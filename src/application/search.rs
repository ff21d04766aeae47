//! Case-insensitive substring search over normalized publications.

use crate::domain::entities::Publication;

/// Lower-cased haystack for one publication: title, venue, year, authors and tags
/// joined by single spaces. Built per query and never stored.
pub fn search_text(publication: &Publication) -> String {
    [
        publication.title.as_str(),
        publication.venue.as_str(),
        publication.year.as_str(),
        publication.authors.as_str(),
        publication.tags.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

/// Keep the publications whose search text contains `query`.
///
/// The query is trimmed and lower-cased; an empty query keeps everything. Order
/// is preserved, and filtering an already filtered list with the same query is a
/// no-op.
pub fn filter_publications(publications: &[Publication], query: &str) -> Vec<Publication> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return publications.to_vec();
    }

    publications
        .iter()
        .filter(|publication| search_text(publication).contains(&needle))
        .cloned()
        .collect()
}
