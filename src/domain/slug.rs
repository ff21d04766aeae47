//! Utilities for generating deterministic, URL-safe slugs.
//!
//! Slugs address blog posts (`posts/{slug}.md`, `posts/{slug}.html`), so the
//! alphabet is deliberately narrow: lowercase ASCII letters, digits and hyphens.
//! Characters outside that set are dropped rather than transliterated.

/// Slug returned when nothing representable survives normalization.
pub const FALLBACK_SLUG: &str = "post";

/// Derive a slug from human-readable text.
///
/// Lower-cases the input, strips everything outside `[a-z0-9\s-]`, trims, and
/// collapses each internal whitespace run into a single hyphen. Existing hyphens
/// are kept as-is. Returns [`FALLBACK_SLUG`] when the result is empty.
pub fn slugify(input: &str) -> String {
    let slug = normalize(input);
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Resolve the slug for a record: an explicit slug field wins when it normalizes
/// to something non-empty, otherwise the title is used.
pub fn resolve_slug(explicit: &str, title: &str) -> String {
    let slug = normalize(explicit);
    if slug.is_empty() {
        slugify(title)
    } else {
        slug
    }
}

fn normalize(input: &str) -> String {
    let lowered = input.to_lowercase();
    let filtered: String = lowered
        .chars()
        .filter(|ch| {
            ch.is_ascii_lowercase() || ch.is_ascii_digit() || *ch == '-' || ch.is_whitespace()
        })
        .collect();

    filtered.split_whitespace().collect::<Vec<_>>().join("-")
}
