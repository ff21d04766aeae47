//! Record normalizers: loosely-shaped source data into fixed-shape entities.
//!
//! Every function here is total over `serde_json::Value`. Missing or oddly typed
//! fields fall back to empty values, and one malformed entry never prevents its
//! siblings from being normalized.

use serde_json::{Map, Value};

use crate::domain::{
    entities::{BlogPost, EducationEntry, Link, Publication},
    slug::resolve_slug,
    tags::normalize_tags,
};

/// Normalize a publications document (`{ publications: [...] }`).
pub fn normalize_publications(raw: &Value) -> Vec<Publication> {
    keyed_sequence(raw, "publications")
        .iter()
        .map(normalize_publication)
        .collect()
}

/// Normalize an education document, which is a bare sequence.
///
/// Anything that is not a sequence is "no data" and yields an empty list.
pub fn normalize_education(raw: &Value) -> Vec<EducationEntry> {
    let Some(entries) = raw.as_array() else {
        return Vec::new();
    };

    entries
        .iter()
        .map(|entry| {
            let fields = entry.as_object();
            EducationEntry {
                degree: text_field(fields, "degree"),
                major: text_field(fields, "major"),
                school: text_field(fields, "school"),
                location: text_field(fields, "location"),
                period: text_field(fields, "period"),
                advisor: text_field(fields, "advisor"),
            }
        })
        .collect()
}

/// Normalize a blog index document (`{ posts: [...] }`).
pub fn normalize_posts(raw: &Value) -> Vec<BlogPost> {
    keyed_sequence(raw, "posts")
        .iter()
        .map(|entry| {
            let fields = entry.as_object();
            let title = text_field(fields, "title");
            let slug = resolve_slug(&text_field(fields, "slug"), &title);
            BlogPost {
                date: text_field(fields, "date"),
                summary: text_field(fields, "summary"),
                content: text_field(fields, "content"),
                tags: fields
                    .and_then(|map| map.get("tags"))
                    .map(normalize_tags)
                    .unwrap_or_default(),
                slug,
                title,
            }
        })
        .collect()
}

fn normalize_publication(entry: &Value) -> Publication {
    let fields = entry.as_object();
    Publication {
        title: text_field(fields, "title"),
        authors: text_field(fields, "authors"),
        venue: text_field(fields, "venue"),
        year: text_field(fields, "year"),
        tags: text_field(fields, "tags"),
        links: fields
            .and_then(|map| map.get("links"))
            .map(normalize_links)
            .unwrap_or_default(),
    }
}

fn normalize_links(raw: &Value) -> Vec<Link> {
    let Some(items) = raw.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(Value::as_object)
        .map(|link| Link {
            label: text_field(Some(link), "label"),
            href: text_field(Some(link), "href"),
        })
        .collect()
}

fn keyed_sequence<'a>(raw: &'a Value, key: &str) -> &'a [Value] {
    raw.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn text_field(fields: Option<&Map<String, Value>>, key: &str) -> String {
    fields
        .and_then(|map| map.get(key))
        .map(display_text)
        .unwrap_or_default()
}

/// Render a scalar (or list of scalars) as display text. Lists are joined with
/// `", "`, which is how author and tag lists are shown.
fn display_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Array(items) => items
            .iter()
            .map(display_text)
            .filter(|item| !item.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Null | Value::Object(_) => String::new(),
    }
}
