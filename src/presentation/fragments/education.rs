use crate::{domain::entities::EducationEntry, util::html::escape_html};

use super::common::empty_message;

fn line(class: &str, prefix: &str, value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    Some(format!(
        "<div class=\"{class}\">{prefix}{}</div>",
        escape_html(value)
    ))
}

pub fn render_education_entry(entry: &EducationEntry) -> String {
    let mut parts: Vec<String> = Vec::new();

    let mut header: Vec<String> = Vec::new();
    if !entry.degree.is_empty() {
        header.push(format!("<strong>{}</strong>", escape_html(&entry.degree)));
    }
    if !entry.major.is_empty() {
        header.push(format!(
            "<span class=\"edu-major\">{}</span>",
            escape_html(&entry.major)
        ));
    }
    if !header.is_empty() {
        parts.push(format!("<div class=\"edu-header\">{}</div>", header.join(", ")));
    }

    let details = [
        line("edu-school", "", &entry.school),
        line("edu-location", "", &entry.location),
        line("edu-period", "", &entry.period),
        line("edu-advisor", "Advisor: ", &entry.advisor),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>();
    if !details.is_empty() {
        parts.push(format!(
            "<div class=\"edu-details\">\n{}\n</div>",
            details.join("\n")
        ));
    }

    format!("<div class=\"edu-item\">\n{}\n</div>", parts.join("\n"))
}

/// Education section in source order.
pub fn render_education(entries: &[EducationEntry]) -> String {
    if entries.is_empty() {
        return empty_message("No education entries.");
    }
    entries
        .iter()
        .map(render_education_entry)
        .collect::<Vec<_>>()
        .join("\n")
}
