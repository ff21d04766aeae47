//! Minimal Markdown renderer used when the full renderer is unavailable.
//!
//! Supports exactly what the site's own content uses: `#`/`##` headings,
//! paragraphs, `-` lists (indentation approximated with a left margin), `**bold**`,
//! `[label](url)` links, and verbatim `<table>` blocks.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::util::html::escape_html;

static TABLE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<table.*?</table>").expect("table pattern is valid"));
static TABLE_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"__TABLE_(\d+)__").expect("placeholder pattern is valid"));
static LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)-\s+(.*)$").expect("list item pattern is valid"));
static BLOCK_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{2,}").expect("block separator pattern is valid"));
static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link pattern is valid"));
static BOLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("bold pattern is valid"));

/// Pixels of left margin per column of list-item indentation.
const INDENT_STEP_PX: usize = 10;

/// Convert the supported Markdown subset to HTML.
pub fn render_minimal_markdown(source: &str) -> String {
    let source = source.replace("\r\n", "\n");

    let mut tables: Vec<String> = Vec::new();
    let without_tables = TABLE_BLOCK.replace_all(&source, |caps: &Captures<'_>| {
        tables.push(caps[0].to_string());
        format!("\n\n__TABLE_{}__\n\n", tables.len() - 1)
    });

    let with_lists = wrap_lists(&without_tables);

    let html = BLOCK_SEPARATOR
        .split(&with_lists)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n");

    TABLE_PLACEHOLDER
        .replace_all(&html, |caps: &Captures<'_>| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| tables.get(index))
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Turn runs of `- item` lines into `<ul>` blocks. Each list is surrounded by
/// blank lines so it always forms a block of its own.
fn wrap_lists(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut in_list = false;

    for line in text.split('\n') {
        match LIST_ITEM.captures(line) {
            Some(caps) => {
                if !in_list {
                    lines.push(String::new());
                    lines.push("<ul>".to_string());
                    in_list = true;
                }
                let indent = caps[1].chars().count();
                let content = render_inline(&caps[2]);
                if indent > 0 {
                    lines.push(format!(
                        "<li style=\"margin-left:{}px\">{content}</li>",
                        indent * INDENT_STEP_PX
                    ));
                } else {
                    lines.push(format!("<li>{content}</li>"));
                }
            }
            None => {
                if in_list {
                    lines.push("</ul>".to_string());
                    lines.push(String::new());
                    in_list = false;
                }
                lines.push(line.to_string());
            }
        }
    }

    if in_list {
        lines.push("</ul>".to_string());
    }

    lines.join("\n")
}

fn render_block(block: &str) -> String {
    if block.starts_with("<ul>") || block.starts_with("__TABLE_") {
        return block.to_string();
    }
    if let Some(heading) = block.strip_prefix("## ") {
        return format!("<h3>{}</h3>", render_inline(heading));
    }
    if let Some(heading) = block.strip_prefix("# ") {
        return format!("<h2>{}</h2>", render_inline(heading));
    }
    format!("<p>{}</p>", render_inline(block).replace('\n', "<br>"))
}

/// Escape, then links, then bold.
fn render_inline(text: &str) -> String {
    let escaped = escape_html(text);
    let linked = LINK.replace_all(
        &escaped,
        r#"<a href="${2}" target="_blank" rel="noopener noreferrer">${1}</a>"#,
    );
    BOLD.replace_all(&linked, "<strong>${1}</strong>").into_owned()
}
