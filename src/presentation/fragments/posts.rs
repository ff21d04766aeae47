use crate::{
    domain::entities::BlogPost,
    util::{date::format_date, html::escape_html},
};

use super::common::{empty_message, tag_row};

/// Relative location of a post's detail page.
pub fn post_href(slug: &str) -> String {
    format!("posts/{slug}.html")
}

fn date_line(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        return None;
    }
    Some(format!(
        "<time class=\"post-date\" datetime=\"{}\">{}</time>",
        escape_html(raw.trim()),
        escape_html(&format_date(raw))
    ))
}

fn render_post_item(post: &BlogPost) -> String {
    let href = post_href(&post.slug);
    let mut parts = vec![format!(
        "<a class=\"post-title\" href=\"{href}\">{}</a>",
        escape_html(&post.title)
    )];
    if let Some(date) = date_line(&post.date) {
        parts.push(date);
    }
    if !post.summary.is_empty() {
        parts.push(format!(
            "<p class=\"post-summary\">{}</p>",
            escape_html(&post.summary)
        ));
    }
    let tags = tag_row("post-tags", &post.tags, false);
    if !tags.is_empty() {
        parts.push(tags);
    }
    parts.push(format!(
        "<a class=\"read-more\" href=\"{href}\">Read more &rarr;</a>"
    ));
    format!("<li class=\"post-item\">\n{}\n</li>", parts.join("\n"))
}

/// Blog index fragment, in the order given.
pub fn render_post_list(posts: &[BlogPost]) -> String {
    if posts.is_empty() {
        return empty_message("No posts yet.");
    }
    let items = posts
        .iter()
        .map(render_post_item)
        .collect::<Vec<_>>()
        .join("\n");
    format!("<ul class=\"post-list\">\n{items}\n</ul>")
}

/// Detail fragment around an already-rendered body.
pub fn render_post_detail(post: &BlogPost, body_html: &str) -> String {
    let mut parts = vec![format!(
        "<h1 class=\"post-title\">{}</h1>",
        escape_html(&post.title)
    )];
    if let Some(date) = date_line(&post.date) {
        parts.push(date);
    }
    let tags = tag_row("post-tags", &post.tags, true);
    if !tags.is_empty() {
        parts.push(tags);
    }
    parts.push(format!("<div class=\"post-body\">\n{body_html}\n</div>"));
    format!("<article class=\"post\">\n{}\n</article>", parts.join("\n"))
}
