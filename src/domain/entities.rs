//! Normalized content entities.
//!
//! Every field is owned and defaults to an empty value; normalizers never leave a
//! field absent, so renderers can treat `""` and `[]` as "not provided".

use serde::Serialize;

/// A labelled outbound link attached to a publication (paper, code, slides, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Publication {
    pub title: String,
    /// Display string; list-shaped sources are joined with `", "`.
    pub authors: String,
    pub venue: String,
    pub year: String,
    /// Display string, not a list. Split with
    /// [`normalize_tags`](crate::domain::tags::normalize_tags) for pill rows.
    pub tags: String,
    pub links: Vec<Link>,
}

impl Publication {
    /// The link the title points at, if any.
    pub fn primary_link(&self) -> Option<&Link> {
        self.links.first()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EducationEntry {
    pub degree: String,
    pub major: String,
    pub school: String,
    pub location: String,
    pub period: String,
    pub advisor: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BlogPost {
    pub title: String,
    /// Raw date text as authored; parsed lazily for display and ordering.
    pub date: String,
    pub summary: String,
    /// Inline Markdown body, used only when no `posts/{slug}.md` file exists.
    pub content: String,
    pub tags: Vec<String>,
    pub slug: String,
}

impl BlogPost {
    /// Conventional location of the file-based body for this post.
    pub fn body_path(&self, post_body_dir: &str) -> String {
        let dir = post_body_dir.trim_end_matches('/');
        if dir.is_empty() {
            format!("{}.md", self.slug)
        } else {
            format!("{dir}/{}.md", self.slug)
        }
    }

    /// Markdown to render when the file-based body is unavailable.
    pub fn inline_body(&self) -> &str {
        if self.content.trim().is_empty() {
            &self.summary
        } else {
            &self.content
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_path_follows_slug_convention() {
        let post = BlogPost {
            slug: "hello-world".into(),
            ..Default::default()
        };
        assert_eq!(post.body_path("posts"), "posts/hello-world.md");
        assert_eq!(post.body_path("posts/"), "posts/hello-world.md");
        assert_eq!(post.body_path(""), "hello-world.md");
    }

    #[test]
    fn inline_body_prefers_content_over_summary() {
        let mut post = BlogPost {
            summary: "short".into(),
            content: "long form".into(),
            ..Default::default()
        };
        assert_eq!(post.inline_body(), "long form");

        post.content = "  ".into();
        assert_eq!(post.inline_body(), "short");
    }
}
