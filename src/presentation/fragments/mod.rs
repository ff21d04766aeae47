//! HTML fragment builders.
//!
//! Each builder maps normalized entities to a self-contained HTML string meant
//! for insertion into a page container. Every piece of author-supplied text is
//! escaped exactly once with [`escape_html`](crate::util::html::escape_html);
//! link hrefs and pre-rendered Markdown are inserted as provided.

pub mod common;
pub mod education;
pub mod posts;
pub mod publications;

pub use common::{empty_message, failed_message};
pub use education::render_education;
pub use posts::{post_href, render_post_detail, render_post_list};
pub use publications::{PublicationDisplay, render_publication, render_publication_list};
