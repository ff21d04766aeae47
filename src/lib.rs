//! vitae renders a personal academic homepage from loosely structured content:
//! Markdown prose plus JSON or YAML lists of publications, education entries and
//! blog posts.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
pub mod util;
