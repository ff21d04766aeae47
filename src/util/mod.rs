//! Small, dependency-light helpers shared across layers.

pub mod date;
pub mod html;
