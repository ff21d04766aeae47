//! Application services: normalization, search, rendering and site assembly.

pub mod content;
pub mod error;
pub mod normalize;
pub mod render;
pub mod repos;
pub mod search;
pub mod site;
pub mod sources;
