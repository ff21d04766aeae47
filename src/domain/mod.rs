//! Domain layer types and invariants.

pub mod entities;
pub mod slug;
pub mod tags;
pub mod venue;
