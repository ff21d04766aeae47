//! Presentation layer: HTML fragments and full-page views.

pub mod fragments;
pub mod views;
