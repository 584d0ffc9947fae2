//! checknote-export
//!
//! Renders an answer set into a clinical note, as plain text and as HTML.

pub mod error;
pub mod footer;
pub mod markup;
pub mod render;
