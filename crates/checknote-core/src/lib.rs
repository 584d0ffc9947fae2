//! checknote-core
//!
//! Pure domain types for the clinical checklist: the question catalog,
//! its parser, and the answer model. No I/O. This is the shared
//! vocabulary of the Checknote system.

pub mod catalog;
pub mod error;
pub mod models;
