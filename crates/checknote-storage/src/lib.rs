//! checknote-storage
//!
//! Session persistence. Two key-value entries survive between runs: the
//! JSON-encoded answer set and the active question index.

pub mod error;
pub mod file;
pub mod memory;
pub mod state;
