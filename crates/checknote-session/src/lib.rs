//! checknote-session
//!
//! Interactive session state: the answer store with its selection rules,
//! keyboard navigation with auto-advance, and the ports the session talks
//! to (persistence, clipboard, viewport, input).

pub mod error;
pub mod input;
pub mod navigation;
pub mod ports;
pub mod session;
pub mod store;
pub mod timer;
