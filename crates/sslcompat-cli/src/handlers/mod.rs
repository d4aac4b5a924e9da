//! Command handlers.
//!
//! Handlers write to the given writer so they can be exercised without a
//! terminal.

pub mod eval;
pub mod show;
