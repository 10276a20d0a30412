//! Outcome and result formatting
//!
//! Exactly one outcome is produced per request and rendered as one JSON line.

pub mod format;
pub mod outcome;

pub use format::format;
pub use outcome::{InvocationOutcome, ReturnValue};
