//! Utilities
//!
//! Bounded output collection for toolchain child processes.

pub mod output;
