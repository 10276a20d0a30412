//! Workspace safety
//!
//! Guarantees every run compiles into an empty output directory.

pub mod workspace;
