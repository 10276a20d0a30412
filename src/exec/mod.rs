//! Execution control
//!
//! Wires the pipeline stages together for one request.

pub mod executor;

pub use executor::Executor;
