//! snipbox: one-shot compile, resolve and invoke core for Java snippets
//!
//! Runs inside an already-sandboxed, disposable environment. Each process
//! handles exactly one request read from the environment and writes exactly
//! one JSON line.
//!
//! # Architecture
//!
//! ## Arguments ([`args`])
//! - [`args::parser`]: bracket/quote-aware parsing of `INPUT` into typed values
//!
//! ## Compilation & Loading ([`compile`])
//! - [`compile::wrapper`]: wraps the snippet into the `UserCode` class
//! - [`compile::javac`]: compilation service backed by `javac`
//! - [`compile::javap`]: module loader enumerating public members via `javap`
//!
//! ## Resolution ([`resolve`])
//! - [`resolve::java_type`]: descriptor parsing and Java assignability
//! - two-pass overload resolution over the member table
//!
//! ## Invocation ([`invoke`])
//! - [`invoke::stub`]: call stub generation
//! - [`invoke::jvm`]: runs the stub and decodes its report
//!
//! ## Execution Control ([`exec`])
//! - [`exec::executor`]: stage orchestration
//!
//! ## Outcome ([`verdict`])
//! - [`verdict::outcome`]: success/failure outcome
//! - [`verdict::format`](mod@verdict::format): the single JSON output line
//!
//! ## Configuration ([`config`]), Workspace ([`safety`]), Utilities ([`utils`])
//! - [`config::request`]: `CODE`/`METHOD`/`INPUT` loading
//! - [`config::presets`]: JDK tool locations and JVM options
//! - [`safety::workspace`]: fresh compilation output directory per run
//! - [`utils::output`]: bounded child process output collection

// Argument parsing
pub mod args;

// Compilation service and module loader
pub mod compile;

// Method resolution
pub mod resolve;

// Invocation
pub mod invoke;

// Execution Control
pub mod exec;

// Outcome & formatting
pub mod verdict;

// Configuration
pub mod config;

// Workspace
pub mod safety;

// Utilities
pub mod utils;

// CLI entrypoint wiring for the snipbox binary.
pub mod cli;

pub use config::types::*;
