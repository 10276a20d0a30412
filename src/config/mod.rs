//! Configuration
//!
//! Request loading from the environment, toolchain presets and shared types.

pub mod presets;
pub mod request;
pub mod types;
