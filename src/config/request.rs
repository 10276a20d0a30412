/// Environment-backed loading of the execution request and runtime settings
use crate::config::types::{
    ExecError, ExecutionRequest, Result, DEFAULT_CLASSES_DIR, DEFAULT_METHOD_NAME,
};
use base64::prelude::*;
use std::path::PathBuf;

/// Where the pipeline writes compiled artifacts
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeSettings {
    pub classes_dir: PathBuf,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            classes_dir: PathBuf::from(DEFAULT_CLASSES_DIR),
        }
    }
}

impl RuntimeSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup("CLASSES_DIR").filter(|dir| !dir.trim().is_empty()) {
            Some(dir) => Self {
                classes_dir: PathBuf::from(dir),
            },
            None => Self::default(),
        }
    }
}

impl ExecutionRequest {
    /// Read `CODE`, `METHOD` and `INPUT` from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a request from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let encoded = lookup("CODE")
            .ok_or_else(|| ExecError::Configuration("CODE env variable not set".to_string()))?;
        let source_code = decode_source(&encoded)?;

        let method_name = lookup("METHOD")
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_METHOD_NAME.to_string());
        let raw_input = lookup("INPUT").unwrap_or_default();

        log::debug!(
            "Request: method={} input_len={} source_len={}",
            method_name,
            raw_input.len(),
            source_code.len()
        );

        Ok(Self {
            source_code,
            method_name,
            raw_input,
        })
    }
}

/// Decode a base64 snippet. Line-wrapped encoder output is accepted.
pub fn decode_source(encoded: &str) -> Result<String> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = BASE64_STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| ExecError::Decode(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExecError::Decode(format!("snippet is not UTF-8: {}", e)))
}
