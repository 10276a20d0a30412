/// Core types and errors shared by every pipeline stage
use std::fmt;
use thiserror::Error;

/// Name of the generated class that hosts the caller's snippet
pub const USER_CLASS_NAME: &str = "UserCode";

/// Name of the generated class that performs the call
pub const INVOKER_CLASS_NAME: &str = "UserCodeInvoker";

/// Member invoked when `METHOD` is not provided
pub const DEFAULT_METHOD_NAME: &str = "run";

/// Compilation output directory used when `CLASSES_DIR` is not provided
pub const DEFAULT_CLASSES_DIR: &str = "/sandbox/compiled-classes";

/// One execution request, built once per process from the environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionRequest {
    /// Decoded snippet source
    pub source_code: String,
    /// Member to invoke
    pub method_name: String,
    /// Raw comma-separated argument list (possibly empty)
    pub raw_input: String,
}

/// Closed set of failure kinds surfaced by the pipeline
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    Decode,
    Compilation,
    Load,
    Resolution,
    Invocation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Configuration => "configuration_error",
            ErrorKind::Decode => "decode_error",
            ErrorKind::Compilation => "compilation_error",
            ErrorKind::Load => "load_error",
            ErrorKind::Resolution => "resolution_error",
            ErrorKind::Invocation => "invocation_error",
        };
        write!(f, "{}", name)
    }
}

/// Error type for every stage of the pipeline
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("{0}")]
    Configuration(String),

    #[error("Failed to decode CODE: {0}")]
    Decode(String),

    #[error("Compilation failed: {0}")]
    Compilation(String),

    #[error("Failed to load {class}: {reason}")]
    Load { class: String, reason: String },

    #[error("No method '{requested}' accepting {arity} argument(s); available methods: {}", format_signatures(.available))]
    Resolution {
        requested: String,
        arity: usize,
        available: Vec<String>,
    },

    #[error("{message}\n{trace}")]
    Invocation { message: String, trace: String },
}

fn format_signatures(signatures: &[String]) -> String {
    if signatures.is_empty() {
        "<none>".to_string()
    } else {
        signatures.join(", ")
    }
}

impl ExecError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExecError::Configuration(_) => ErrorKind::Configuration,
            ExecError::Decode(_) => ErrorKind::Decode,
            ExecError::Compilation(_) => ErrorKind::Compilation,
            ExecError::Load { .. } => ErrorKind::Load,
            ExecError::Resolution { .. } => ErrorKind::Resolution,
            ExecError::Invocation { .. } => ErrorKind::Invocation,
        }
    }

    pub(crate) fn load(class: &str, reason: impl Into<String>) -> Self {
        ExecError::Load {
            class: class.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invocation(message: impl Into<String>, trace: impl Into<String>) -> Self {
        ExecError::Invocation {
            message: message.into(),
            trace: trace.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExecError>;
