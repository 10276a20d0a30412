/// Terminal outcome of one execution request
use crate::config::types::{ErrorKind, ExecError};
use serde_json::Value;

/// Value returned by the invoked member
#[derive(Clone, Debug, PartialEq)]
pub enum ReturnValue {
    Null,
    /// Arrays and collections, element-wise with nesting preserved
    Array(Vec<Value>),
    /// `toString()` of any other value
    Scalar(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum InvocationOutcome {
    Success(ReturnValue),
    Failure { kind: ErrorKind, message: String },
}

impl InvocationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, InvocationOutcome::Success(_))
    }

    /// Process exit status for this outcome.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

impl From<ExecError> for InvocationOutcome {
    fn from(err: ExecError) -> Self {
        InvocationOutcome::Failure {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<Result<ReturnValue, ExecError>> for InvocationOutcome {
    fn from(result: Result<ReturnValue, ExecError>) -> Self {
        match result {
            Ok(value) => InvocationOutcome::Success(value),
            Err(err) => err.into(),
        }
    }
}
