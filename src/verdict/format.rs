/// Single-line JSON rendering of an outcome
///
/// Success renders as `{"result":...}` and failure as `{"error":"..."}`.
/// Scalars are always rendered as JSON strings; arrays keep their element
/// types. `serde_json` escapes quotes and control characters, so the line is
/// always parseable and never spans more than one line.
use super::outcome::{InvocationOutcome, ReturnValue};
use serde_json::{json, Value};

pub fn format(outcome: &InvocationOutcome) -> String {
    let line = match outcome {
        InvocationOutcome::Success(value) => json!({ "result": result_value(value) }),
        InvocationOutcome::Failure { message, .. } => json!({ "error": message }),
    };
    line.to_string()
}

fn result_value(value: &ReturnValue) -> Value {
    match value {
        ReturnValue::Null => Value::Null,
        ReturnValue::Array(items) => Value::Array(items.clone()),
        ReturnValue::Scalar(text) => Value::String(text.clone()),
    }
}
