//! Invocation
//!
//! Calls the resolved member with the parsed arguments and captures either the
//! returned value or the raised fault. Faults never escape as panics; they come
//! back as [`ExecError::Invocation`](crate::config::types::ExecError).

pub mod jvm;
pub mod stub;

use crate::args::ParsedArgument;
use crate::compile::{CallableMember, LoadedModule};
use crate::config::types::Result;
use crate::verdict::ReturnValue;

pub trait Invoker {
    fn invoke(
        &self,
        module: &LoadedModule,
        member: &CallableMember,
        args: &[ParsedArgument],
    ) -> Result<ReturnValue>;
}
