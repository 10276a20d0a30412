/// JVM invoker
///
/// Compiles the call stub next to the loaded class, runs it on a fresh JVM and
/// reads back the report it writes.
use super::stub::call_stub;
use super::Invoker;
use crate::args::ParsedArgument;
use crate::compile::javac::JavacCompiler;
use crate::compile::{CallableMember, LoadedModule};
use crate::config::presets::JavaToolchain;
use crate::config::types::{ExecError, Result, INVOKER_CLASS_NAME};
use crate::safety::workspace::Workspace;
use crate::utils::output::{CommandOutput, OutputCollector};
use crate::verdict::ReturnValue;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::Path;
use std::process::Command;

/// File the stub writes its report to, inside the class directory
pub const REPORT_FILE: &str = "invocation-report.json";

/// Report written by the call stub
#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StubReport {
    Null,
    Array { items: Value },
    Scalar { text: String },
    Fault { message: String, trace: String },
}

impl StubReport {
    pub fn into_result(self) -> Result<ReturnValue> {
        match self {
            StubReport::Null => Ok(ReturnValue::Null),
            StubReport::Array {
                items: Value::Array(items),
            } => Ok(ReturnValue::Array(items)),
            StubReport::Array { items } => Err(ExecError::invocation(
                "malformed invocation report",
                format!("expected an array of items, got {}", items),
            )),
            StubReport::Scalar { text } => Ok(ReturnValue::Scalar(text)),
            StubReport::Fault { message, trace } => {
                Err(ExecError::invocation(message, trace.trim_end()))
            }
        }
    }
}

pub struct JvmInvoker {
    toolchain: JavaToolchain,
    compiler: JavacCompiler,
    collector: OutputCollector,
}

impl JvmInvoker {
    pub fn new(toolchain: JavaToolchain) -> Self {
        Self {
            compiler: JavacCompiler::new(toolchain.clone()),
            toolchain,
            collector: OutputCollector::default(),
        }
    }

    /// Command line running the stub against `class_dir`.
    pub fn command(toolchain: &JavaToolchain, class_dir: &Path, report: &Path) -> Command {
        let mut command = Command::new(&toolchain.java);
        command
            .args(&toolchain.jvm_options)
            .arg("-classpath")
            .arg(class_dir)
            .arg(INVOKER_CLASS_NAME)
            .arg(report);
        command
    }

    fn log_user_output(output: &CommandOutput) {
        let stdout = output.stdout.text();
        if !stdout.is_empty() {
            log::debug!("Invoked code stdout:\n{}", stdout);
        }
        let stderr = output.stderr.text();
        if !stderr.is_empty() {
            log::debug!("Invoked code stderr:\n{}", stderr);
        }
    }
}

impl Invoker for JvmInvoker {
    fn invoke(
        &self,
        module: &LoadedModule,
        member: &CallableMember,
        args: &[ParsedArgument],
    ) -> Result<ReturnValue> {
        if !module.has_default_constructor {
            return Err(ExecError::load(
                &module.class_name,
                "no public no-argument constructor",
            ));
        }

        let workspace = Workspace::existing(&module.class_dir);
        let stub_source = workspace
            .write_source(INVOKER_CLASS_NAME, &call_stub(module, member, args))
            .map_err(|e| ExecError::invocation("cannot write call stub", e.to_string()))?;
        self.compiler
            .compile_file(&stub_source, &module.class_dir)
            .map_err(|diagnostics| ExecError::invocation("cannot compile call stub", diagnostics))?;

        let report_path = module.class_dir.join(REPORT_FILE);
        match fs::remove_file(&report_path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(ExecError::invocation("cannot clear stale report", e.to_string()))
            }
        }

        log::info!("Invoking {}.{}", module.class_name, member);
        let output = self
            .collector
            .run(&mut Self::command(&self.toolchain, &module.class_dir, &report_path))
            .map_err(|e| {
                ExecError::invocation(
                    format!("cannot run {}", self.toolchain.java.display()),
                    e.to_string(),
                )
            })?;
        Self::log_user_output(&output);

        let report = match fs::read_to_string(&report_path) {
            Ok(report) => report,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ExecError::invocation(
                    format!(
                        "JVM finished with {} before reporting a result",
                        output.describe_status()
                    ),
                    output.stderr.text().trim_end(),
                ));
            }
            Err(e) => return Err(ExecError::invocation("cannot read invocation report", e.to_string())),
        };

        let report: StubReport = serde_json::from_str(&report)
            .map_err(|e| ExecError::invocation("malformed invocation report", e.to_string()))?;
        report.into_result()
    }
}
