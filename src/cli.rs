use crate::config::presets::JavaToolchain;
use crate::config::request::RuntimeSettings;
use crate::config::types::ExecutionRequest;
use crate::exec::Executor;
use crate::verdict::{self, InvocationOutcome};
use anyhow::{Context, Result};
use std::io::Write;

/// Process entrypoint: read the environment, execute, emit one line.
///
/// Returns the process exit status.
pub fn run() -> i32 {
    // Silent unless RUST_LOG asks for more; stderr carries the error line.
    env_logger::init();

    let outcome = execute_from_env();
    match emit(&outcome) {
        Ok(()) => outcome.exit_code(),
        Err(e) => {
            log::warn!("Failed to write outcome: {:#}", e);
            1
        }
    }
}

fn execute_from_env() -> InvocationOutcome {
    let request = match ExecutionRequest::from_env() {
        Ok(request) => request,
        Err(e) => return e.into(),
    };
    let settings = RuntimeSettings::from_env();
    let toolchain = JavaToolchain::from_env();
    log::debug!(
        "Using {:?} with output directory {}",
        toolchain,
        settings.classes_dir.display()
    );

    Executor::java(toolchain, settings.classes_dir).execute(&request)
}

/// Write the outcome line: stdout on success, stderr on failure.
fn emit(outcome: &InvocationOutcome) -> Result<()> {
    let line = verdict::format(outcome);
    if outcome.is_success() {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", line).context("writing result to stdout")?;
        stdout.flush().context("flushing stdout")?;
    } else {
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "{}", line).context("writing error to stderr")?;
        stderr.flush().context("flushing stderr")?;
    }
    Ok(())
}
