/// `javac` compilation service
use super::{CompilationService, CompilationUnit, CompiledArtifact};
use crate::config::presets::JavaToolchain;
use crate::config::types::{ExecError, Result};
use crate::safety::workspace::Workspace;
use crate::utils::output::OutputCollector;
use std::path::Path;
use std::process::Command;

pub struct JavacCompiler {
    toolchain: JavaToolchain,
    collector: OutputCollector,
}

impl JavacCompiler {
    pub fn new(toolchain: JavaToolchain) -> Self {
        Self {
            toolchain,
            collector: OutputCollector::default(),
        }
    }

    /// Command line compiling `source` into `out_dir`, with `out_dir` on the classpath.
    pub fn command(toolchain: &JavaToolchain, source: &Path, out_dir: &Path) -> Command {
        let mut command = Command::new(&toolchain.javac);
        command
            .arg("-encoding")
            .arg("UTF-8")
            .arg("-nowarn")
            .arg("-classpath")
            .arg(out_dir)
            .arg("-d")
            .arg(out_dir)
            .arg(source);
        command
    }

    /// Compile one source file that already sits in `out_dir`.
    ///
    /// Returns the compiler diagnostics as the error on failure.
    pub fn compile_file(&self, source: &Path, out_dir: &Path) -> std::result::Result<(), String> {
        let output = self
            .collector
            .run(&mut Self::command(&self.toolchain, source, out_dir))
            .map_err(|e| format!("cannot run {}: {}", self.toolchain.javac.display(), e))?;
        if output.success() {
            return Ok(());
        }

        let mut diagnostics = output.stderr.text();
        let stdout = output.stdout.text();
        if !stdout.trim().is_empty() {
            diagnostics.push_str(&stdout);
        }
        if diagnostics.trim().is_empty() {
            diagnostics = format!("javac finished with {}", output.describe_status());
        }
        Err(diagnostics.trim_end().to_string())
    }
}

impl CompilationService for JavacCompiler {
    fn compile(&self, unit: &CompilationUnit, out_dir: &Path) -> Result<CompiledArtifact> {
        let workspace = Workspace::existing(out_dir);
        let source = workspace
            .write_source(&unit.class_name, &unit.source)
            .map_err(|e| ExecError::Compilation(format!("cannot write source: {}", e)))?;

        log::info!("Compiling {} into {}", unit.class_name, out_dir.display());
        self.compile_file(&source, out_dir)
            .map_err(ExecError::Compilation)?;

        if !workspace.class_path(&unit.class_name).is_file() {
            return Err(ExecError::Compilation(format!(
                "javac produced no {}.class",
                unit.class_name
            )));
        }

        Ok(CompiledArtifact {
            class_name: unit.class_name.clone(),
            class_dir: out_dir.to_path_buf(),
        })
    }
}
