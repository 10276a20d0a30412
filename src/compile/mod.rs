//! Compilation and loading
//!
//! The compiler and the class loader are external collaborators. The core only
//! sees them through [`CompilationService`] and [`ModuleLoader`]; the Java
//! implementations shell out to `javac` and `javap`.

pub mod javac;
pub mod javap;
pub mod wrapper;

use crate::config::types::Result;
use crate::resolve::java_type::JavaType;
use std::fmt;
use std::path::{Path, PathBuf};

/// Full source text submitted to the compiler
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompilationUnit {
    pub class_name: String,
    pub source: String,
}

/// Handle to compiled classes on disk
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledArtifact {
    pub class_name: String,
    pub class_dir: PathBuf,
}

/// One public method discovered on the loaded class
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallableMember {
    pub name: String,
    pub parameter_types: Vec<JavaType>,
    pub return_type: JavaType,
    pub is_static: bool,
}

impl CallableMember {
    pub fn arity(&self) -> usize {
        self.parameter_types.len()
    }
}

impl fmt::Display for CallableMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, param) in self.parameter_types.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", param)?;
        }
        write!(f, ")")
    }
}

/// Loaded class with its callable members in declaration order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedModule {
    pub class_name: String,
    pub class_dir: PathBuf,
    pub has_default_constructor: bool,
    pub members: Vec<CallableMember>,
}

impl LoadedModule {
    /// Signatures of every member, as listed in resolution failures.
    pub fn signatures(&self) -> Vec<String> {
        self.members.iter().map(ToString::to_string).collect()
    }
}

/// Compiles a unit into a loadable artifact, or reports diagnostics.
pub trait CompilationService {
    fn compile(&self, unit: &CompilationUnit, out_dir: &Path) -> Result<CompiledArtifact>;
}

/// Turns a compiled artifact into an enumerable module.
pub trait ModuleLoader {
    fn load(&self, artifact: &CompiledArtifact) -> Result<LoadedModule>;
}
