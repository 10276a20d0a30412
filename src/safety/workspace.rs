/// Compilation output directory management
///
/// Every run starts from an empty directory so a stale class file from an
/// earlier run can never be loaded in place of a fresh one. Removing the
/// directory afterwards is left to the sandbox that owns the filesystem.
use crate::config::types::{ExecError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Workspace holding generated sources and compiled classes for one run
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Create (or empty) the directory at `root`.
    pub fn prepare(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        if root.exists() {
            log::debug!("Clearing stale workspace contents in {}", root.display());
            for entry in fs::read_dir(&root)? {
                let path = entry?.path();
                if path.is_dir() && !path.is_symlink() {
                    fs::remove_dir_all(&path)?;
                } else {
                    fs::remove_file(&path)?;
                }
            }
        } else {
            fs::create_dir_all(&root)?;
        }
        Ok(Self { root })
    }

    /// Use `root` as-is without clearing it.
    pub fn existing(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the `.java` file for `class_name`.
    pub fn source_path(&self, class_name: &str) -> PathBuf {
        self.root.join(format!("{}.java", class_name))
    }

    /// Path of the compiled `.class` file for `class_name`.
    pub fn class_path(&self, class_name: &str) -> PathBuf {
        self.root.join(format!("{}.class", class_name))
    }

    /// Write the source for `class_name` and return its path.
    pub fn write_source(&self, class_name: &str, source: &str) -> io::Result<PathBuf> {
        let path = self.source_path(class_name);
        fs::write(&path, source)?;
        Ok(path)
    }
}

/// Prepare a workspace, reporting failure as a compilation error.
pub fn prepare_for_compilation(root: &Path) -> Result<Workspace> {
    Workspace::prepare(root).map_err(|e| {
        ExecError::Compilation(format!(
            "cannot prepare output directory {}: {}",
            root.display(),
            e
        ))
    })
}
