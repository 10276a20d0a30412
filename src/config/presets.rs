/// Java toolchain preset
///
/// Describes which executables compile, inspect and run the generated classes,
/// and the JVM options used for the call. Resolved from `JAVA_HOME` when it is
/// set, otherwise from `PATH`.
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaToolchain {
    /// Compiler executable
    pub javac: PathBuf,
    /// Class file disassembler used to enumerate members
    pub javap: PathBuf,
    /// JVM launcher
    pub java: PathBuf,
    /// Options passed to the JVM before the main class
    pub jvm_options: Vec<String>,
}

impl Default for JavaToolchain {
    fn default() -> Self {
        Self::from_bin_dir(None)
    }
}

impl JavaToolchain {
    pub fn from_env() -> Self {
        let java_home = std::env::var_os("JAVA_HOME")
            .map(PathBuf::from)
            .filter(|home| !home.as_os_str().is_empty());
        match java_home {
            Some(home) => Self::from_bin_dir(Some(&home.join("bin"))),
            None => Self::default(),
        }
    }

    fn from_bin_dir(bin_dir: Option<&Path>) -> Self {
        let tool = |name: &str| match bin_dir {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        };
        Self {
            javac: tool("javac"),
            javap: tool("javap"),
            java: tool("java"),
            jvm_options: vec![
                "-XX:+UseSerialGC".to_string(),
                "-XX:TieredStopAtLevel=1".to_string(),
                "-Dfile.encoding=UTF-8".to_string(),
            ],
        }
    }

    /// Whether every tool answers `-version` successfully.
    pub fn check(&self) -> bool {
        [&self.javac, &self.javap, &self.java].iter().all(|tool| {
            let available = Command::new(tool)
                .arg("-version")
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .map(|status| status.success())
                .unwrap_or(false);
            if !available {
                log::info!("Java tool unavailable: {}", tool.display());
            }
            available
        })
    }
}
