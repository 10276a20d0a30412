/// Bounded output collection for toolchain child processes
///
/// stdout and stderr are drained on separate threads so a child that fills one
/// pipe cannot stall on it while the other is being read. Each stream keeps at
/// most its configured number of bytes; the rest is read and discarded.
use std::io::{self, Read};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;

/// Output limits configuration
#[derive(Debug, Clone)]
pub struct OutputLimits {
    /// Per-stream stdout limit (bytes)
    pub stdout_limit: usize,
    /// Per-stream stderr limit (bytes)
    pub stderr_limit: usize,
}

impl Default for OutputLimits {
    fn default() -> Self {
        OutputLimits {
            stdout_limit: 1024 * 1024, // 1 MB stdout
            stderr_limit: 1024 * 1024, // 1 MB stderr
        }
    }
}

/// Collected stream contents
#[derive(Debug, Clone, Default)]
pub struct StreamCapture {
    pub data: Vec<u8>,
    pub truncated: bool,
}

impl StreamCapture {
    /// Lossy UTF-8 text, with a marker appended when bytes were dropped.
    pub fn text(&self) -> String {
        let mut text = String::from_utf8_lossy(&self.data).into_owned();
        if self.truncated {
            text.push_str("\n[output truncated]");
        }
        text
    }
}

/// Exit status and output of a finished child process
#[derive(Debug)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: StreamCapture,
    pub stderr: StreamCapture,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Human-readable exit description, e.g. `exit status 1` or `signal 9`.
    pub fn describe_status(&self) -> String {
        if let Some(code) = self.status.code() {
            return format!("exit status {}", code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = self.status.signal() {
                return format!("signal {}", signal);
            }
        }
        "unknown exit status".to_string()
    }
}

/// Output collector with bounded collection
pub struct OutputCollector {
    limits: OutputLimits,
}

impl Default for OutputCollector {
    fn default() -> Self {
        Self::new(OutputLimits::default())
    }
}

impl OutputCollector {
    /// Create new output collector with limits
    pub fn new(limits: OutputLimits) -> Self {
        OutputCollector { limits }
    }

    /// Spawn `command` with piped output, wait for it and collect both streams.
    pub fn run(&self, command: &mut Command) -> io::Result<CommandOutput> {
        log::debug!("Spawning {:?}", command);
        let mut child = command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let stdout_limit = self.limits.stdout_limit;
        let stderr_limit = self.limits.stderr_limit;
        let stdout_handle = child
            .stdout
            .take()
            .map(|stream| thread::spawn(move || collect_stream(stream, stdout_limit)));
        let stderr_handle = child
            .stderr
            .take()
            .map(|stream| thread::spawn(move || collect_stream(stream, stderr_limit)));

        let status = child.wait()?;
        let stdout = join_collector(stdout_handle)?;
        let stderr = join_collector(stderr_handle)?;

        log::debug!(
            "Child finished with {:?} (stdout {} bytes, stderr {} bytes)",
            status,
            stdout.data.len(),
            stderr.data.len()
        );

        Ok(CommandOutput {
            status,
            stdout,
            stderr,
        })
    }
}

fn join_collector(
    handle: Option<thread::JoinHandle<io::Result<StreamCapture>>>,
) -> io::Result<StreamCapture> {
    match handle {
        Some(handle) => handle
            .join()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "output collector thread panicked"))?,
        None => Ok(StreamCapture::default()),
    }
}

/// Collect from a single stream with limit
fn collect_stream<R: Read>(mut stream: R, limit: usize) -> io::Result<StreamCapture> {
    let mut capture = StreamCapture::default();
    let mut chunk = [0u8; 4096];

    loop {
        let n = match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        let room = limit.saturating_sub(capture.data.len());
        if n > room {
            capture.data.extend_from_slice(&chunk[..room]);
            capture.truncated = true;
        } else {
            capture.data.extend_from_slice(&chunk[..n]);
        }
    }

    Ok(capture)
}
