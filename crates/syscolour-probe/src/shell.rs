use std::ffi::OsStr;
use std::io::{self, Read};
use std::process::{ChildStdout, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use wait_timeout::ChildExt;

use crate::error::ProbeError;

/// Output of a finished (or killed) subprocess.
#[derive(Debug, Clone)]
pub struct Captured {
    /// Everything the process wrote to stdout before it exited or was killed.
    pub stdout: Vec<u8>,
    /// Exit status, `None` when the process was killed after its timeout.
    pub status: Option<ExitStatus>,
}

impl Captured {
    /// True when the process outlived its timeout and was killed.
    pub fn timed_out(&self) -> bool {
        self.status.is_none()
    }

    /// True when the process exited on its own with a zero status.
    pub fn success(&self) -> bool {
        self.status.is_some_and(|status| status.success())
    }
}

/// How long stdout may stay open after the child is gone.
const DRAIN_GRACE: Duration = Duration::from_millis(200);

/// Run `program` with `args`, capturing stdout, waiting at most `timeout`.
///
/// Nothing is written to the child's stdin and its stderr is discarded.
///
/// # Timeouts
///
/// A process still running when `timeout` elapses is killed and reaped, and
/// whatever it had already written to stdout is returned with
/// `status: None`. No error is raised for the timeout itself; callers
/// decide what partial output means for them.
///
/// # Notes
///
/// Stdout is drained on a separate thread while the child runs. A
/// descendant that inherited the pipe can keep it open after the child
/// exits; reading then stops at the later of the deadline and a short grace
/// period, and the reader thread finishes on its own once the pipe closes.
pub fn run_captured<P, I, S>(
    program: P,
    args: I,
    timeout: Duration,
) -> Result<Captured, ProbeError>
where
    P: AsRef<OsStr>,
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let label = program.as_ref().to_string_lossy().into_owned();
    let deadline = Instant::now() + timeout;

    let mut child = Command::new(program.as_ref())
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        // `defaults read` complains on stderr when a key is unset
        .stderr(Stdio::null())
        .spawn()?;

    tracing::debug!(command = %label, pid = child.id(), "spawned");

    let chunks = child.stdout.take().map(spawn_reader);

    let status = match child.wait_timeout(timeout)? {
        Some(status) => Some(status),
        None => {
            tracing::warn!(command = %label, ?timeout, "command timed out, using partial output");
            child.kill()?;
            child.wait()?;
            None
        }
    };

    let stdout = match chunks {
        Some(chunks) => {
            let until = deadline.max(Instant::now() + DRAIN_GRACE);
            drain(&label, &chunks, until)?
        }
        None => Vec::new(),
    };

    tracing::debug!(command = %label, ?status, bytes = stdout.len(), "finished");

    Ok(Captured { stdout, status })
}

fn spawn_reader(mut pipe: ChildStdout) -> Receiver<io::Result<Vec<u8>>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = [0u8; 4096];
        loop {
            let chunk = match pipe.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => Ok(buf[..n].to_vec()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => Err(e),
            };
            let failed = chunk.is_err();
            if tx.send(chunk).is_err() || failed {
                break;
            }
        }
    });
    rx
}

/// Collects chunks until the pipe closes or `until` passes.
fn drain(
    label: &str,
    chunks: &Receiver<io::Result<Vec<u8>>>,
    until: Instant,
) -> Result<Vec<u8>, ProbeError> {
    let mut stdout = Vec::new();
    loop {
        match chunks.recv_timeout(until.saturating_duration_since(Instant::now())) {
            Ok(chunk) => stdout.extend_from_slice(&chunk?),
            Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!(command = %label, "stdout still open, using output so far");
                break;
            }
        }
    }
    Ok(stdout)
}
