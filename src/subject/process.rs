use super::ExecError;
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

/// Interval between two checks of a child running under a timeout.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Exit status and full output of a terminated subject.
pub(super) struct Captured {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

type Drained = std::io::Result<Vec<u8>>;

/// Read a child pipe to its end on a separate thread so that neither
/// stdout nor stderr can fill up and block the child.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Receiver<Drained> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let drained = match pipe {
            Some(mut pipe) => pipe.read_to_end(&mut buf).map(|_| buf),
            None => Ok(buf),
        };
        // Nobody listens anymore once the invocation timed out.
        let _ = tx.send(drained);
    });
    rx
}

/// Point in time after which an invocation is abandoned.
#[derive(Clone, Copy)]
struct Deadline {
    at: Instant,
    after: Duration,
}

/// Wait for the output of a drained pipe, no later than `deadline`.
fn collect(
    output: &Receiver<Drained>,
    path: &Path,
    deadline: Option<Deadline>,
) -> Result<String, ExecError> {
    let received = match deadline {
        None => output.recv().map_err(|_| RecvTimeoutError::Disconnected),
        Some(d) => output
            .recv_timeout(d.at.saturating_duration_since(Instant::now())),
    };
    let drained = match (received, deadline) {
        (Ok(drained), _) => drained,
        (Err(RecvTimeoutError::Timeout), Some(d)) => {
            log::debug!(
                "Subject {} exited but its output is still open after {:?}",
                path.display(),
                d.after
            );
            return Err(ExecError::Timeout {
                path: path.to_path_buf(),
                after: d.after,
            });
        }
        (Err(_), _) => Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "output reader thread panicked",
        )),
    };
    let bytes = drained.map_err(|source| ExecError::Wait {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Wait for `child` until `deadline`. Returns `None` if the deadline
/// expired first.
fn wait_until(
    child: &mut Child,
    deadline: Instant,
) -> std::io::Result<Option<ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        let now = Instant::now();
        if now >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL.min(deadline - now));
    }
}

/// Run `cmd` to completion and capture its output.
///
/// With a `timeout`, a child still running when it expires is killed and
/// reaped. The deadline also bounds the collection of its output, which
/// descendants of the child may keep open after it exits. Output readers
/// still blocked at that point are left to finish on their own.
pub(super) fn execute(
    mut cmd: Command,
    path: &Path,
    timeout: Option<Duration>,
) -> Result<Captured, ExecError> {
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| ExecError::Launch {
            path: path.to_path_buf(),
            source,
        })?;

    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let wait_err = |source| ExecError::Wait {
        path: path.to_path_buf(),
        source,
    };
    let deadline = timeout.map(|after| Deadline {
        at: Instant::now() + after,
        after,
    });
    let status = match deadline {
        None => child.wait().map_err(wait_err)?,
        Some(Deadline { at, after }) => {
            match wait_until(&mut child, at).map_err(wait_err)? {
                Some(status) => status,
                None => {
                    log::debug!(
                        "Killing subject {} (pid {}) after {:?}",
                        path.display(),
                        child.id(),
                        after
                    );
                    // The child may exit between the last poll and the
                    // kill. Reaping it is all that matters.
                    let _ = child.kill();
                    child.wait().map_err(wait_err)?;
                    return Err(ExecError::Timeout {
                        path: path.to_path_buf(),
                        after,
                    });
                }
            }
        }
    };

    Ok(Captured {
        status,
        stdout: collect(&stdout, path, deadline)?,
        stderr: collect(&stderr, path, deadline)?,
    })
}
