use crate::parser::ParseError;
use std::fmt;
use std::io::Error as IOError;
use std::path::PathBuf;
use std::time::Duration;

/// Failure to obtain counters from one subject invocation.
#[derive(Debug)]
pub enum ExecError {
    /// The subject executable could not be started.
    Launch { path: PathBuf, source: IOError },
    /// The subject was started but waiting for it or collecting its
    /// output failed.
    Wait { path: PathBuf, source: IOError },
    /// The subject did not terminate in time and was killed.
    Timeout { path: PathBuf, after: Duration },
    /// The subject output does not carry the expected counters.
    Malformed {
        path: PathBuf,
        error: ParseError,
        stderr: String,
    },
}

impl ExecError {
    /// Path of the subject executable that failed.
    pub fn path(&self) -> &PathBuf {
        match self {
            ExecError::Launch { path, .. }
            | ExecError::Wait { path, .. }
            | ExecError::Timeout { path, .. }
            | ExecError::Malformed { path, .. } => path,
        }
    }
}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecError::Launch { path, source } => write!(
                f,
                "failed to launch subject {}: {}",
                path.display(),
                source
            ),
            ExecError::Wait { path, source } => write!(
                f,
                "failed to wait for subject {}: {}",
                path.display(),
                source
            ),
            ExecError::Timeout { path, after } => write!(
                f,
                "subject {} killed after {:?} without terminating",
                path.display(),
                after
            ),
            ExecError::Malformed {
                path,
                error,
                stderr,
            } => {
                write!(
                    f,
                    "malformed output from subject {}: {}",
                    path.display(),
                    error
                )?;
                let stderr = stderr.trim();
                if !stderr.is_empty() {
                    write!(f, "\nsubject stderr:\n{}", stderr)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ExecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExecError::Launch { source, .. }
            | ExecError::Wait { source, .. } => Some(source),
            ExecError::Malformed { error, .. } => Some(error),
            ExecError::Timeout { .. } => None,
        }
    }
}
