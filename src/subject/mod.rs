//! Invocation of subject programs.
//!
//! A [`Subject`] names an executable implementing one eviction policy.
//! Running it on a [`WorkloadConfig`] starts the executable with the
//! workload mix in its environment (see [`protocol`](crate::protocol)),
//! waits for it and parses the counters it printed into a [`RunResult`].
//!
//! The child environment is cleared before the workload mix is injected.
//! Only `PATH` and the extra variables registered with
//! [`Subject::with_env`] are forwarded.

use crate::parser::RunResult;
use crate::protocol::{READ_RATIO_VAR, WRITE_RATIO_VAR};
use crate::sweep::WorkloadConfig;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

mod error;
pub use error::ExecError;
mod process;

/// An executable under test and how to invoke it.
#[derive(Clone, Debug)]
pub struct Subject {
    name: String,
    path: PathBuf,
    args: Vec<String>,
    title: Option<String>,
    env: BTreeMap<String, String>,
    timeout: Option<Duration>,
}

impl Subject {
    /// Create a subject named `name` running the executable at `path`.
    pub fn new<S: Into<String>, P: AsRef<Path>>(name: S, path: P) -> Self {
        Subject {
            name: name.into(),
            path: path.as_ref().to_path_buf(),
            args: Vec::new(),
            title: None,
            env: BTreeMap::new(),
            timeout: None,
        }
    }

    /// Create a subject named after the file stem of `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let name = path
            .as_ref()
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.as_ref().display().to_string());
        Self::new(name, path)
    }

    /// Set the title shown on reports of this subject.
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append command line arguments passed to the executable.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Forward an extra environment variable to the subject.
    ///
    /// The workload mix variables cannot be overridden this way.
    pub fn with_env<K: Into<String>, V: Into<String>>(
        mut self,
        key: K,
        value: V,
    ) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Kill invocations still running after `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Report title, defaulting to the subject name.
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(self.name.as_str())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Prepare the command running this subject on `config`.
    fn command(&self, config: &WorkloadConfig) -> Command {
        let mut cmd = Command::new(&self.path);
        cmd.args(&self.args);
        cmd.env_clear();
        if let Some(path) = std::env::var_os("PATH") {
            cmd.env("PATH", path);
        }
        cmd.envs(&self.env);
        cmd.env(READ_RATIO_VAR, config.read_ratio().to_string());
        cmd.env(WRITE_RATIO_VAR, config.write_ratio().to_string());
        cmd
    }

    /// Run the subject once on `config` and parse its counters.
    ///
    /// The exit status of the subject is not checked: a subject is
    /// considered successful as long as it printed all of its counters.
    /// When it did not, its standard error is attached to the returned
    /// error.
    pub fn run(&self, config: &WorkloadConfig) -> Result<RunResult, ExecError> {
        log::debug!(
            "Running {} with {}={} {}={}",
            self.path.display(),
            READ_RATIO_VAR,
            config.read_ratio(),
            WRITE_RATIO_VAR,
            config.write_ratio()
        );

        let captured =
            process::execute(self.command(config), &self.path, self.timeout)?;

        if !captured.status.success() {
            log::warn!(
                "Subject {} exited with {}",
                self.path.display(),
                captured.status
            );
        }
        if !captured.stderr.trim().is_empty() {
            log::debug!(
                "Subject {} stderr:\n{}",
                self.path.display(),
                captured.stderr.trim_end()
            );
        }

        RunResult::parse(captured.stdout.as_str()).map_err(|error| {
            ExecError::Malformed {
                path: self.path.clone(),
                error,
                stderr: captured.stderr,
            }
        })
    }
}
