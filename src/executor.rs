//! Interface between the sweep driver and whatever produces counters.

use crate::parser::RunResult;
use crate::subject::{ExecError, Subject};
use crate::sweep::WorkloadConfig;

/// Producer of one [`RunResult`] per workload configuration.
///
/// [`Subject`] is the implementation used to benchmark real programs.
pub trait Executor {
    /// Name identifying what is measured, e.g. the eviction policy.
    fn name(&self) -> &str;

    /// Measure the counters of one workload configuration.
    fn execute(
        &mut self,
        config: &WorkloadConfig,
    ) -> Result<RunResult, ExecError>;
}

impl Executor for Subject {
    fn name(&self) -> &str {
        Subject::name(self)
    }

    fn execute(
        &mut self,
        config: &WorkloadConfig,
    ) -> Result<RunResult, ExecError> {
        self.run(config)
    }
}

impl<E: Executor + ?Sized> Executor for &mut E {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn execute(
        &mut self,
        config: &WorkloadConfig,
    ) -> Result<RunResult, ExecError> {
        (**self).execute(config)
    }
}
