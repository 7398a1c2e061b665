//! Sweep driver collecting counters into a [`SweepSeries`].

use crate::executor::Executor;
use crate::series::SweepSeries;
use crate::subject::ExecError;
use crate::sweep::{Sweep, WorkloadConfig};
use std::fmt;
use std::time::Instant;

/// A sweep interrupted by a failing step.
///
/// The series collected up to, and excluding, the failing step is kept
/// in `partial`.
#[derive(Debug)]
pub struct SweepFailure {
    /// Index of the failing step in the sweep.
    pub step: usize,
    /// Workload mix of the failing step.
    pub config: WorkloadConfig,
    pub error: ExecError,
    pub partial: SweepSeries,
}

impl fmt::Display for SweepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sweep step {} (read ratio {}, write ratio {}) failed: {}",
            self.step,
            self.config.read_ratio(),
            self.config.write_ratio(),
            self.error
        )
    }
}

impl std::error::Error for SweepFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Runs an [`Executor`] over every configuration of a [`Sweep`].
///
/// Steps run one after the other, in sweep order. Their counters are
/// appended as is to the resulting series. The first failing step ends
/// the sweep.
pub struct Aggregator<E: Executor> {
    executor: E,
}

impl<E: Executor> Aggregator<E> {
    pub fn new(executor: E) -> Self {
        Aggregator { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn into_inner(self) -> E {
        self.executor
    }

    /// Run the whole sweep and return its series.
    pub fn run(&mut self, sweep: &Sweep) -> Result<SweepSeries, SweepFailure> {
        let t0 = Instant::now();
        let mut series = SweepSeries::with_capacity(sweep.points());
        log::info!(
            "Sweeping {} over {} read/write mixtures",
            self.executor.name(),
            sweep.points()
        );

        for (step, config) in sweep.iter().enumerate() {
            match self.executor.execute(&config) {
                Ok(result) => {
                    log::debug!(
                        "{} step {}: read ratio {} -> {:?}",
                        self.executor.name(),
                        step,
                        config.read_ratio(),
                        result
                    );
                    series.push(&config, &result);
                }
                Err(error) => {
                    return Err(SweepFailure {
                        step,
                        config,
                        error,
                        partial: series,
                    })
                }
            }
        }

        log::info!(
            "Swept {} in {:.3}s",
            self.executor.name(),
            t0.elapsed().as_secs_f64()
        );
        Ok(series)
    }
}
