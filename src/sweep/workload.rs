use super::SweepError;
use crate::protocol::{RATIO_MAX, RATIO_MIN};

/// Slack allowed on `read_ratio + write_ratio == 100`.
///
/// Write ratios are derived as `100 - read_ratio` which is not always
/// exact in floating point.
pub const RATIO_SUM_TOLERANCE: f64 = 1e-9;

/// One read/write mixture handed to a subject program.
///
/// Both ratios are percentages in `[0, 100]` and sum to 100.
/// Values are never rounded: a read ratio of `100 / 3` reaches the subject
/// as `33.333333333333336`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorkloadConfig {
    read_ratio: f64,
    write_ratio: f64,
}

impl WorkloadConfig {
    /// Build a workload mix from an explicit pair of ratios.
    pub fn new(read_ratio: f64, write_ratio: f64) -> Result<Self, SweepError> {
        let in_range = |r: f64| (RATIO_MIN..=RATIO_MAX).contains(&r);
        let sum = read_ratio + write_ratio;

        if !in_range(read_ratio)
            || !in_range(write_ratio)
            || (sum - RATIO_MAX).abs() > RATIO_SUM_TOLERANCE
        {
            return Err(SweepError::InvariantViolation {
                read_ratio,
                write_ratio,
            });
        }

        Ok(WorkloadConfig {
            read_ratio,
            write_ratio,
        })
    }

    /// Build a workload mix from its read ratio. The write ratio is the
    /// complement to 100.
    pub fn from_read_ratio(read_ratio: f64) -> Result<Self, SweepError> {
        Self::new(read_ratio, RATIO_MAX - read_ratio)
    }

    /// Complement a read ratio that the sweep generator already bounded.
    pub(super) fn generated(read_ratio: f64) -> Self {
        let config = WorkloadConfig {
            read_ratio,
            write_ratio: RATIO_MAX - read_ratio,
        };
        debug_assert!(
            Self::new(config.read_ratio, config.write_ratio).is_ok(),
            "sweep generated an invalid workload mix {:?}",
            config
        );
        config
    }

    pub fn read_ratio(&self) -> f64 {
        self.read_ratio
    }

    pub fn write_ratio(&self) -> f64 {
        self.write_ratio
    }
}
