use std::fmt;

/// Errors raised while describing a sweep or one of its steps.
#[derive(Debug, Clone, PartialEq)]
pub enum SweepError {
    /// A sweep needs at least one sample point.
    InvalidResolution(usize),
    /// The sweep range is not an ascending sub-range of `[0, 100]`.
    InvalidRange { start: f64, end: f64 },
    /// A workload configuration whose ratios are out of `[0, 100]` or do
    /// not sum to 100.
    InvariantViolation { read_ratio: f64, write_ratio: f64 },
}

impl fmt::Display for SweepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepError::InvalidResolution(n) => write!(
                f,
                "invalid sweep resolution {}: at least one point is required",
                n
            ),
            SweepError::InvalidRange { start, end } => write!(
                f,
                "invalid sweep range [{}, {}]: must be ascending within [0, 100]",
                start, end
            ),
            SweepError::InvariantViolation {
                read_ratio,
                write_ratio,
            } => write!(
                f,
                "invalid workload mix: read ratio {} + write ratio {} != 100",
                read_ratio, write_ratio
            ),
        }
    }
}

impl std::error::Error for SweepError {}
