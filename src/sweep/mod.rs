//! Generation of the workload mixes exercised by a sweep.
//!
//! A [`Sweep`] is a cheap, copyable description of `N` evenly spaced read
//! ratios over a range (by default `[0, 100]`). Iterating it yields one
//! [`WorkloadConfig`] per point, in ascending read ratio order. Iterating
//! twice yields the same configurations.
//!
//! ```
//! use iosweep::Sweep;
//!
//! let ratios: Vec<f64> = Sweep::new(3)
//!     .unwrap()
//!     .into_iter()
//!     .map(|c| c.read_ratio())
//!     .collect();
//! assert_eq!(ratios, vec![0.0, 50.0, 100.0]);
//! ```

use crate::protocol::{RATIO_MAX, RATIO_MIN};
use std::iter::FusedIterator;

mod error;
pub use error::SweepError;
mod workload;
pub use workload::{WorkloadConfig, RATIO_SUM_TOLERANCE};

/// `N` evenly spaced read ratios over an inclusive range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sweep {
    // Number of sample points, at least one.
    points: usize,
    // First read ratio.
    start: f64,
    // Last read ratio. Equal to `start` when there is a single point.
    end: f64,
}

impl Sweep {
    /// Create a sweep of `points` read ratios over `[0, 100]`.
    pub fn new(points: usize) -> Result<Self, SweepError> {
        Self::with_range(points, RATIO_MIN, RATIO_MAX)
    }

    /// Create a sweep of `points` read ratios over `[start, end]`.
    ///
    /// The range must be ascending and fit in `[0, 100]`.
    pub fn with_range(
        points: usize,
        start: f64,
        end: f64,
    ) -> Result<Self, SweepError> {
        if points == 0 {
            return Err(SweepError::InvalidResolution(points));
        }
        if !(RATIO_MIN..=RATIO_MAX).contains(&start)
            || !(RATIO_MIN..=RATIO_MAX).contains(&end)
            || start > end
        {
            return Err(SweepError::InvalidRange { start, end });
        }
        Ok(Sweep { points, start, end })
    }

    /// Number of workload configurations in the sweep.
    pub fn points(&self) -> usize {
        self.points
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// Read ratio at position `i` of the sweep.
    ///
    /// Points are computed as `start + i * step`. The last point is
    /// pinned to `end` so that rounding never leaves it short of the
    /// range.
    fn read_ratio(&self, i: usize) -> f64 {
        if self.points == 1 {
            return self.start;
        }
        if i + 1 == self.points {
            return self.end;
        }
        let step = (self.end - self.start) / (self.points - 1) as f64;
        self.start + i as f64 * step
    }

    /// Iterate the sweep configurations from the first one.
    pub fn iter(&self) -> SweepIter {
        SweepIter {
            sweep: *self,
            pos: 0,
        }
    }
}

impl IntoIterator for Sweep {
    type Item = WorkloadConfig;
    type IntoIter = SweepIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &Sweep {
    type Item = WorkloadConfig;
    type IntoIter = SweepIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the configurations of a [`Sweep`].
#[derive(Clone, Debug)]
pub struct SweepIter {
    sweep: Sweep,
    // Index of the next configuration: in [ 0, sweep.points ]
    pos: usize,
}

impl Iterator for SweepIter {
    type Item = WorkloadConfig;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.sweep.points {
            return None;
        }
        let read_ratio = self.sweep.read_ratio(self.pos);
        self.pos += 1;
        Some(WorkloadConfig::generated(read_ratio))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.sweep.points - self.pos;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SweepIter {}

impl FusedIterator for SweepIter {}
