use crate::parser::RunResult;
use crate::sweep::WorkloadConfig;

/// Counters collected over a sweep, one entry per sweep step.
///
/// The read ratios and the four counters are kept in parallel vectors of
/// equal length: index `i` of each of them refers to step `i` of the
/// sweep. The only way to grow a series is [`push`](SweepSeries::push)
/// which extends all five vectors at once.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SweepSeries {
    read_ratios: Vec<f64>,
    logical_io: Vec<u64>,
    physical_io: Vec<u64>,
    disk_reads: Vec<u64>,
    disk_writes: Vec<u64>,
}

impl SweepSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty series with room for `n` steps.
    pub fn with_capacity(n: usize) -> Self {
        SweepSeries {
            read_ratios: Vec::with_capacity(n),
            logical_io: Vec::with_capacity(n),
            physical_io: Vec::with_capacity(n),
            disk_reads: Vec::with_capacity(n),
            disk_writes: Vec::with_capacity(n),
        }
    }

    /// Append the outcome of the next sweep step.
    pub fn push(&mut self, config: &WorkloadConfig, result: &RunResult) {
        self.read_ratios.push(config.read_ratio());
        self.logical_io.push(result.logical_io());
        self.physical_io.push(result.physical_io());
        self.disk_reads.push(result.disk_reads());
        self.disk_writes.push(result.disk_writes());
    }

    /// Number of sweep steps recorded.
    pub fn len(&self) -> usize {
        self.read_ratios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_ratios.is_empty()
    }

    pub fn read_ratios(&self) -> &[f64] {
        &self.read_ratios
    }

    pub fn logical_io(&self) -> &[u64] {
        &self.logical_io
    }

    pub fn physical_io(&self) -> &[u64] {
        &self.physical_io
    }

    pub fn disk_reads(&self) -> &[u64] {
        &self.disk_reads
    }

    pub fn disk_writes(&self) -> &[u64] {
        &self.disk_writes
    }

    /// Step `i` as a read ratio and its counters.
    pub fn get(&self, i: usize) -> Option<(f64, RunResult)> {
        if i >= self.len() {
            return None;
        }
        Some((
            self.read_ratios[i],
            RunResult::new(
                self.logical_io[i],
                self.physical_io[i],
                self.disk_reads[i],
                self.disk_writes[i],
            ),
        ))
    }

    /// Iterate steps in sweep order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, RunResult)> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }
}
