//! Measure how buffer-cache eviction policies react to read/write
//! workload mixtures.
//!
//! Each eviction policy under test is an external program, a
//! [`Subject`]. A [`Sweep`] describes a set of read/write mixtures. The
//! [`Aggregator`] runs a subject once per mixture of the sweep, reads the
//! I/O counters it prints and collects them into a [`SweepSeries`]:
//!
//! ```no_run
//! use iosweep::{Aggregator, Subject, Sweep};
//!
//! let sweep = Sweep::new(101).unwrap();
//! let subject = Subject::new("LRU", "./testpf_LRU");
//! let series = Aggregator::new(subject).run(&sweep).unwrap();
//!
//! assert_eq!(series.len(), 101);
//! println!("{:?}", series.physical_io());
//! ```
//!
//! The [`Campaign`] type sweeps several subjects in a row and writes
//! their series to disk, ready to be plotted.

/// Names of the environment variables and output labels subject
/// programs must use.
pub mod protocol;

/// Read/write mixtures and their generation.
pub mod sweep;
pub use sweep::{Sweep, SweepError, SweepIter, WorkloadConfig};

/// Label-anchored extraction of counters from subject output.
pub mod parser;
pub use parser::{LabelParser, ParseError, RunResult};

pub mod subject;
pub use subject::{ExecError, Subject};

pub mod executor;
pub use executor::Executor;

mod series;
pub use series::SweepSeries;

pub mod aggregator;
pub use aggregator::{Aggregator, SweepFailure};

/// Files handed to plotting tools.
pub mod report;

pub mod campaign;
pub use campaign::{Campaign, CampaignError, SubjectSeries};

/// Campaign description from a configuration file.
///
/// This module is only available with the feature `config`.
#[cfg(feature = "config")]
pub mod config;
