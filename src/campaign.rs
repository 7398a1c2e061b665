//! Sweeping several subjects with the same workload mixtures.
//!
//! A [`Campaign`] runs one [`Aggregator`] per subject, in the order
//! subjects were added, and optionally writes each resulting series to a
//! report directory (see [`report`](crate::report)).
//!
//! ```no_run
//! use iosweep::{Campaign, Subject, Sweep};
//!
//! let results = Campaign::new(Sweep::new(101).unwrap())
//!     .with_subject(
//!         Subject::new("MRU", "./testpf_MRU")
//!             .with_title("Strategy: MRU Random Access"),
//!     )
//!     .with_subject(
//!         Subject::new("LRU", "./testpf_LRU")
//!             .with_title("Strategy: LRU Random Access"),
//!     )
//!     .with_output_dir("results")
//!     .run()
//!     .unwrap();
//! assert_eq!(results.len(), 2);
//! ```

use crate::aggregator::{Aggregator, SweepFailure};
use crate::report::{write_report, ReportFiles};
use crate::series::SweepSeries;
use crate::subject::Subject;
use crate::sweep::Sweep;
use std::fmt;
use std::io::Error as IOError;
use std::path::{Path, PathBuf};

/// Series obtained for one subject of a campaign.
#[derive(Debug)]
pub struct SubjectSeries {
    pub subject: Subject,
    pub series: SweepSeries,
    /// Report files, when the campaign has an output directory.
    pub files: Option<ReportFiles>,
}

#[derive(Debug)]
pub enum CampaignError {
    /// The sweep of a subject failed. Subjects after it were not run.
    Sweep {
        subject: String,
        failure: SweepFailure,
    },
    /// The report of a subject could not be written.
    Report { subject: String, source: IOError },
}

impl fmt::Display for CampaignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CampaignError::Sweep { subject, failure } => {
                write!(f, "{}: {}", subject, failure)
            }
            CampaignError::Report { subject, source } => {
                write!(f, "{}: failed to write report: {}", subject, source)
            }
        }
    }
}

impl std::error::Error for CampaignError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CampaignError::Sweep { failure, .. } => Some(failure),
            CampaignError::Report { source, .. } => Some(source),
        }
    }
}

/// A sweep applied to a list of subjects.
#[derive(Clone, Debug)]
pub struct Campaign {
    sweep: Sweep,
    subjects: Vec<Subject>,
    output_dir: Option<PathBuf>,
}

impl Campaign {
    pub fn new(sweep: Sweep) -> Self {
        Campaign {
            sweep,
            subjects: Vec::new(),
            output_dir: None,
        }
    }

    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subjects.push(subject);
        self
    }

    /// Write a report per subject in `dir`.
    pub fn with_output_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.output_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn sweep(&self) -> &Sweep {
        &self.sweep
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    /// Sweep every subject in turn.
    ///
    /// The first failing subject ends the campaign. Reports of the
    /// subjects swept before it are left on disk.
    pub fn run(&self) -> Result<Vec<SubjectSeries>, CampaignError> {
        let mut results = Vec::with_capacity(self.subjects.len());

        for subject in self.subjects.iter() {
            log::info!("Running {} ({})", subject.name(), subject.title());
            let series = Aggregator::new(subject.clone())
                .run(&self.sweep)
                .map_err(|failure| CampaignError::Sweep {
                    subject: String::from(subject.name()),
                    failure,
                })?;

            let files = match &self.output_dir {
                None => None,
                Some(dir) => Some(
                    write_report(dir, subject.name(), subject.title(), &series)
                        .map_err(|source| CampaignError::Report {
                            subject: String::from(subject.name()),
                            source,
                        })?,
                ),
            };

            results.push(SubjectSeries {
                subject: subject.clone(),
                series,
                files,
            });
        }
        Ok(results)
    }
}
