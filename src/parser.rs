//! Extraction of labeled counters from subject program output.
//!
//! Subject programs report their counters as `<Label>: <integer>` lines.
//! The [`LabelParser`] finds every expected label in a block of text and
//! reads the integer that follows it up to the end of the line. Labels may
//! appear in any order and among any amount of unrelated output, but each
//! of them must appear exactly once.

use crate::protocol::{
    COUNTER_LABELS, DISK_READS_LABEL, DISK_WRITES_LABEL, LOGICAL_IO_LABEL,
    PHYSICAL_IO_LABEL,
};
use once_cell::sync::OnceCell;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;

/// Parsed counters indexed by label.
pub type Counters = BTreeMap<String, u64>;

/// Reasons a subject output cannot be turned into counters.
#[derive(Debug)]
pub enum ParseError {
    /// An expected label is absent from the output.
    MissingLabel(String),
    /// An expected label appears more than once.
    DuplicateLabel { label: String, count: usize },
    /// The text following a label is not a non-negative integer.
    InvalidValue { label: String, value: String },
    /// The labels could not be compiled into a pattern.
    Pattern(regex::Error),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingLabel(label) => {
                write!(f, "label '{}' not found in output", label)
            }
            ParseError::DuplicateLabel { label, count } => write!(
                f,
                "label '{}' found {} times in output, expected once",
                label, count
            ),
            ParseError::InvalidValue { label, value } => write!(
                f,
                "value '{}' after label '{}' is not a valid counter",
                value, label
            ),
            ParseError::Pattern(e) => {
                write!(f, "invalid label pattern: {}", e)
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Pattern(e) => Some(e),
            _ => None,
        }
    }
}

impl From<regex::Error> for ParseError {
    fn from(e: regex::Error) -> Self {
        ParseError::Pattern(e)
    }
}

/// Scanner for a fixed set of `<Label> <integer>` lines.
pub struct LabelParser {
    labels: Vec<String>,
    // Alternation of all the labels, capturing the label and the rest of
    // its line.
    pattern: Regex,
}

impl LabelParser {
    /// Build a parser expecting each of `labels` exactly once.
    ///
    /// Labels are matched literally, including any trailing `:`.
    pub fn new<I, S>(labels: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let labels: Vec<String> = labels
            .into_iter()
            .map(|s| String::from(s.as_ref()))
            .collect();
        let alternation: Vec<String> =
            labels.iter().map(|l| regex::escape(l)).collect();
        let pattern = Regex::new(
            format!(r"(?m)({})[ \t]*([^\r\n]*)", alternation.join("|"))
                .as_str(),
        )?;
        Ok(LabelParser { labels, pattern })
    }

    /// Parser for the four counters of the subject protocol, built once
    /// and shared.
    pub fn counters() -> Result<&'static Self, ParseError> {
        static COUNTERS: OnceCell<LabelParser> = OnceCell::new();
        COUNTERS.get_or_try_init(|| Self::new(COUNTER_LABELS))
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Read the value of every expected label in `text`.
    pub fn parse(&self, text: &str) -> Result<Counters, ParseError> {
        let mut found: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for captures in self.pattern.captures_iter(text) {
            if let (Some(label), Some(value)) = (captures.get(1), captures.get(2))
            {
                found
                    .entry(label.as_str())
                    .or_default()
                    .push(value.as_str());
            }
        }

        let mut counters = Counters::new();
        for label in self.labels.iter() {
            let values = match found.get(label.as_str()) {
                None => {
                    return Err(ParseError::MissingLabel(label.clone()))
                }
                Some(values) => values,
            };
            if values.len() > 1 {
                return Err(ParseError::DuplicateLabel {
                    label: label.clone(),
                    count: values.len(),
                });
            }
            let value = values[0].trim();
            let count = value.parse::<u64>().map_err(|_| {
                ParseError::InvalidValue {
                    label: label.clone(),
                    value: String::from(value),
                }
            })?;
            counters.insert(label.clone(), count);
        }
        Ok(counters)
    }
}

/// I/O counters reported by one subject invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RunResult {
    logical_io: u64,
    physical_io: u64,
    disk_reads: u64,
    disk_writes: u64,
}

impl RunResult {
    pub fn new(
        logical_io: u64,
        physical_io: u64,
        disk_reads: u64,
        disk_writes: u64,
    ) -> Self {
        RunResult {
            logical_io,
            physical_io,
            disk_reads,
            disk_writes,
        }
    }

    /// Extract the four protocol counters from a subject output.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let counters = LabelParser::counters()?.parse(text)?;
        Self::from_counters(&counters)
    }

    /// Pick the four protocol counters out of parsed counters.
    pub fn from_counters(counters: &Counters) -> Result<Self, ParseError> {
        let get = |label: &str| {
            counters
                .get(label)
                .copied()
                .ok_or_else(|| ParseError::MissingLabel(String::from(label)))
        };
        Ok(RunResult {
            logical_io: get(LOGICAL_IO_LABEL)?,
            physical_io: get(PHYSICAL_IO_LABEL)?,
            disk_reads: get(DISK_READS_LABEL)?,
            disk_writes: get(DISK_WRITES_LABEL)?,
        })
    }

    /// Requests issued to the cache layer, hit or miss.
    pub fn logical_io(&self) -> u64 {
        self.logical_io
    }

    /// Requests that reached backing storage.
    pub fn physical_io(&self) -> u64 {
        self.physical_io
    }

    pub fn disk_reads(&self) -> u64 {
        self.disk_reads
    }

    pub fn disk_writes(&self) -> u64 {
        self.disk_writes
    }
}
