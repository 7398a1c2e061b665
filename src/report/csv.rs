use crate::series::SweepSeries;
use std::io::Write;

/// Column names of a table built from a [`SweepSeries`].
pub const SERIES_COLUMNS: [&str; 5] = [
    "read_ratio",
    "logical_io",
    "physical_io",
    "disk_reads",
    "disk_writes",
];

/// Rows of text values under a fixed header.
pub struct Table {
    header: Vec<String>,
    records: Vec<Vec<String>>,
}

impl Table {
    fn new(colnames: Vec<String>) -> Self {
        Self {
            header: colnames,
            records: Vec::new(),
        }
    }

    /// One row per sweep step, with the [`SERIES_COLUMNS`] columns.
    pub fn from_series(series: &SweepSeries) -> Self {
        let mut table = Table::new(
            SERIES_COLUMNS.iter().map(|s| String::from(*s)).collect(),
        );
        for (ratio, result) in series.iter() {
            table.records.push(vec![
                ratio.to_string(),
                result.logical_io().to_string(),
                result.physical_io().to_string(),
                result.disk_reads().to_string(),
                result.disk_writes().to_string(),
            ]);
        }
        table
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn write<W: Write>(
        &self,
        output: &mut W,
        separator: &str,
    ) -> Result<(), std::io::Error> {
        writeln!(output, "{}", self.header.join(separator))?;
        for record in self.records.iter() {
            writeln!(output, "{}", record.join(separator))?;
        }
        Ok(())
    }
}
