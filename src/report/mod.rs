//! Persistence of sweep series for external plotting.
//!
//! A series is written as a comma separated table next to a gnuplot
//! script rendering it. Rendering the image itself is left to gnuplot.

pub mod csv;
pub mod plot;

use crate::series::SweepSeries;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Files produced for one series.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportFiles {
    /// Series table.
    pub data: PathBuf,
    /// Gnuplot script rendering `image` from `data`.
    pub script: PathBuf,
    /// Image the script renders. Not created by this crate.
    pub image: PathBuf,
}

impl ReportFiles {
    /// File names used for a series named `name` in `dir`.
    pub fn in_dir<P: AsRef<Path>>(dir: P, name: &str) -> Self {
        let dir = dir.as_ref();
        ReportFiles {
            data: dir.join(format!("{}.csv", name)),
            script: dir.join(format!("{}.gp", name)),
            image: dir.join(format!("{}.png", name)),
        }
    }
}

/// Write the table and plotting script of `series` in `dir`.
///
/// `dir` is created if missing. Existing files are overwritten.
pub fn write_report<P: AsRef<Path>>(
    dir: P,
    name: &str,
    title: &str,
    series: &SweepSeries,
) -> std::io::Result<ReportFiles> {
    std::fs::create_dir_all(dir.as_ref())?;
    let files = ReportFiles::in_dir(dir, name);

    let mut data = BufWriter::new(File::create(&files.data)?);
    csv::Table::from_series(series).write(&mut data, ",")?;
    data.flush()?;

    // The script refers to its files by name so that it can be run from
    // the report directory.
    let file_name = |p: &PathBuf| {
        p.file_name().map(PathBuf::from).unwrap_or_else(|| p.clone())
    };
    let mut script = BufWriter::new(File::create(&files.script)?);
    plot::GnuplotScript::new(
        title,
        file_name(&files.data),
        file_name(&files.image),
    )
    .write(&mut script)?;
    script.flush()?;

    log::debug!(
        "Wrote {} and {}",
        files.data.display(),
        files.script.display()
    );
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::{write_report, ReportFiles};
    use crate::parser::RunResult;
    use crate::series::SweepSeries;
    use crate::sweep::Sweep;

    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let mut series = SweepSeries::new();
        for config in Sweep::new(3).unwrap() {
            series.push(&config, &RunResult::new(10, 5, 3, 2));
        }

        let out = dir.path().join("results");
        let files =
            write_report(&out, "LRU", "Strategy: LRU", &series).unwrap();
        assert_eq!(files, ReportFiles::in_dir(&out, "LRU"));

        let data = std::fs::read_to_string(&files.data).unwrap();
        assert_eq!(data.lines().count(), 4);
        assert_eq!(data.lines().nth(2), Some("50,10,5,3,2"));

        let script = std::fs::read_to_string(&files.script).unwrap();
        assert!(script.contains("set output \"LRU.png\""));
        assert!(script.contains("\"LRU.csv\" using 1:2"));
        assert!(!files.image.exists());
    }
}
