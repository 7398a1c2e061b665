use std::io::Write;
use std::path::{Path, PathBuf};

/// Gnuplot script drawing the four counters of a series CSV file
/// against the read ratio.
///
/// Running `gnuplot <script>` renders `image` from `data`.
/// The `data` file is expected to have the
/// [`SERIES_COLUMNS`](super::csv::SERIES_COLUMNS) layout.
pub struct GnuplotScript {
    pub title: String,
    pub data: PathBuf,
    pub image: PathBuf,
}

/// Quote `s` as a gnuplot double quoted string.
fn quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' | '\\' => {
                quoted.push('\\');
                quoted.push(c);
            }
            '\n' => quoted.push_str("\\n"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

fn quote_path(p: &Path) -> String {
    quote(p.to_string_lossy().as_ref())
}

impl GnuplotScript {
    pub fn new<S: Into<String>, P: AsRef<Path>, Q: AsRef<Path>>(
        title: S,
        data: P,
        image: Q,
    ) -> Self {
        GnuplotScript {
            title: title.into(),
            data: data.as_ref().to_path_buf(),
            image: image.as_ref().to_path_buf(),
        }
    }

    pub fn write<W: Write>(&self, output: &mut W) -> std::io::Result<()> {
        writeln!(output, "set terminal pngcairo size 1000,600")?;
        writeln!(output, "set output {}", quote_path(&self.image))?;
        writeln!(output, "set datafile separator ','")?;
        writeln!(
            output,
            "set title {}",
            quote("I/O Statistics vs Read/Write Mixtures")
        )?;
        writeln!(
            output,
            "set label 1 {} at graph 0.5,0.95 center front boxed",
            quote(&self.title)
        )?;
        writeln!(output, "set xlabel {}", quote("Read Ratio (%)"))?;
        writeln!(output, "set ylabel {}", quote("I/O Counts"))?;
        writeln!(output, "set grid")?;
        writeln!(output, "set key outside right")?;

        let data = quote_path(&self.data);
        let curves = [
            (2, "Logical I/O"),
            (3, "Physical I/O"),
            (4, "Disk Reads"),
            (5, "Disk Writes"),
        ];
        let plots: Vec<String> = curves
            .iter()
            .map(|(column, label)| {
                format!(
                    "{} using 1:{} skip 1 with lines title {}",
                    data,
                    column,
                    quote(label)
                )
            })
            .collect();
        writeln!(output, "plot {}", plots.join(", \\\n     "))
    }
}
