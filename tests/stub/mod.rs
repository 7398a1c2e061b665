//! Shell script subjects for end-to-end tests.
//!
//! Scripts are run through `/bin/sh <script>` rather than executed
//! directly so that a script still open for writing in another test
//! thread can never fail with `ETXTBSY`.

use iosweep::Subject;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Output of the stub subject of the end-to-end example.
pub const FIXED_OUTPUT: &str =
    "Logical I/Os: 10\nPhysical I/Os: 5\nDisk Reads: 3\nDisk Writes: 2\n";

/// Write `body` as a shell script named `name` in `dir`.
pub fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(format!("{}.sh", name));
    let mut file = File::create(&path).unwrap();
    writeln!(file, "#!/bin/sh").unwrap();
    write!(file, "{}", body).unwrap();
    file.sync_all().unwrap();
    path
}

/// Subject named `name` running `body` with `/bin/sh`.
pub fn subject(dir: &Path, name: &str, body: &str) -> Subject {
    let path = script(dir, name, body);
    Subject::new(name, "/bin/sh").with_args([path.to_string_lossy()])
}

/// Subject printing the same counters whatever the workload mix.
pub fn fixed(dir: &Path, name: &str) -> Subject {
    subject(dir, name, &format!("printf '{}'\n", FIXED_OUTPUT.replace('\n', "\\n")))
}

/// Subject deriving its counters from the integer part of its read
/// ratio: 1000 logical, `1000 - r` physical, `100 - r` reads, `r` writes.
/// Counters are printed in reverse order, among unrelated lines.
pub fn deterministic(dir: &Path, name: &str) -> Subject {
    subject(
        dir,
        name,
        r#"r=${READ_RATIO%%.*}
echo "Starting subject..."
echo "Disk Writes: $r"
echo "Disk Reads: $((100 - r))"
echo "Hit Rate: 12.5%"
echo "Physical I/Os: $((1000 - r))"
echo "Logical I/Os: 1000"
"#,
    )
}
