//! Names shared with subject programs.
//!
//! A subject program is any executable that reads its workload mix from
//! two environment variables and prints four labeled counters on its
//! standard output:
//!
//! ```text
//! $ READ_RATIO=75 WRITE_RATIO=25 ./testpf_LRU
//! Logical I/Os: 10000
//! Physical I/Os: 2731
//! Disk Reads: 2498
//! Disk Writes: 233
//! ```
//!
//! Counter lines may come in any order and may be surrounded by any other
//! output.

/// Environment variable carrying the read percentage of the workload.
pub const READ_RATIO_VAR: &str = "READ_RATIO";

/// Environment variable carrying the write percentage of the workload.
pub const WRITE_RATIO_VAR: &str = "WRITE_RATIO";

/// Label preceding the count of requests issued to the cache layer.
pub const LOGICAL_IO_LABEL: &str = "Logical I/Os:";

/// Label preceding the count of requests reaching backing storage.
pub const PHYSICAL_IO_LABEL: &str = "Physical I/Os:";

/// Label preceding the count of pages read from disk.
pub const DISK_READS_LABEL: &str = "Disk Reads:";

/// Label preceding the count of pages written to disk.
pub const DISK_WRITES_LABEL: &str = "Disk Writes:";

/// The four counter labels, in [`RunResult`](crate::RunResult) field order.
pub const COUNTER_LABELS: [&str; 4] = [
    LOGICAL_IO_LABEL,
    PHYSICAL_IO_LABEL,
    DISK_READS_LABEL,
    DISK_WRITES_LABEL,
];

/// Lower bound of the read ratio range.
pub const RATIO_MIN: f64 = 0.0;

/// Upper bound of the read ratio range. Read and write ratios sum to this.
pub const RATIO_MAX: f64 = 100.0;
