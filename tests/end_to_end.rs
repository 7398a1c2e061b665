#![cfg(unix)]

use iosweep::{
    Aggregator, ExecError, ParseError, Subject, Sweep, SweepSeries,
};
use std::time::{Duration, Instant};
mod stub;

fn sweep(subject: Subject, points: usize) -> SweepSeries {
    Aggregator::new(subject)
        .run(&Sweep::new(points).unwrap())
        .unwrap()
}

#[test]
fn fixed_output_three_points() {
    let dir = tempfile::tempdir().unwrap();
    let series = sweep(stub::fixed(dir.path(), "fixed"), 3);

    assert_eq!(series.read_ratios(), &[0.0, 50.0, 100.0]);
    assert_eq!(series.logical_io(), &[10, 10, 10]);
    assert_eq!(series.physical_io(), &[5, 5, 5]);
    assert_eq!(series.disk_reads(), &[3, 3, 3]);
    assert_eq!(series.disk_writes(), &[2, 2, 2]);
}

#[test]
fn series_follow_sweep_order() {
    let dir = tempfile::tempdir().unwrap();
    let series = sweep(stub::deterministic(dir.path(), "det"), 21);

    assert_eq!(series.len(), 21);
    for (i, (ratio, result)) in series.iter().enumerate() {
        let r = (i * 5) as u64;
        assert_eq!(ratio, (i * 5) as f64);
        assert_eq!(result.logical_io(), 1000);
        assert_eq!(result.physical_io(), 1000 - r);
        assert_eq!(result.disk_reads(), 100 - r);
        assert_eq!(result.disk_writes(), r);
    }
}

#[test]
fn deterministic_subject_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let subject = stub::deterministic(dir.path(), "det");
    let first = sweep(subject.clone(), 9);
    let second = sweep(subject, 9);
    assert_eq!(first, second);
}

#[test]
fn subject_receives_workload_mix() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("mixes.log");
    let subject = stub::subject(
        dir.path(),
        "logger",
        &format!(
            "echo \"$READ_RATIO $WRITE_RATIO\" >> \"$MIX_LOG\"\nprintf '{}'\n",
            stub::FIXED_OUTPUT.replace('\n', "\\n")
        ),
    )
    .with_env("MIX_LOG", log.to_string_lossy());

    sweep(subject, 4);
    let lines: Vec<String> = std::fs::read_to_string(&log)
        .unwrap()
        .lines()
        .map(String::from)
        .collect();
    assert_eq!(
        lines,
        vec![
            "0 100",
            "33.333333333333336 66.66666666666666",
            "66.66666666666667 33.33333333333333",
            "100 0",
        ]
    );
}

#[test]
fn missing_label_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let subject = stub::subject(
        dir.path(),
        "partial",
        "echo 'Logical I/Os: 1'\necho 'Physical I/Os: 1'\necho 'Disk Reads: 1'\necho 'out of pages' >&2\nexit 3\n",
    );

    let failure = Aggregator::new(subject)
        .run(&Sweep::new(5).unwrap())
        .unwrap_err();
    assert_eq!(failure.step, 0);
    assert!(failure.partial.is_empty());
    match failure.error {
        ExecError::Malformed {
            error: ParseError::MissingLabel(label),
            stderr,
            ..
        } => {
            assert_eq!(label, "Disk Writes:");
            assert_eq!(stderr.trim(), "out of pages");
        }
        other => panic!("Unexpected error {:?}", other),
    }
}

#[test]
fn failure_keeps_partial_series() {
    let dir = tempfile::tempdir().unwrap();
    // Garbage once the read ratio exceeds one half.
    let subject = stub::subject(
        dir.path(),
        "flaky",
        &format!(
            "r=${{READ_RATIO%%.*}}\nif [ \"$r\" -gt 50 ]; then echo 'Disk Reads: many'; fi\nprintf '{}'\n",
            stub::FIXED_OUTPUT.replace('\n', "\\n")
        ),
    );

    let failure = Aggregator::new(subject)
        .run(&Sweep::new(5).unwrap())
        .unwrap_err();
    assert_eq!(failure.step, 3);
    assert_eq!(failure.config.read_ratio(), 75.0);
    assert_eq!(failure.partial.read_ratios(), &[0.0, 25.0, 50.0]);
    assert_eq!(failure.partial.disk_reads(), &[3, 3, 3]);
    assert!(matches!(
        failure.error,
        ExecError::Malformed {
            error: ParseError::DuplicateLabel { .. },
            ..
        }
    ));
}

#[test]
fn launch_failure_aborts_sweep() {
    let dir = tempfile::tempdir().unwrap();
    let subject = Subject::new("ghost", dir.path().join("no-such-subject"));
    let failure = Aggregator::new(subject)
        .run(&Sweep::new(101).unwrap())
        .unwrap_err();
    assert_eq!(failure.step, 0);
    assert!(matches!(failure.error, ExecError::Launch { .. }));
}

#[test]
fn hung_subject_is_killed() {
    let dir = tempfile::tempdir().unwrap();
    let subject = stub::subject(dir.path(), "hung", "exec sleep 30\n")
        .with_timeout(Duration::from_millis(200));

    let t0 = Instant::now();
    let failure = Aggregator::new(subject)
        .run(&Sweep::new(3).unwrap())
        .unwrap_err();
    assert!(t0.elapsed() < Duration::from_secs(10));
    assert_eq!(failure.step, 0);
    match failure.error {
        ExecError::Timeout { after, .. } => {
            assert_eq!(after, Duration::from_millis(200))
        }
        other => panic!("Unexpected error {:?}", other),
    }
}

#[test]
fn lingering_output_is_bounded_by_timeout() {
    let dir = tempfile::tempdir().unwrap();
    // The background sleep inherits stdout and keeps it open after the
    // subject itself exited.
    let subject = stub::subject(
        dir.path(),
        "lingering",
        &format!(
            "sleep 5 &\nprintf '{}'\n",
            stub::FIXED_OUTPUT.replace('\n', "\\n")
        ),
    )
    .with_timeout(Duration::from_millis(300));

    let t0 = Instant::now();
    let failure = Aggregator::new(subject)
        .run(&Sweep::new(3).unwrap())
        .unwrap_err();
    assert!(t0.elapsed() < Duration::from_secs(4));
    assert_eq!(failure.step, 0);
    assert!(matches!(failure.error, ExecError::Timeout { .. }));
}

#[test]
fn fast_subject_within_timeout() {
    let dir = tempfile::tempdir().unwrap();
    let subject = stub::fixed(dir.path(), "fast")
        .with_timeout(Duration::from_secs(20));
    let series = sweep(subject, 2);
    assert_eq!(series.logical_io(), &[10, 10]);
}
