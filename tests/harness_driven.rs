//! Drives the core through the harness collaborator, mirroring how an
//! external test program would consume both.

use splitline::harness::Harness;
use splitline::{ManualClock, Mode, Timeline};

/// A millisecond timeline recorded at the given millisecond offsets of a
/// manual clock.
fn seeded(offsets_ms: &[u64]) -> Timeline<ManualClock> {
    let clock = ManualClock::new();
    let handle = clock.clone();
    let mut timeline = Timeline::builder().build_with_clock(clock);
    for &offset in offsets_ms {
        handle.set_nanos(offset * 1_000_000);
        timeline.record();
    }
    timeline
}

#[test]
fn full_suite_passes_through_the_harness() {
    let mut harness = Harness::new();

    harness.register("size mode", |check| {
        let mut timeline = seeded(&[0, 10, 20]);
        check.assert_false(timeline.empty(), "timeline with recordings is not empty");
        check.assert_eq(timeline.size(), 2, "three instants give two durations");
        check.assert_eq(timeline.mode(), Mode::Split, "default mode is split");
        timeline.set_mode(Mode::Elapse);
        check.assert_eq(timeline.mode(), Mode::Elapse, "mode switches to elapse");
        timeline.clear();
        check.assert_true(timeline.empty(), "cleared timeline is empty");
        check.assert_eq(timeline.size(), 0, "cleared timeline has no durations");
    });

    harness.register("split", |check| {
        let timeline = seeded(&[0, 10, 20, 50]);
        check.assert_eq(timeline.duration_at(0), Ok(10), "first split");
        check.assert_eq(timeline.duration_at(1), Ok(10), "second split");
        check.assert_eq(timeline.duration_at(2), Ok(30), "third split");
    });

    harness.register("elapsed", |check| {
        let timeline = seeded(&[0, 10, 20, 50]);
        timeline.set_mode(Mode::Elapse);
        check.assert_eq(timeline.duration_at(0), Ok(10), "first elapse");
        check.assert_eq(timeline.duration_at(1), Ok(20), "second elapse");
        check.assert_eq(timeline.duration_at(2), Ok(50), "third elapse");
    });

    harness.register("iterate", |check| {
        let timeline = seeded(&[0, 10, 20, 50]);
        let mut cursor = timeline.begin();
        for i in 0..timeline.size() {
            check.assert_eq(
                cursor.value(),
                timeline.duration_at(i),
                "cursor matches indexed access",
            );
            cursor.advance(1);
        }
        check.assert_true(cursor == timeline.end(), "cursor walks to end");

        let edge = seeded(&[7]);
        check.assert_true(
            edge.begin() == edge.end(),
            "one stored instant gives no range",
        );
    });

    harness.register("compare", |check| {
        let timeline = seeded(&[0, 10, 20]);
        let begin = timeline.begin();
        let end = timeline.end();
        check.assert_leq(begin, begin, "begin is at most itself");
        check.assert_geq(end, end, "end is at least itself");
        check.assert_less(begin, end, "begin precedes end");
        check.assert_greater(end, begin, "end follows begin");
    });

    harness.register("arithmetic", |check| {
        let timeline = seeded(&[0, 10, 20, 50]);
        let begin = timeline.begin();
        for i in 0..timeline.size() as isize {
            check.assert_eq(
                (begin + i).distance_from(&begin),
                Ok(i),
                "offset round-trips through subtraction",
            );
        }
        let other = seeded(&[0, 10]);
        check.assert_true(
            timeline.begin().distance_from(&other.begin()).is_err(),
            "cross-timeline subtraction fails",
        );
    });

    harness.register("data", |check| {
        let timeline = seeded(&[0, 10, 20]);
        check.assert_eq(timeline.raw_count(), 3, "three instants stored");
        check.assert_eq(
            timeline.raw_count(),
            timeline.size() + 1,
            "one more instant than durations",
        );
        check.assert_true(
            timeline.raw_at(2).is_ok() && timeline.raw_at(3).is_err(),
            "raw access is bounds-checked",
        );
    });

    harness.register("interleave", |check| {
        let mut a = seeded(&[0, 10, 30]);
        let mut b = seeded(&[5, 10, 40]);
        let union = a.merged(&b);
        let got: Vec<u64> = union.raw().iter().map(|i| i.as_nanos() / 1_000_000).collect();
        check.assert_eq(got, vec![0, 5, 10, 30, 40], "sorted union with mutual dedupe");

        a.merge_from(&b);
        b.merge_from(&a);
        check.assert_true(a.raw() == b.raw(), "mutual merge converges");
        check.assert_true(a.raw() == union.raw(), "converged merge equals the union");
    });

    let report = harness.run_all();
    assert_eq!(report.executed(), 8);
    assert_eq!(
        report.passed(),
        report.executed(),
        "failures:\n{}",
        report.summary()
    );

    let summary = report.summary();
    assert!(summary.contains("Passed 8 out of 8 tests."));
    assert!(report.to_json().unwrap().contains("interleave"));
}
