//! # splitline
//!
//! Record sequences of monotonic instants and read them back as either
//! consecutive splits or cumulative elapsed durations, without recomputation
//! or duplicated storage.
//!
//! The two central types:
//! - [`Timeline`]: owns the recorded instant sequence; supports recording,
//!   indexed duration access under a toggleable [`Mode`], and sorted-union
//!   merging with another timeline.
//! - [`Cursor`]: a copyable random-access view that computes the split or
//!   elapsed duration at its position on dereference, with a mode
//!   independent of its source timeline.
//!
//! ## Quick Start
//!
//! ```
//! use splitline::{Mode, Timeline};
//!
//! let mut timeline = Timeline::new();
//! timeline.record();
//! // ... phase one ...
//! timeline.record();
//! // ... phase two ...
//! timeline.record();
//!
//! // Consecutive splits, in milliseconds.
//! let splits: Vec<i64> = timeline.durations().collect();
//! assert_eq!(splits.len(), 2);
//!
//! // The same instants reread as elapsed-from-start durations.
//! timeline.set_mode(Mode::Elapse);
//! let total = timeline.duration_at(1).unwrap();
//! assert!(total >= splits[0]);
//! ```
//!
//! Two timelines measuring overlapping or disjoint phases can be interleaved
//! with [`Timeline::merged`], which yields the sorted union of both instant
//! sequences.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod clock;
mod cursor;
mod error;
mod timeline;

pub mod harness;

pub use clock::{Clock, Instant, ManualClock, MonotonicClock, Resolution};
pub use cursor::Cursor;
pub use error::TimelineError;
pub use timeline::{Mode, Timeline, TimelineBuilder};

/// Run a closure and measure how long it took on the default monotonic
/// clock, at the given resolution.
///
/// Convenience for one-off measurements that don't need a [`Timeline`].
///
/// # Example
///
/// ```
/// use splitline::{measure, Resolution};
///
/// let (sum, nanos) = measure(Resolution::Nanos, || (0..1000u64).sum::<u64>());
/// assert_eq!(sum, 499_500);
/// assert!(nanos >= 0);
/// ```
pub fn measure<F, T>(resolution: Resolution, f: F) -> (T, i64)
where
    F: FnOnce() -> T,
{
    let clock = MonotonicClock;
    let start = clock.now();
    let value = f();
    let end = clock.now();
    (value, resolution.ticks(end - start))
}
