//! The [`Timeline`] aggregate: an ordered sequence of recorded instants with
//! mode-aware duration derivation and sorted-union merging.
//!
//! A timeline records instants one at a time from its clock. With `N`
//! instants stored there are `max(N - 1, 0)` derivable durations, each
//! interpreted per the current [`Mode`]:
//!
//! - `Split`: duration `i` is `instant[i + 1] - instant[i]`
//! - `Elapse`: duration `i` is `instant[i + 1] - instant[0]`
//!
//! Both interpretations read the same stored sequence; toggling the mode
//! never recomputes or copies anything.

use std::cell::Cell;
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, Instant, MonotonicClock, Resolution};
use crate::cursor::Cursor;
use crate::error::TimelineError;

/// How a timeline's stored instants are interpreted as durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Durations between consecutive recorded instants.
    #[default]
    Split,
    /// Durations from the first recorded instant (the origin).
    Elapse,
}

/// An ordered sequence of monotonic instants with split/elapsed views.
///
/// # Example
///
/// ```
/// use splitline::Timeline;
///
/// let mut timeline = Timeline::new();
/// timeline.record();
/// // ... timed work ...
/// timeline.record();
/// assert_eq!(timeline.size(), 1);
/// let first = timeline.duration_at(0).unwrap();
/// assert!(first >= 0);
/// ```
///
/// # Invalidation
///
/// [`Timeline::record`] and [`Timeline::clear`] take `&mut self`, so the
/// borrow checker statically rejects any use of an outstanding [`Cursor`] or
/// [`Timeline::raw`] slice across a mutation.
#[derive(Debug, Clone)]
pub struct Timeline<C: Clock = MonotonicClock> {
    instants: Vec<Instant>,
    mode: Cell<Mode>,
    resolution: Resolution,
    clock: C,
}

impl Timeline<MonotonicClock> {
    /// A split-mode timeline at millisecond resolution on the default
    /// monotonic clock.
    pub fn new() -> Self {
        TimelineBuilder::new().build()
    }

    /// Like [`Timeline::new`], reserving room for `durations` durations
    /// up front.
    ///
    /// Reserving reduces allocation work between recordings, which keeps
    /// the recordings themselves closer together in time.
    pub fn with_capacity(durations: usize) -> Self {
        TimelineBuilder::new().capacity(durations).build()
    }

    /// Start building a timeline with a non-default mode, resolution,
    /// capacity, or clock.
    pub fn builder() -> TimelineBuilder {
        TimelineBuilder::new()
    }
}

impl Default for Timeline<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Timeline<C> {
    fn with_parts(clock: C, mode: Mode, resolution: Resolution, capacity: usize) -> Self {
        // One more instant than requested durations.
        let instants = Vec::with_capacity(capacity + 1);
        Self {
            instants,
            mode: Cell::new(mode),
            resolution,
            clock,
        }
    }

    /// Record the current instant from the clock.
    ///
    /// There is no distinction between start, split, and stop; every call
    /// appends one instant.
    pub fn record(&mut self) {
        let now = self.clock.now();
        self.instants.push(now);
    }

    /// Drop all recorded instants, resetting the stored count to zero.
    pub fn clear(&mut self) {
        self.instants.clear();
    }

    /// True iff no durations are derivable (fewer than two instants stored).
    ///
    /// Note this is not the same as the stored sequence being empty; a
    /// timeline with exactly one instant is `empty()` but has
    /// `raw_count() == 1`.
    pub fn empty(&self) -> bool {
        self.instants.len() < 2
    }

    /// The number of derivable durations: `max(N - 1, 0)` for `N` stored
    /// instants.
    pub fn size(&self) -> usize {
        self.instants.len().saturating_sub(1)
    }

    /// The current interpretation mode.
    pub fn mode(&self) -> Mode {
        self.mode.get()
    }

    /// Switch the interpretation mode.
    ///
    /// Takes `&self`: the mode is a view concern and toggling it does not
    /// invalidate cursors. Cursors created earlier keep the mode they were
    /// given at creation.
    pub fn set_mode(&self, mode: Mode) {
        self.mode.set(mode);
    }

    /// The duration unit this timeline reports in.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// The duration at `index` under the current mode, in resolution ticks.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::OutOfRange`] if `index + 1` exceeds the
    /// stored instant count.
    pub fn duration_at(&self, index: usize) -> Result<i64, TimelineError> {
        let end = index
            .checked_add(1)
            .and_then(|i| self.instants.get(i))
            .copied()
            .ok_or(TimelineError::OutOfRange {
                index: isize::try_from(index).unwrap_or(isize::MAX),
                len: self.size(),
            })?;
        let start = match self.mode.get() {
            Mode::Split => self.instants[index],
            Mode::Elapse => self.instants[0],
        };
        Ok(self.resolution.ticks(end - start))
    }

    /// The number of stored instants (one more than `size()` when nonempty).
    pub fn raw_count(&self) -> usize {
        self.instants.len()
    }

    /// The stored instants themselves, in recording order.
    pub fn raw(&self) -> &[Instant] {
        &self.instants
    }

    /// The stored instant at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::OutOfRange`] if `index` exceeds the stored
    /// instant count.
    pub fn raw_at(&self, index: usize) -> Result<Instant, TimelineError> {
        self.instants
            .get(index)
            .copied()
            .ok_or(TimelineError::OutOfRange {
                index: isize::try_from(index).unwrap_or(isize::MAX),
                len: self.raw_count(),
            })
    }

    /// A cursor at the first derivable duration, carrying the timeline's
    /// current mode.
    pub fn begin(&self) -> Cursor<'_> {
        Cursor::new(&self.instants, 0, self.mode.get(), self.resolution)
    }

    /// A cursor one past the last derivable duration.
    ///
    /// Equal to [`Timeline::begin`] when fewer than two instants are stored.
    pub fn end(&self) -> Cursor<'_> {
        Cursor::new(
            &self.instants,
            self.size() as isize,
            self.mode.get(),
            self.resolution,
        )
    }

    /// Lazily iterate all derivable durations under the mode current at the
    /// time of the call.
    pub fn durations(&self) -> impl Iterator<Item = i64> + '_ {
        let instants = &self.instants;
        let mode = self.mode.get();
        let resolution = self.resolution;
        (0..self.size()).map(move |i| {
            let start = match mode {
                Mode::Split => instants[i],
                Mode::Elapse => instants[0],
            };
            resolution.ticks(instants[i + 1] - start)
        })
    }

    /// Replace this timeline's sequence with the sorted union of it and
    /// `other`'s.
    ///
    /// An instant present in both inputs appears once in the result; an
    /// instant duplicated within one input and absent from the other keeps
    /// its multiplicity. Applying the merge mutually (`a.merge_from(&b)`
    /// then `b.merge_from(&a)`) converges both timelines to the same union.
    ///
    /// Both sequences are sorted by construction (monotonic clocks), which
    /// the single-pass merge relies on.
    pub fn merge_from<D: Clock>(&mut self, other: &Timeline<D>) {
        self.instants = sorted_union(&self.instants, &other.instants);
    }

    /// A copy of this timeline whose sequence is the sorted union of both
    /// inputs. Neither input is mutated.
    pub fn merged<D: Clock>(&self, other: &Timeline<D>) -> Timeline<C>
    where
        C: Clone,
    {
        let mut merged = self.clone();
        merged.merge_from(other);
        merged
    }
}

/// Two-pointer sorted-union merge.
///
/// Emits the smaller head and advances that side; on equal heads emits once
/// and advances both, so only mutual presence deduplicates.
fn sorted_union(a: &[Instant], b: &[Instant]) -> Vec<Instant> {
    // Always allocate: cursor origin identity is the storage address, and an
    // unallocated Vec would share the dangling pointer with every other one.
    let mut out = Vec::with_capacity(a.len().max(b.len()).max(1));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => {
                out.push(a[i]);
                i += 1;
            }
            Ordering::Greater => {
                out.push(b[j]);
                j += 1;
            }
            Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

/// Builder for timelines with a non-default configuration.
///
/// ```
/// use splitline::{ManualClock, Mode, Resolution, Timeline};
///
/// let timeline = Timeline::builder()
///     .mode(Mode::Elapse)
///     .resolution(Resolution::Micros)
///     .capacity(16)
///     .build_with_clock(ManualClock::new());
/// assert_eq!(timeline.mode(), Mode::Elapse);
/// ```
#[derive(Debug, Clone)]
pub struct TimelineBuilder {
    mode: Mode,
    resolution: Resolution,
    capacity: usize,
}

impl TimelineBuilder {
    /// Defaults: split mode, millisecond resolution, room for one duration.
    pub fn new() -> Self {
        Self {
            mode: Mode::Split,
            resolution: Resolution::Millis,
            capacity: 1,
        }
    }

    /// Set the initial interpretation mode.
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the duration unit.
    pub fn resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Reserve room for this many durations up front.
    pub fn capacity(mut self, durations: usize) -> Self {
        self.capacity = durations;
        self
    }

    /// Build on the default monotonic clock.
    pub fn build(self) -> Timeline<MonotonicClock> {
        self.build_with_clock(MonotonicClock)
    }

    /// Build on a caller-supplied clock.
    pub fn build_with_clock<C: Clock>(self, clock: C) -> Timeline<C> {
        Timeline::with_parts(clock, self.mode, self.resolution, self.capacity)
    }
}

impl Default for TimelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
