//! Monotonic clock collaborators and the instant/resolution model.
//!
//! The core never reads the system clock directly. It asks a [`Clock`] for
//! opaque [`Instant`]s and derives durations from them at a fixed
//! [`Resolution`] chosen per timeline at construction.

use std::cell::Cell;
use std::ops::Sub;
use std::rc::Rc;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// An opaque monotonic timestamp, measured in nanosecond ticks since the
/// originating clock's epoch.
///
/// Instants are totally ordered and subtractable; `a - b` yields the signed
/// nanosecond difference as an `i64`. Conversion to coarser units happens at
/// the timeline level through [`Resolution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Instant(u64);

impl Instant {
    /// Construct an instant from raw nanosecond ticks.
    pub const fn from_nanos(nanos: u64) -> Self {
        Self(nanos)
    }

    /// The raw nanosecond tick count of this instant.
    pub const fn as_nanos(self) -> u64 {
        self.0
    }
}

impl Sub for Instant {
    type Output = i64;

    /// Signed nanosecond difference between two instants.
    fn sub(self, rhs: Self) -> i64 {
        self.0 as i64 - rhs.0 as i64
    }
}

/// The duration unit a timeline reports in.
///
/// Fixed per timeline at construction time. Conversion from the underlying
/// nanosecond ticks truncates toward zero, matching integer division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// Nanoseconds (no conversion).
    Nanos,
    /// Microseconds.
    Micros,
    /// Milliseconds.
    Millis,
    /// Whole seconds.
    Seconds,
}

impl Resolution {
    /// Nanoseconds per tick of this resolution.
    pub const fn nanos_per_tick(self) -> i64 {
        match self {
            Resolution::Nanos => 1,
            Resolution::Micros => 1_000,
            Resolution::Millis => 1_000_000,
            Resolution::Seconds => 1_000_000_000,
        }
    }

    /// Convert a signed nanosecond count into ticks of this resolution,
    /// truncating toward zero.
    pub(crate) const fn ticks(self, nanos: i64) -> i64 {
        nanos / self.nanos_per_tick()
    }
}

/// A monotonic time source.
///
/// Implementations must be monotonic: successive `now()` calls return
/// non-decreasing instants. The sorted-union merge relies on this to keep
/// recorded sequences sorted by construction.
pub trait Clock {
    /// The current instant. Must not have side effects observable to the core.
    fn now(&self) -> Instant;
}

/// The default clock: `std::time::Instant` anchored to a process-wide origin.
///
/// All `MonotonicClock` instances share one epoch, so instants recorded by
/// different timelines are mutually comparable and mergeable.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        static EPOCH: OnceLock<std::time::Instant> = OnceLock::new();
        let epoch = EPOCH.get_or_init(std::time::Instant::now);
        Instant::from_nanos(epoch.elapsed().as_nanos() as u64)
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same underlying time, so a test can hand one clone to a
/// timeline and keep another to advance between recordings:
///
/// ```
/// use splitline::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let handle = clock.clone();
/// handle.advance_millis(10);
/// assert_eq!(clock.now().as_nanos(), 10_000_000);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ns: Rc<Cell<u64>>,
}

impl ManualClock {
    /// A manual clock starting at tick zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// A manual clock starting at the given nanosecond tick.
    pub fn starting_at_nanos(nanos: u64) -> Self {
        let clock = Self::new();
        clock.set_nanos(nanos);
        clock
    }

    /// Move the clock forward by `nanos` nanoseconds.
    pub fn advance_nanos(&self, nanos: u64) {
        self.now_ns.set(self.now_ns.get() + nanos);
    }

    /// Move the clock forward by `millis` milliseconds.
    pub fn advance_millis(&self, millis: u64) {
        self.advance_nanos(millis * 1_000_000);
    }

    /// Jump the clock to an absolute nanosecond tick.
    ///
    /// Jumping backwards violates the monotonicity contract for any timeline
    /// still recording from this clock.
    pub fn set_nanos(&self, nanos: u64) {
        self.now_ns.set(nanos);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        Instant::from_nanos(self.now_ns.get())
    }
}
