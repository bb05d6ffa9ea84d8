//! Random-access, mode-aware read-only cursors over a timeline's sequence.

use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::clock::{Instant, Resolution};
use crate::error::TimelineError;
use crate::timeline::Mode;

/// A positional view into one timeline's instant sequence.
///
/// Cursors are created by [`Timeline::begin`](crate::Timeline::begin) and
/// [`Timeline::end`](crate::Timeline::end), never directly. Each cursor
/// carries its own [`Mode`], copied from the timeline at creation and
/// independent afterward: toggling the timeline's mode does not affect a
/// live cursor, and vice versa.
///
/// Position moves are unchecked, like pointer arithmetic: a cursor may move
/// past the valid range and back again freely. Bounds are enforced only at
/// dereference time, where [`Cursor::value`] returns an error for positions
/// without a next instant.
///
/// Cursors borrow the timeline's storage, so recording to or clearing the
/// timeline while a cursor exists is a compile error rather than undefined
/// behavior.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    origin: &'a [Instant],
    pos: isize,
    mode: Mode,
    resolution: Resolution,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(origin: &'a [Instant], pos: isize, mode: Mode, resolution: Resolution) -> Self {
        Self {
            origin,
            pos,
            mode,
            resolution,
        }
    }

    /// Identity of the sequence this cursor is bound to.
    fn origin_ptr(&self) -> *const Instant {
        self.origin.as_ptr()
    }

    fn same_origin(&self, other: &Cursor<'_>) -> bool {
        std::ptr::eq(self.origin_ptr(), other.origin_ptr())
    }

    /// This cursor's interpretation mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch this cursor's interpretation mode, leaving the source timeline
    /// untouched.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Move forward by `n` positions. Not bounds-checked.
    pub fn advance(&mut self, n: isize) {
        self.pos += n;
    }

    /// Move backward by `n` positions. Not bounds-checked.
    pub fn retreat(&mut self, n: isize) {
        self.pos -= n;
    }

    /// The duration at the current position under this cursor's mode, in
    /// the source timeline's resolution ticks.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::OutOfRange`] when positioned at or past the
    /// logical end (no next instant exists), or before the start.
    pub fn value(&self) -> Result<i64, TimelineError> {
        let len = self.origin.len().saturating_sub(1);
        if self.pos < 0 || self.pos as usize >= len {
            return Err(TimelineError::OutOfRange {
                index: self.pos,
                len,
            });
        }
        let i = self.pos as usize;
        let start = match self.mode {
            Mode::Split => self.origin[i],
            Mode::Elapse => self.origin[0],
        };
        Ok(self.resolution.ticks(self.origin[i + 1] - start))
    }

    /// The duration `offset` positions away from the current one.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::OutOfRange`] as [`Cursor::value`] would at
    /// the offset position.
    pub fn at(&self, offset: isize) -> Result<i64, TimelineError> {
        (*self + offset).value()
    }

    /// Signed positional distance from `other` to `self`.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::OriginMismatch`] if the cursors are bound to
    /// different timelines.
    pub fn distance_from(&self, other: &Cursor<'_>) -> Result<isize, TimelineError> {
        if !self.same_origin(other) {
            return Err(TimelineError::OriginMismatch);
        }
        Ok(self.pos - other.pos)
    }

    /// Positional ordering against another cursor on the same timeline.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::OriginMismatch`] if the cursors are bound to
    /// different timelines, consistent with [`Cursor::distance_from`].
    pub fn try_cmp(&self, other: &Cursor<'_>) -> Result<Ordering, TimelineError> {
        if !self.same_origin(other) {
            return Err(TimelineError::OriginMismatch);
        }
        Ok(self.pos.cmp(&other.pos))
    }
}

impl PartialEq for Cursor<'_> {
    /// Cursors from different timelines are never equal.
    fn eq(&self, other: &Self) -> bool {
        self.same_origin(other) && self.pos == other.pos
    }
}

impl PartialOrd for Cursor<'_> {
    /// `None` for cursors from different timelines, so every ordering
    /// operator evaluates false across origins. Use [`Cursor::try_cmp`] to
    /// surface the mismatch as an error instead.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl Add<isize> for Cursor<'_> {
    type Output = Self;

    fn add(mut self, n: isize) -> Self {
        self.advance(n);
        self
    }
}

impl Sub<isize> for Cursor<'_> {
    type Output = Self;

    fn sub(mut self, n: isize) -> Self {
        self.retreat(n);
        self
    }
}

impl AddAssign<isize> for Cursor<'_> {
    fn add_assign(&mut self, n: isize) {
        self.advance(n);
    }
}

impl SubAssign<isize> for Cursor<'_> {
    fn sub_assign(&mut self, n: isize) {
        self.retreat(n);
    }
}
