//! Error types for checked timeline and cursor operations.

/// Error type for checked access and cross-timeline cursor operations.
///
/// All fallible operations in this crate fail synchronously with one of
/// these variants; nothing is retried or suppressed internally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineError {
    /// An indexed access fell outside the stored bounds.
    OutOfRange {
        /// The requested logical position.
        index: isize,
        /// The number of valid positions at the time of the access.
        len: usize,
    },
    /// Two cursors bound to different timelines were subtracted or ordered.
    OriginMismatch,
}

impl std::fmt::Display for TimelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimelineError::OutOfRange { index, len } => {
                write!(f, "index {} is out of range for length {}", index, len)
            }
            TimelineError::OriginMismatch => {
                write!(f, "cursors are bound to different timelines")
            }
        }
    }
}

impl std::error::Error for TimelineError {}
