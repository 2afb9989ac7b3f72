use std::io;

use thiserror::Error;

use crate::{ClockId, MAX_YEAR, MIN_YEAR};

/// Errors that can occur when constructing dates or reading clocks.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The year is outside the range the calendar arithmetic can represent.
    #[error("year {year} is outside the supported range {MIN_YEAR}..={MAX_YEAR}")]
    InvalidYear {
        /// The rejected year.
        year: i32,
    },

    /// The month is not in `1..=12`.
    #[error("month {month} is outside the range 1..=12")]
    InvalidMonth {
        /// The rejected month.
        month: u8,
    },

    /// The day is not in `1..=31`.
    ///
    /// Only the nominal range is checked. A day that is in range but past the end of its month
    /// (e.g. 31 April) is not rejected; use [`days_in_month`][crate::days_in_month] if the exact
    /// month length matters.
    #[error("day {day} is outside the range 1..=31")]
    InvalidDay {
        /// The rejected day.
        day: u8,
    },

    /// The clock has no counterpart on the platform the crate was built for.
    #[error("clock {clock:?} is not supported on this platform")]
    UnsupportedClock {
        /// The clock that was requested.
        clock: ClockId,
    },

    /// The operating system failed to read a clock.
    #[error(transparent)]
    Platform(#[from] io::Error),
}

/// A specialized `Result` type for chronon operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;
