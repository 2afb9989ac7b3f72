//! Fixed time units, the integer ratios between them and nanosecond duration helpers.

/// A unit of time with a fixed length in nanoseconds.
///
/// [`TimeUnit::Year`] is a flat 365-day approximation meant for unit conversion only. It knows
/// nothing about leap years and must not be used for calendar arithmetic; use [`Date`][crate::Date] and
/// [`rata_die_from_date`][crate::rata_die_from_date] for that.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[expect(
    clippy::exhaustive_enums,
    reason = "the unit table is fixed and indexed by discriminant"
)]
pub enum TimeUnit {
    /// One nanosecond.
    Nanosecond,
    /// 1 000 nanoseconds.
    Microsecond,
    /// 1 000 microseconds.
    Millisecond,
    /// 1 000 milliseconds.
    Second,
    /// 60 seconds.
    Minute,
    /// 60 minutes.
    Hour,
    /// 24 hours.
    Day,
    /// 7 days.
    Week,
    /// 365 days.
    Year,
}

/// Length of each unit in nanoseconds, indexed by [`TimeUnit`] discriminant.
const NANOS_IN_UNIT: [u64; 9] = [
    1,
    1_000,
    1_000_000,
    1_000_000_000,
    60 * 1_000_000_000,
    60 * 60 * 1_000_000_000,
    24 * 60 * 60 * 1_000_000_000,
    7 * 24 * 60 * 60 * 1_000_000_000,
    365 * 24 * 60 * 60 * 1_000_000_000,
];

impl TimeUnit {
    /// The length of one unit, in nanoseconds.
    #[must_use]
    #[expect(
        clippy::indexing_slicing,
        reason = "every discriminant has a table entry"
    )]
    pub const fn nanos(self) -> u64 {
        NANOS_IN_UNIT[self as usize]
    }
}

/// How many `from` units fit in one `to` unit.
///
/// This is a single integer division of two table entries, so it is usable in constant
/// expressions. The result is only meaningful when `to` is at least as coarse as `from`; a finer
/// `to` yields zero.
///
/// ```
/// use chronon::{TimeUnit, ratio};
///
/// assert_eq!(ratio(TimeUnit::Nanosecond, TimeUnit::Second), 1_000_000_000);
/// assert_eq!(ratio(TimeUnit::Hour, TimeUnit::Week), 168);
/// ```
#[must_use]
#[expect(
    clippy::integer_division,
    reason = "unit lengths are exact multiples of each other"
)]
pub const fn ratio(from: TimeUnit, to: TimeUnit) -> u64 {
    to.nanos() / from.nanos()
}

/// Nanoseconds in one second.
pub const NANOS_PER_SECOND: u64 = ratio(TimeUnit::Nanosecond, TimeUnit::Second);

/// Nanoseconds in one minute.
pub const NANOS_PER_MINUTE: u64 = ratio(TimeUnit::Nanosecond, TimeUnit::Minute);

/// Nanoseconds in one hour.
pub const NANOS_PER_HOUR: u64 = ratio(TimeUnit::Nanosecond, TimeUnit::Hour);

/// Nanoseconds in one (non leap-second) day.
pub const NANOS_PER_DAY: u64 = ratio(TimeUnit::Nanosecond, TimeUnit::Day);

#[expect(
    clippy::cast_possible_wrap,
    reason = "constant is far below i64::MAX"
)]
const NANOS_PER_SECOND_SIGNED: i64 = NANOS_PER_SECOND as i64;

/// Splits a signed nanosecond count into whole seconds and a sub-second remainder.
///
/// The split is floor-based: the remainder is always in `0..1_000_000_000`, so negative counts
/// produce a negative second count with a positive remainder (`-1` becomes `(-1, 999_999_999)`).
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "euclidean remainder is in 0..1e9"
)]
pub const fn split_nanos(nanos: i64) -> (i64, u32) {
    (
        nanos.div_euclid(NANOS_PER_SECOND_SIGNED),
        nanos.rem_euclid(NANOS_PER_SECOND_SIGNED) as u32,
    )
}

/// Joins whole seconds and a sub-second remainder back into a signed nanosecond count.
///
/// Inverse of [`split_nanos`]. Values outside the `i64` nanosecond range (roughly ±292 years)
/// wrap around.
#[must_use]
#[expect(clippy::cast_lossless, reason = "From is not usable in const fn")]
pub const fn join_nanos(seconds: i64, subsec_nanos: u32) -> i64 {
    seconds
        .wrapping_mul(NANOS_PER_SECOND_SIGNED)
        .wrapping_add(subsec_nanos as i64)
}
