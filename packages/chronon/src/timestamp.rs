use std::fmt;
use std::ops::Range;
use std::str;

use crate::units::{NANOS_PER_DAY, NANOS_PER_HOUR, NANOS_PER_MINUTE, NANOS_PER_SECOND};
use crate::{Date, RataDie};

#[expect(
    clippy::cast_possible_wrap,
    reason = "constant is far below i64::MAX"
)]
const NANOS_PER_DAY_SIGNED: i64 = NANOS_PER_DAY as i64;

const TEMPLATE: [u8; Timestamp::LEN] = *b"0000-00-00T00:00:00.000000000";

const YEAR: Range<usize> = 0..4;
const MONTH: Range<usize> = 5..7;
const DAY: Range<usize> = 8..10;
const HOUR: Range<usize> = 11..13;
const MINUTE: Range<usize> = 14..16;
const SECOND: Range<usize> = 17..19;
const SUBSECOND: Range<usize> = 20..29;

/// A nanosecond instant rendered as `yyyy-MM-ddThh:mm:ss.nnnnnnnnn`, kept up to date
/// incrementally.
///
/// The instant is a signed count of nanoseconds since 1970-01-01T00:00:00 UTC. Every such count
/// falls between the years 1677 and 2262, so the text is always exactly [`Timestamp::LEN`] ASCII
/// bytes.
///
/// Formatting a fresh timestamp converts the day number into a calendar date and writes every
/// field. [`update()`][Self::update] avoids most of that work when the new instant falls on the
/// same day as the current one: it rewrites only the time fields whose value changed, which for
/// a stream of closely spaced instants is usually just the nanosecond field.
///
/// # Ordering contract
///
/// Updates must not move to an earlier day. Within a day the instants may arrive in any order,
/// but an update to an instant before the start of the current day keeps the current date and
/// renders a wrong timestamp. This is not detected. Use [`init()`][Self::init] to move backwards
/// across a day boundary.
///
/// # Examples
///
/// ```
/// use chronon::Timestamp;
///
/// let mut timestamp = Timestamp::new(1_716_753_307_989_767_545);
/// assert_eq!(timestamp.as_str(), "2024-05-26T19:55:07.989767545");
///
/// timestamp.update(1_716_753_370_999_777_555);
/// assert_eq!(timestamp.as_str(), "2024-05-26T19:56:10.999777555");
/// ```
#[derive(Clone)]
pub struct Timestamp {
    nanos: i64,
    date: Date,

    // Nanoseconds since the start of the current day.
    tempore: u64,
    previous_tempore: u64,

    // The first instant of the following day. Anything at or past it needs a new date.
    next_day: i64,

    text: [u8; Self::LEN],
}

impl Timestamp {
    /// Length of the rendered text in bytes.
    pub const LEN: usize = 29;

    /// Creates a timestamp for `nanos` nanoseconds since the Unix epoch.
    #[must_use]
    pub fn new(nanos: i64) -> Self {
        let mut timestamp = Self {
            nanos,
            date: Date::UNIX_EPOCH,
            tempore: 0,
            previous_tempore: 0,
            next_day: 0,
            text: TEMPLATE,
        };

        timestamp.init(nanos);
        timestamp
    }

    /// Moves the timestamp to `nanos`, recomputing the date and rewriting all of the text.
    ///
    /// Unlike [`update()`][Self::update], this accepts any instant, including one on an earlier
    /// day.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "the day number of an i64 nanosecond count fits in i32, the remainder is positive"
    )]
    pub fn init(&mut self, nanos: i64) {
        let days = nanos.div_euclid(NANOS_PER_DAY_SIGNED);

        self.nanos = nanos;
        self.tempore = nanos.rem_euclid(NANOS_PER_DAY_SIGNED) as u64;
        self.previous_tempore = self.tempore;
        self.next_day = days
            .saturating_add(1)
            .saturating_mul(NANOS_PER_DAY_SIGNED);
        self.date = Date::from_rata_die(days as RataDie);

        self.render_date();
        self.render_time(true);
    }

    /// Moves the timestamp to `nanos`, rewriting only the parts of the text that changed.
    ///
    /// `nanos` must not lie on an earlier day than the current instant; see the
    /// [ordering contract](Self#ordering-contract).
    #[inline]
    #[expect(
        clippy::cast_sign_loss,
        reason = "euclidean remainder is never negative"
    )]
    pub fn update(&mut self, nanos: i64) {
        if nanos >= self.next_day {
            self.init(nanos);
            return;
        }

        self.nanos = nanos;
        self.previous_tempore = self.tempore;
        self.tempore = nanos.rem_euclid(NANOS_PER_DAY_SIGNED) as u64;

        self.render_time(false);
    }

    /// The rendered text.
    #[must_use]
    #[inline]
    pub fn as_str(&self) -> &str {
        // SAFETY: The buffer starts as ASCII and only ever has ASCII digits written into it.
        unsafe { str::from_utf8_unchecked(&self.text) }
    }

    /// The rendered text as ASCII bytes.
    #[must_use]
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.text
    }

    /// The instant, in nanoseconds since the Unix epoch.
    #[must_use]
    pub const fn nanos(&self) -> i64 {
        self.nanos
    }

    /// The calendar date of the instant.
    #[must_use]
    pub const fn date(&self) -> Date {
        self.date
    }

    /// Nanoseconds elapsed since the start of the instant's day.
    #[must_use]
    pub const fn tempore(&self) -> u64 {
        self.tempore
    }

    /// The first nanosecond of the day after the instant's day.
    ///
    /// Saturates at `i64::MAX` on the last representable day.
    #[must_use]
    pub const fn next_day(&self) -> i64 {
        self.next_day
    }

    #[expect(
        clippy::cast_sign_loss,
        reason = "years of i64 nanosecond instants are 1677..=2262"
    )]
    fn render_date(&mut self) {
        write_digits(&mut self.text, YEAR, self.date.year() as u64);
        write_digits(&mut self.text, MONTH, u64::from(self.date.month()));
        write_digits(&mut self.text, DAY, u64::from(self.date.day()));
    }

    /// Rewrites the time fields, from the finest up to the first one that did not change since
    /// the previous render, or all of them if `all` is set.
    #[expect(
        clippy::integer_division,
        reason = "truncation to whole time units is intended"
    )]
    fn render_time(&mut self, all: bool) {
        let tempore = self.tempore;
        let previous = self.previous_tempore;

        write_digits(&mut self.text, SUBSECOND, tempore % NANOS_PER_SECOND);

        if !all && tempore / NANOS_PER_SECOND == previous / NANOS_PER_SECOND {
            return;
        }

        write_digits(&mut self.text, SECOND, tempore / NANOS_PER_SECOND % 60);

        if !all && tempore / NANOS_PER_MINUTE == previous / NANOS_PER_MINUTE {
            return;
        }

        write_digits(&mut self.text, MINUTE, tempore / NANOS_PER_MINUTE % 60);

        if !all && tempore / NANOS_PER_HOUR == previous / NANOS_PER_HOUR {
            return;
        }

        write_digits(&mut self.text, HOUR, tempore / NANOS_PER_HOUR);
    }
}

/// Writes `value` as zero-padded decimal into `field` of `text`, dropping digits that do not fit.
#[inline]
#[expect(
    clippy::indexing_slicing,
    reason = "field ranges are constants within the buffer"
)]
#[expect(clippy::cast_possible_truncation, reason = "a decimal digit fits in u8")]
fn write_digits(text: &mut [u8; Timestamp::LEN], field: Range<usize>, mut value: u64) {
    for byte in text[field].iter_mut().rev() {
        *byte = b'0'.wrapping_add((value % 10) as u8);
        value /= 10;
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timestamp")
            .field("text", &self.as_str())
            .field("nanos", &self.nanos)
            .field("date", &self.date)
            .field("tempore", &self.tempore)
            .field("previous_tempore", &self.previous_tempore)
            .field("next_day", &self.next_day)
            .finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Timestamp: Clone, Send, Sync, fmt::Debug, fmt::Display);

    // 2024-05-26T00:00:00
    const DAY_START: i64 = 1_716_681_600_000_000_000;

    #[test]
    fn renders_fresh_instant() {
        let timestamp = Timestamp::new(1_716_753_307_989_767_545);

        assert_eq!(timestamp.as_str(), "2024-05-26T19:55:07.989767545");
        assert_eq!(timestamp.as_str().len(), Timestamp::LEN);
        assert_eq!(timestamp.date(), Date::from_ymd(2024, 5, 26).unwrap());
        assert_eq!(timestamp.nanos(), 1_716_753_307_989_767_545);
        assert_eq!(timestamp.tempore(), 71_707_989_767_545);
        assert_eq!(timestamp.next_day(), DAY_START + NANOS_PER_DAY_SIGNED);
    }

    #[test]
    fn partial_update_within_day() {
        let mut timestamp = Timestamp::new(1_716_753_307_989_767_545);

        // 1 minute, 3 seconds and 10_010_010 nanoseconds later.
        timestamp.update(1_716_753_307_989_767_545 + 63_010_010_010);

        assert_eq!(timestamp.as_str(), "2024-05-26T19:56:10.999777555");
    }

    #[test]
    fn update_rolls_over_all_time_fields() {
        let mut timestamp = Timestamp::new(DAY_START + 19 * 3_600_000_000_000 + 3_599_900_000_000);
        assert_eq!(timestamp.as_str(), "2024-05-26T19:59:59.900000000");

        // Only 200 ms later, but every time field changes.
        timestamp.update(timestamp.nanos() + 200_000_000);

        assert_eq!(timestamp.as_str(), "2024-05-26T20:00:00.100000000");
    }

    #[test]
    fn update_crosses_midnight() {
        let mut timestamp = Timestamp::new(DAY_START + NANOS_PER_DAY_SIGNED - 1);
        assert_eq!(timestamp.as_str(), "2024-05-26T23:59:59.999999999");

        timestamp.update(DAY_START + NANOS_PER_DAY_SIGNED);

        assert_eq!(timestamp.as_str(), "2024-05-27T00:00:00.000000000");
        assert_eq!(timestamp.date(), Date::from_ymd(2024, 5, 27).unwrap());
        assert_eq!(timestamp.next_day(), DAY_START + 2 * NANOS_PER_DAY_SIGNED);
    }

    #[test]
    fn update_jumps_many_days() {
        let mut timestamp = Timestamp::new(0);
        assert_eq!(timestamp.as_str(), "1970-01-01T00:00:00.000000000");

        timestamp.update(1_716_753_307_989_767_545);

        assert_eq!(timestamp.as_str(), "2024-05-26T19:55:07.989767545");
    }

    #[test]
    fn backwards_within_day_renders_correctly() {
        let mut timestamp = Timestamp::new(1_716_753_370_999_777_555);

        timestamp.update(1_716_753_307_989_767_545);

        assert_eq!(timestamp.as_str(), "2024-05-26T19:55:07.989767545");
    }

    #[test]
    fn init_moves_backwards_across_days() {
        let mut timestamp = Timestamp::new(1_716_753_307_989_767_545);

        timestamp.init(0);

        assert_eq!(timestamp.as_str(), "1970-01-01T00:00:00.000000000");
        assert_eq!(timestamp.next_day(), NANOS_PER_DAY_SIGNED);
    }

    #[test]
    fn subsecond_updates_leave_other_fields_alone() {
        let start = 1_716_753_307_000_000_000;
        let mut timestamp = Timestamp::new(start);
        let before = *timestamp.as_bytes();

        for subsec in [1, 999_999_999, 500, 123_456_789, 0] {
            timestamp.update(start + subsec);

            assert_eq!(timestamp.as_bytes()[..20], before[..20]);
        }

        assert_eq!(timestamp.as_str(), "2024-05-26T19:55:07.000000000");
    }

    #[test]
    fn negative_instants() {
        assert_eq!(
            Timestamp::new(-1).as_str(),
            "1969-12-31T23:59:59.999999999"
        );
        assert_eq!(
            Timestamp::new(-NANOS_PER_DAY_SIGNED).as_str(),
            "1969-12-31T00:00:00.000000000"
        );
    }

    #[test]
    fn representable_extremes() {
        assert_eq!(
            Timestamp::new(i64::MIN).as_str(),
            "1677-09-21T00:12:43.145224192"
        );

        let mut last = Timestamp::new(i64::MAX);
        assert_eq!(last.as_str(), "2262-04-11T23:47:16.854775807");
        assert_eq!(last.next_day(), i64::MAX);

        last.update(i64::MAX);
        assert_eq!(last.as_str(), "2262-04-11T23:47:16.854775807");
    }

    #[test]
    fn display_and_debug() {
        let timestamp = Timestamp::new(0);

        assert_eq!(timestamp.to_string(), "1970-01-01T00:00:00.000000000");
        assert!(format!("{timestamp:?}").contains("1970-01-01T00:00:00.000000000"));
    }
}
