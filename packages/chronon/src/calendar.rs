//! Conversions between rata die day numbers and proleptic Gregorian dates.
//!
//! The conversions work in a *computational calendar* whose years start on 1 March, which puts
//! the leap day at the very end of the year, and whose day count is shifted by a whole number of
//! 400-year cycles so that every supported date has a non-negative day number. All intermediate
//! quantities then fit in `u32` and every division is either by a constant the compiler turns
//! into a multiplication, or replaced outright by a multiply-high against a precomputed
//! reciprocal. The results are exact over the whole supported range.

use crate::{Date, Weekday};

/// A signed day count where day 0 is 1970-01-01.
pub type RataDie = i32;

/// Days in one 400-year Gregorian cycle.
const DAYS_PER_CYCLE: u32 = 146_097;

/// Whole 400-year cycles the computational calendar is shifted by.
///
/// This must stay a whole number of cycles: [`is_leap_year`] tests divisibility on the shifted
/// year and relies on the shift preserving divisibility by 400. Changing it also invalidates
/// [`MIN_RATA_DIE`], [`MAX_RATA_DIE`], [`MIN_YEAR`] and [`MAX_YEAR`].
const SHIFT_CYCLES: u32 = 82;

/// Years added to a Gregorian year to obtain the computational year.
const YEAR_SHIFT: u32 = 400 * SHIFT_CYCLES;

/// Days from 0000-03-01 to 1970-01-01.
const EPOCH_DAYS_FROM_MARCH_ZERO: u32 = 719_468;

/// Days added to a rata die to obtain the computational day number.
const DAY_SHIFT: u32 = EPOCH_DAYS_FROM_MARCH_ZERO + DAYS_PER_CYCLE * SHIFT_CYCLES;

/// `ceil(2^32 / 1461)`. Multiplying `4 * day_of_century + 3` by this and keeping the high word
/// divides by 1461 (days per four years); the low word divided by this recovers the remainder.
const YEAR_RECIPROCAL: u64 = 2_939_745;

/// Affine map from day of the computational year to `month * 2^16 + 2141 * day_of_month`.
const MONTH_SLOPE: u32 = 2_141;
const MONTH_INTERCEPT: u32 = 197_913;

/// Day of the computational year on which January starts (March through December precede it).
const JANUARY_DAY_OF_YEAR: u32 = 306;

/// The earliest rata die the conversions accept (-32800-03-01).
#[expect(
    clippy::cast_possible_wrap,
    reason = "the shift is far below i32::MAX"
)]
pub const MIN_RATA_DIE: RataDie = -(DAY_SHIFT as i32);

/// The latest rata die the conversions accept (2906945-02-28).
pub const MAX_RATA_DIE: RataDie = 1_061_020_390;

/// The earliest year that [`Date::from_ymd`] accepts. Every date in this year is supported.
pub const MIN_YEAR: i32 = -32_799;

/// The latest year that [`Date::from_ymd`] accepts. Every date in this year is supported.
pub const MAX_YEAR: i32 = 2_906_944;

const _: () = assert!(YEAR_SHIFT % 400 == 0);
const _: () = assert!(MIN_RATA_DIE == -12_699_422);
const _: () = assert!(rata_die_from_date(MAX_YEAR.wrapping_add(1), 2, 28) == MAX_RATA_DIE);

/// Converts a rata die into a calendar date.
///
/// The caller must keep `rata_die` within [`MIN_RATA_DIE`]`..=`[`MAX_RATA_DIE`]. Outside that
/// range the fixed-width arithmetic wraps around and the result is meaningless; this is not
/// checked.
///
/// ```
/// use chronon::date_from_rata_die;
///
/// let date = date_from_rata_die(19_838);
/// assert_eq!((date.year(), date.month(), date.day()), (2024, 4, 25));
/// ```
#[must_use]
#[inline]
#[expect(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::integer_division,
    clippy::modulo_arithmetic,
    reason = "unsigned fixed-width arithmetic over a shifted domain is the point of the algorithm"
)]
pub const fn date_from_rata_die(rata_die: RataDie) -> Date {
    let n = (rata_die as u32).wrapping_add(DAY_SHIFT);

    // Century and day of century.
    let n1 = n.wrapping_mul(4).wrapping_add(3);
    let century = n1 / DAYS_PER_CYCLE;
    let day_of_century = n1 % DAYS_PER_CYCLE / 4;

    // Year of century and day of year, by multiply-high instead of dividing by 1461.
    let n2 = day_of_century.wrapping_mul(4).wrapping_add(3) as u64;
    let product = n2.wrapping_mul(YEAR_RECIPROCAL);
    let year_of_century = (product >> 32) as u32;
    let day_of_year = (product as u32) / (YEAR_RECIPROCAL as u32) / 4;

    // Month and day of month.
    let n3 = day_of_year
        .wrapping_mul(MONTH_SLOPE)
        .wrapping_add(MONTH_INTERCEPT);
    let month = n3 >> 16;
    let day = (n3 & 0xFFFF) / MONTH_SLOPE;

    // January and February belong to the following Gregorian year.
    let in_next_year = (day_of_year >= JANUARY_DAY_OF_YEAR) as u32;

    let year = century
        .wrapping_mul(100)
        .wrapping_add(year_of_century)
        .wrapping_add(in_next_year)
        .wrapping_sub(YEAR_SHIFT);

    Date::new_unchecked(
        year as i32,
        month.wrapping_sub(in_next_year.wrapping_mul(12)) as u8,
        day.wrapping_add(1) as u8,
    )
}

/// Converts a calendar date into a rata die.
///
/// The inverse of [`date_from_rata_die`]. The caller must supply a valid date with `year` in
/// [`MIN_YEAR`]`..=`[`MAX_YEAR`]; nothing is checked here. Use [`Date::from_ymd`] to validate
/// untrusted input first.
///
/// ```
/// use chronon::rata_die_from_date;
///
/// assert_eq!(rata_die_from_date(1970, 1, 1), 0);
/// assert_eq!(rata_die_from_date(1969, 12, 31), -1);
/// ```
#[must_use]
#[inline]
#[expect(
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_lossless,
    clippy::integer_division,
    reason = "unsigned fixed-width arithmetic over a shifted domain is the point of the algorithm"
)]
pub const fn rata_die_from_date(year: i32, month: u8, day: u8) -> RataDie {
    // January and February belong to the previous computational year.
    let in_previous_year = (month <= 2) as u32;

    let year = (year as u32)
        .wrapping_add(YEAR_SHIFT)
        .wrapping_sub(in_previous_year);
    let month = (month as u32).wrapping_add(in_previous_year.wrapping_mul(12));
    let day = (day as u32).wrapping_sub(1);

    // 365.25 days per year, minus the skipped century leap days, plus the kept 400-year ones.
    let century = year / 100;
    let year_days = (year.wrapping_mul(1_461) / 4)
        .wrapping_sub(century)
        .wrapping_add(century / 4);

    // Cumulative month lengths from March, as a tight affine approximation.
    let month_days = month.wrapping_mul(979).wrapping_sub(2_919) / 32;

    year_days
        .wrapping_add(month_days)
        .wrapping_add(day)
        .wrapping_sub(DAY_SHIFT) as i32
}

/// Whether `year` is a Gregorian leap year.
///
/// On the shifted year, divisibility by 4 is a test against the low two bits. A century year is
/// a multiple of 100 and so of 25, which makes "divisible by 400" equivalent to "divisible by 16",
/// a test against the low four bits.
///
/// The caller must keep `year` within [`MIN_YEAR`]`..=`[`MAX_YEAR`].
///
/// ```
/// use chronon::is_leap_year;
///
/// assert!(is_leap_year(2000));
/// assert!(is_leap_year(2024));
/// assert!(!is_leap_year(2100));
/// ```
#[must_use]
#[inline]
#[expect(
    clippy::cast_lossless,
    clippy::cast_sign_loss,
    clippy::modulo_arithmetic,
    reason = "unsigned arithmetic over a shifted domain"
)]
pub const fn is_leap_year(year: i32) -> bool {
    let year = (year as u32).wrapping_add(YEAR_SHIFT);
    let is_century = (year % 100 == 0) as u32;

    (year & (3 | is_century.wrapping_mul(12))) == 0
}

/// The number of days in `month` of `year`.
///
/// `month` must be in `1..=12`. Apart from February, the 31/30 pattern is computed from the month
/// number alone: the low bit of the month flips meaning from August onwards, which bit 3 detects.
///
/// ```
/// use chronon::days_in_month;
///
/// assert_eq!(days_in_month(2000, 2), 29);
/// assert_eq!(days_in_month(1999, 2), 28);
/// assert_eq!(days_in_month(1999, 8), 31);
/// ```
#[must_use]
#[inline]
#[expect(clippy::cast_lossless, reason = "From is not usable in const fn")]
pub const fn days_in_month(year: i32, month: u8) -> u8 {
    if month == 2 {
        28 | is_leap_year(year) as u8
    } else {
        30 | ((month ^ (month >> 3)) & 1)
    }
}

/// The day of the week of a rata die.
///
/// The caller must keep `rata_die` within [`MIN_RATA_DIE`]`..=`[`MAX_RATA_DIE`].
///
/// ```
/// use chronon::{Weekday, day_of_week};
///
/// assert_eq!(day_of_week(0), Weekday::Thursday);
/// ```
#[must_use]
#[inline]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::modulo_arithmetic,
    reason = "unsigned arithmetic over a shifted domain; the remainder is below 7"
)]
pub const fn day_of_week(rata_die: RataDie) -> Weekday {
    let n = (rata_die as u32).wrapping_add(DAY_SHIFT);

    // The computational day number of 1970-01-01 (a Thursday) is 1 modulo 7.
    Weekday::from_number_unchecked(((n.wrapping_add(2) % 7) as u8).wrapping_add(1))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn ymd(date: Date) -> (i32, u8, u8) {
        (date.year(), date.month(), date.day())
    }

    #[test]
    fn epoch_is_day_zero() {
        assert_eq!(ymd(date_from_rata_die(0)), (1970, 1, 1));
        assert_eq!(rata_die_from_date(1970, 1, 1), 0);
    }

    #[test]
    fn known_dates() {
        assert_eq!(ymd(date_from_rata_die(19_838)), (2024, 4, 25));
        assert_eq!(ymd(date_from_rata_die(-1)), (1969, 12, 31));
        assert_eq!(ymd(date_from_rata_die(10_957)), (2000, 1, 1));
        assert_eq!(ymd(date_from_rata_die(11_016)), (2000, 2, 29));
        assert_eq!(ymd(date_from_rata_die(11_017)), (2000, 3, 1));
        assert_eq!(ymd(date_from_rata_die(-719_468)), (0, 3, 1));
        assert_eq!(rata_die_from_date(2024, 5, 26), 19_869);
        assert_eq!(rata_die_from_date(1600, 1, 1), -135_140);
    }

    #[test]
    fn range_boundaries() {
        assert_eq!(ymd(date_from_rata_die(MIN_RATA_DIE)), (-32_800, 3, 1));
        assert_eq!(ymd(date_from_rata_die(MAX_RATA_DIE)), (2_906_945, 2, 28));

        assert_eq!(rata_die_from_date(-32_800, 3, 1), MIN_RATA_DIE);
        assert_eq!(rata_die_from_date(2_906_945, 2, 28), MAX_RATA_DIE);

        assert_eq!(
            ymd(date_from_rata_die(rata_die_from_date(MIN_YEAR, 1, 1))),
            (MIN_YEAR, 1, 1)
        );
        assert_eq!(
            ymd(date_from_rata_die(rata_die_from_date(MAX_YEAR, 12, 31))),
            (MAX_YEAR, 12, 31)
        );
    }

    #[test]
    fn round_trip_near_boundaries() {
        let low = MIN_RATA_DIE..MIN_RATA_DIE + 1_000;
        let high = MAX_RATA_DIE - 1_000..=MAX_RATA_DIE;

        for rata_die in low.chain(high) {
            let date = date_from_rata_die(rata_die);
            assert_eq!(
                rata_die_from_date(date.year(), date.month(), date.day()),
                rata_die
            );
        }
    }

    #[test]
    fn consecutive_days_are_consecutive_dates() {
        let mut previous = date_from_rata_die(-800_000);

        for rata_die in -799_999..800_000 {
            let date = date_from_rata_die(rata_die);

            if date.day() == 1 {
                assert_eq!(
                    previous.day(),
                    days_in_month(previous.year(), previous.month())
                );
            } else {
                assert_eq!(date.day(), previous.day() + 1);
                assert_eq!(date.month(), previous.month());
                assert_eq!(date.year(), previous.year());
            }

            previous = date;
        }
    }

    #[test]
    fn leap_years() {
        for year in [2000, 1600, 2400, 2004, 1996, 0, -4, -400] {
            assert!(is_leap_year(year), "{year} should be a leap year");
        }

        for year in [2100, 1500, 2500, 1999, 1900, -100, -1] {
            assert!(!is_leap_year(year), "{year} should not be a leap year");
        }
    }

    #[test]
    fn leap_year_matches_rule_everywhere() {
        for year in MIN_YEAR..40_000 {
            let expected = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
            assert_eq!(is_leap_year(year), expected, "year {year}");
        }
    }

    #[test]
    fn month_lengths() {
        let expected = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

        for (month, expected) in (1..=12).zip(expected) {
            assert_eq!(days_in_month(1999, month), expected, "month {month}");
        }

        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(1999, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
    }

    #[test]
    fn weekdays() {
        assert_eq!(day_of_week(0), Weekday::Thursday);
        assert_eq!(day_of_week(rata_die_from_date(2000, 2, 29)), Weekday::Tuesday);
        assert_eq!(day_of_week(rata_die_from_date(2024, 5, 26)), Weekday::Sunday);
        assert_eq!(day_of_week(rata_die_from_date(2024, 5, 27)), Weekday::Monday);
        assert_eq!(day_of_week(-1), Weekday::Wednesday);
        assert_eq!(day_of_week(MIN_RATA_DIE), day_of_week(MIN_RATA_DIE + 7));
    }
}
