use std::fmt;

use crate::{
    Error, MAX_RATA_DIE, MAX_YEAR, MIN_RATA_DIE, MIN_YEAR, RataDie, Result, Weekday,
    date_from_rata_die, day_of_week, days_in_month, is_leap_year, rata_die_from_date,
};

/// A date in the proleptic Gregorian calendar.
///
/// Dates produced by [`Date::from_rata_die`] are always valid calendar dates. Dates built with
/// [`Date::from_ymd`] are checked against the nominal month and day ranges and the supported year
/// range, but not against the true length of the month.
///
/// Dates order chronologically.
///
/// # Examples
///
/// ```
/// use chronon::{Date, Weekday};
///
/// let date = Date::from_ymd(2024, 4, 25).unwrap();
///
/// assert_eq!(date.to_rata_die(), 19_838);
/// assert_eq!(date.weekday(), Weekday::Thursday);
/// assert_eq!(date.to_string(), "2024-04-25");
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Date {
    year: i32,
    month: u8,
    day: u8,
}

impl Date {
    /// The earliest date the calendar arithmetic supports.
    pub const MIN: Self = date_from_rata_die(MIN_RATA_DIE);

    /// The latest date the calendar arithmetic supports.
    pub const MAX: Self = date_from_rata_die(MAX_RATA_DIE);

    /// 1970-01-01, rata die 0.
    pub const UNIX_EPOCH: Self = Self::new_unchecked(1970, 1, 1);

    /// Creates a date from its components.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidYear`] if `year` is outside [`MIN_YEAR`]`..=`[`MAX_YEAR`],
    /// [`Error::InvalidMonth`] if `month` is outside `1..=12` and [`Error::InvalidDay`] if `day`
    /// is outside `1..=31`. A day past the end of its month is not detected; compare against
    /// [`days_in_month`] if that matters.
    pub fn from_ymd(year: i32, month: u8, day: u8) -> Result<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(Error::InvalidYear { year });
        }

        if !(1..=12).contains(&month) {
            return Err(Error::InvalidMonth { month });
        }

        if !(1..=31).contains(&day) {
            return Err(Error::InvalidDay { day });
        }

        Ok(Self::new_unchecked(year, month, day))
    }

    pub(crate) const fn new_unchecked(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Creates the date for a rata die.
    ///
    /// `rata_die` must be within [`MIN_RATA_DIE`]`..=`[`MAX_RATA_DIE`]; see
    /// [`date_from_rata_die`].
    #[must_use]
    #[inline]
    pub const fn from_rata_die(rata_die: RataDie) -> Self {
        date_from_rata_die(rata_die)
    }

    /// The rata die of this date.
    #[must_use]
    #[inline]
    pub const fn to_rata_die(self) -> RataDie {
        rata_die_from_date(self.year, self.month, self.day)
    }

    /// The year. Year 0 is 1 BC.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// The month, 1 for January through 12 for December.
    #[must_use]
    pub const fn month(self) -> u8 {
        self.month
    }

    /// The 1-based day of the month.
    #[must_use]
    pub const fn day(self) -> u8 {
        self.day
    }

    /// The day of the week.
    #[must_use]
    pub const fn weekday(self) -> Weekday {
        day_of_week(self.to_rata_die())
    }

    /// Whether this date falls in a leap year.
    #[must_use]
    pub const fn is_leap_year(self) -> bool {
        is_leap_year(self.year)
    }

    /// The number of days in the month of this date.
    #[must_use]
    pub const fn days_in_month(self) -> u8 {
        days_in_month(self.year, self.month)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.year < 0 {
            write!(f, "-{:04}", self.year.unsigned_abs())?;
        } else {
            write!(f, "{:04}", self.year)?;
        }

        write!(f, "-{:02}-{:02}", self.month, self.day)
    }
}
