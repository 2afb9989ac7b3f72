use std::fmt;

/// A day of the week, numbered 1 for Monday through 7 for Sunday.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
#[expect(clippy::exhaustive_enums, reason = "the week is not getting any longer")]
pub enum Weekday {
    /// Day 1.
    Monday = 1,
    /// Day 2.
    Tuesday = 2,
    /// Day 3.
    Wednesday = 3,
    /// Day 4.
    Thursday = 4,
    /// Day 5.
    Friday = 5,
    /// Day 6.
    Saturday = 6,
    /// Day 7.
    Sunday = 7,
}

impl Weekday {
    /// The day number, 1 for Monday through 7 for Sunday.
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// The weekday with the given number, or `None` if `number` is outside `1..=7`.
    #[must_use]
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::Monday),
            2 => Some(Self::Tuesday),
            3 => Some(Self::Wednesday),
            4 => Some(Self::Thursday),
            5 => Some(Self::Friday),
            6 => Some(Self::Saturday),
            7 => Some(Self::Sunday),
            _ => None,
        }
    }

    /// `number` must be in `1..=7`; anything else maps to Sunday.
    pub(crate) const fn from_number_unchecked(number: u8) -> Self {
        match Self::from_number(number) {
            Some(weekday) => weekday,
            None => Self::Sunday,
        }
    }

    /// The English name of the day.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn numbers_round_trip() {
        for number in 1..=7 {
            let weekday = Weekday::from_number(number).unwrap();
            assert_eq!(weekday.number(), number);
        }
    }

    #[test]
    fn out_of_range_numbers() {
        assert_eq!(Weekday::from_number(0), None);
        assert_eq!(Weekday::from_number(8), None);
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(Weekday::Thursday.to_string(), "Thursday");
        assert_eq!(Weekday::Sunday.to_string(), "Sunday");
    }
}
