use crate::consts::{
    CENTURY_CYCLE, DAYS_BEFORE, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE, LONG_DAY_NAMES,
    LONG_MONTH_NAMES, SHORT_DAY_NAMES, SHORT_MONTH_NAMES,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error converting a number into a [`Month`] or [`Weekday`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ComponentError {
    #[error("Invalid month: {0} (must be 1-12)")]
    InvalidMonth(u8),
    #[error("Invalid weekday: {0} (must be 0-6, Sunday first)")]
    InvalidWeekday(u8),
}

/// A month of the Gregorian year, numbered 1 through 12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Month {
    January = 1,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    const ALL: [Self; 12] = [
        Self::January,
        Self::February,
        Self::March,
        Self::April,
        Self::May,
        Self::June,
        Self::July,
        Self::August,
        Self::September,
        Self::October,
        Self::November,
        Self::December,
    ];

    /// Returns the month for a number in `1..=12`.
    pub const fn new(number: u32) -> Option<Self> {
        if number >= 1 && number <= 12 {
            Some(Self::ALL[number as usize - 1])
        } else {
            None
        }
    }

    /// Returns the month number (January is 1)
    #[inline]
    pub const fn number(self) -> u32 {
        self as u32
    }

    /// Returns the English name, e.g. "January"
    pub const fn name(self) -> &'static str {
        LONG_MONTH_NAMES[self as usize - 1]
    }

    /// Returns the three-letter English abbreviation, e.g. "Jan"
    pub const fn short_name(self) -> &'static str {
        SHORT_MONTH_NAMES[self as usize - 1]
    }

    /// Number of days in this month of the given year.
    pub const fn days_in(self, year: i64) -> u32 {
        days_in_month(year, self.number())
    }
}

impl TryFrom<u8> for Month {
    type Error = ComponentError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(u32::from(value)).ok_or(ComponentError::InvalidMonth(value))
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month as Self
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A day of the week, numbered from Sunday (0) to Saturday (6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Weekday {
    Sunday = 0,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    const ALL: [Self; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Returns the weekday `n` days after Sunday, wrapping every week.
    pub(crate) const fn from_days_after_sunday(n: u64) -> Self {
        Self::ALL[(n % 7) as usize]
    }

    /// Returns the weekday number (Sunday is 0)
    #[inline]
    pub const fn number(self) -> u32 {
        self as u32
    }

    /// Returns the English name, e.g. "Monday"
    pub const fn name(self) -> &'static str {
        LONG_DAY_NAMES[self as usize]
    }

    /// Returns the three-letter English abbreviation, e.g. "Mon"
    pub const fn short_name(self) -> &'static str {
        SHORT_DAY_NAMES[self as usize]
    }
}

impl TryFrom<u8> for Weekday {
    type Error = ComponentError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(ComponentError::InvalidWeekday(value))
    }
}

impl From<Weekday> for u8 {
    fn from(weekday: Weekday) -> Self {
        weekday as Self
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Helper functions

/// Reports whether `year` is a leap year in the proleptic Gregorian calendar.
pub const fn is_leap_year(year: i64) -> bool {
    year % LEAP_YEAR_CYCLE == 0 && (year % CENTURY_CYCLE != 0 || year % GREGORIAN_CYCLE == 0)
}

/// Number of days in `month` (1-based) of `year`.
pub(crate) const fn days_in_month(year: i64, month: u32) -> u32 {
    debug_assert!(month != 0 && month <= 12);

    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS_BEFORE[month as usize] - DAYS_BEFORE[month as usize - 1]
    }
}
