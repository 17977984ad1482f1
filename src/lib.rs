//! Calendar dates without time of day or time zone.
//!
//! A [`Date`] is the number of days since January 1 of year 1 in the
//! proleptic Gregorian calendar. Dates are formatted and parsed through
//! layouts written in terms of the reference date, Monday, January 2, 2006:
//!
//! ```
//! use plain_date::{Date, RFC1123};
//!
//! let date = Date::from_ymd(2023, 10, 25);
//! assert_eq!(date.format("Monday, January 2"), "Wednesday, October 25");
//! assert_eq!(Date::parse(RFC1123, "25 Oct 2023"), Ok(date));
//! ```
//!
//! Code that formats or parses many dates with a handful of layouts should
//! keep a [`LayoutCache`] so every pattern is compiled once.

mod cache;
mod calendar;
#[cfg(feature = "clock")]
mod clock;
mod consts;
mod encoding;
mod format;
mod layout;
mod parse;
mod prelude;
mod types;

pub use cache::{Cache, Sizer};
#[cfg(feature = "clock")]
pub use clock::OutOfRangeError;
pub use consts::*;
pub use encoding::{DecodeError, MAX_VARINT_LEN};
pub use format::Formatted;
pub use layout::{Instruction, Layout, LayoutCache, Op};
pub use parse::{InvalidDate, ParseError};
pub use types::{ComponentError, Month, Weekday, is_leap_year};

use crate::calendar::{civil, days_from_ymd, to_absolute, year_and_day};
use crate::layout::ISO;
use crate::prelude::*;
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

/// A day in the proleptic Gregorian calendar, counted from 0001-01-01.
///
/// `Date(0)` is January 1 of year 1, negative values lie before it. Dates are
/// ordered by their day count; adding or subtracting an `i64` moves by that
/// many days.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, From, Into)]
pub struct Date(i64);

impl Date {
    /// Returns the date of `day` of `month` of `year`.
    ///
    /// Values outside their usual ranges are normalized: October 32 becomes
    /// November 1, month 0 is December of the previous year.
    ///
    /// ```
    /// use plain_date::Date;
    ///
    /// assert_eq!(Date::from_ymd(2023, 12, 40), Date::from_ymd(2024, 1, 9));
    /// assert_eq!(Date::from_ymd(1, 1, 0), Date::from_ymd(0, 12, 31));
    /// ```
    pub const fn from_ymd(year: i64, month: i64, day: i64) -> Self {
        Self(days_from_ymd(year, month, day))
    }

    /// Returns the date `days` days after 0001-01-01.
    pub const fn from_days(days: i64) -> Self {
        Self(days)
    }

    /// Number of days since 0001-01-01.
    #[inline]
    pub const fn days(self) -> i64 {
        self.0
    }

    /// Returns the year, month and day of month.
    pub fn ymd(self) -> (i64, Month, u32) {
        let c = civil(to_absolute(self.0));
        // civil() always yields a month in 1..=12
        (c.year, Month::new(c.month).unwrap_or(Month::January), c.day)
    }

    pub const fn year(self) -> i64 {
        year_and_day(to_absolute(self.0)).0
    }

    pub fn month(self) -> Month {
        self.ymd().1
    }

    /// Day of the month, in `1..=31`.
    pub fn day(self) -> u32 {
        self.ymd().2
    }

    /// Day of the year, in `1..=365` or `1..=366` in leap years.
    pub const fn year_day(self) -> u32 {
        year_and_day(to_absolute(self.0)).1 + 1
    }

    pub const fn weekday(self) -> Weekday {
        // 0001-01-01 was a Monday
        Weekday::from_days_after_sunday(self.0.rem_euclid(7) as u64 + 1)
    }

    /// Returns the ISO 8601 year and week number, in `1..=53`.
    ///
    /// January 1 to 3 may belong to the last week of the previous year and
    /// December 29 to 31 to the first week of the next.
    pub const fn iso_week(self) -> (i64, u32) {
        // Weeks run Monday to Sunday; the Thursday decides the year.
        let mut offset = Weekday::Thursday.number() as i64 - self.weekday().number() as i64;
        if offset == 4 {
            offset = -3;
        }
        let (year, year_day0) = year_and_day(to_absolute(self.0.wrapping_add(offset)));
        (year, year_day0 / 7 + 1)
    }

    /// Adds years, months and days, normalizing the result like
    /// [`Date::from_ymd`]. One month after January 31 is March 3 or 2.
    pub fn add_date(self, years: i64, months: i64, days: i64) -> Self {
        let (year, month, day) = self.ymd();
        Self::from_ymd(
            year.wrapping_add(years),
            i64::from(month.number()).wrapping_add(months),
            i64::from(day).wrapping_add(days),
        )
    }

    /// Formats the date with `pattern`.
    ///
    /// The predefined layouts are compiled ahead of time; any other pattern
    /// is compiled on every call. Use a [`LayoutCache`] or a compiled
    /// [`Layout`] for repeated use of custom patterns.
    pub fn format(self, pattern: &str) -> String {
        match Layout::predefined(pattern) {
            Some(layout) => layout.format(self),
            None => Layout::compile(pattern).format(self),
        }
    }

    /// Parses `text` with `pattern`.
    ///
    /// With one of the predefined layouts a successful parse does not
    /// allocate. Any other pattern is compiled on every call; use a
    /// [`LayoutCache`] or a compiled [`Layout`] for repeated use.
    ///
    /// # Errors
    /// Returns [`ParseError`] if `text` does not match the layout or names an
    /// invalid date.
    pub fn parse(pattern: &str, text: &str) -> Result<Self, ParseError> {
        match Layout::predefined(pattern) {
            Some(layout) => layout.parse(text),
            None => Layout::compile(pattern).parse(text),
        }
    }
}

impl fmt::Debug for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (year, month, day) = self.ymd();
        write!(f, "Date::from_ymd({year}, {}, {day})", month.number())
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.width().is_some() {
            f.pad(&ISO.format(*self))
        } else {
            ISO.write_to(*self, f)
        }
    }
}

impl FromStr for Date {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ISO.parse(s)
    }
}

impl Add<i64> for Date {
    type Output = Self;

    fn add(self, days: i64) -> Self {
        Self(self.0.wrapping_add(days))
    }
}

impl Sub<i64> for Date {
    type Output = Self;

    fn sub(self, days: i64) -> Self {
        Self(self.0.wrapping_sub(days))
    }
}

/// Number of days from `rhs` to `self`.
impl Sub for Date {
    type Output = i64;

    fn sub(self, rhs: Self) -> i64 {
        self.0.wrapping_sub(rhs.0)
    }
}

impl AddAssign<i64> for Date {
    fn add_assign(&mut self, days: i64) {
        *self = *self + days;
    }
}

impl SubAssign<i64> for Date {
    fn sub_assign(&mut self, days: i64) {
        *self = *self - days;
    }
}

impl serde::Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Date {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch() {
        let epoch = Date::from_days(0);
        assert_eq!(epoch, Date::from_ymd(1, 1, 1));
        assert_eq!(epoch.ymd(), (1, Month::January, 1));
        assert_eq!(epoch.weekday(), Weekday::Monday);
        assert_eq!(Date::from_days(-1).weekday(), Weekday::Sunday);
        assert_eq!(Date::from_days(-1), Date::from_ymd(0, 12, 31));
    }

    #[test]
    fn test_known_day_counts() {
        assert_eq!(Date::from_ymd(2023, 7, 14).days(), 738_714);
        assert_eq!(Date::from_ymd(1957, 96, 104).days(), 717_408);
        assert_eq!(Date::from_ymd(1964, 12, 104).days(), 717_408);
        assert_eq!(i64::from(Date::from_ymd(1, 1, 0)), -1);
        assert_eq!(Date::from_days(738_714), Date::from_ymd(2023, 7, 14));
    }

    #[test]
    fn test_normalization() {
        assert_eq!(Date::from_ymd(2023, 12, 40), Date::from_ymd(2024, 1, 9));
        assert_eq!(Date::from_ymd(2023, 10, 32), Date::from_ymd(2023, 11, 1));
        assert_eq!(Date::from_ymd(2024, 0, 1), Date::from_ymd(2023, 12, 1));
        assert_eq!(Date::from_ymd(2024, 3, 0), Date::from_ymd(2024, 2, 29));
        assert_eq!(Date::from_ymd(2023, 3, 0), Date::from_ymd(2023, 2, 28));
        assert_eq!(Date::from_ymd(2024, -1, -1).ymd(), (2023, Month::October, 30));
    }

    #[test]
    fn test_components() {
        let date = Date::from_ymd(2023, 10, 25);
        assert_eq!(date.ymd(), (2023, Month::October, 25));
        assert_eq!(date.year(), 2023);
        assert_eq!(date.month(), Month::October);
        assert_eq!(date.day(), 25);
        assert_eq!(date.year_day(), 298);
        assert_eq!(date.weekday(), Weekday::Wednesday);

        let date = Date::from_ymd(-44, 3, 15);
        assert_eq!(date.ymd(), (-44, Month::March, 15));
        assert_eq!(Date::from_ymd(2024, 12, 31).year_day(), 366);
    }

    #[test]
    fn test_weekday_cycle() {
        let monday = Date::from_ymd(2024, 5, 13);
        let names: Vec<_> = (0..7).map(|i| (monday + i).weekday().short_name()).collect();
        assert_eq!(names, ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]);
        assert_eq!(Date::from_ymd(2006, 1, 2).weekday(), Weekday::Monday);
    }

    #[test]
    fn test_iso_week() {
        struct TestCase {
            date: Date,
            want: (i64, u32),
        }

        let cases = [
            TestCase {
                date: Date::from_ymd(2023, 1, 1),
                want: (2022, 52),
            },
            TestCase {
                date: Date::from_ymd(2023, 1, 2),
                want: (2023, 1),
            },
            TestCase {
                date: Date::from_ymd(2021, 1, 3),
                want: (2020, 53),
            },
            TestCase {
                date: Date::from_ymd(2024, 12, 30),
                want: (2025, 1),
            },
            TestCase {
                date: Date::from_ymd(2026, 1, 1),
                want: (2026, 1),
            },
            TestCase {
                date: Date::from_ymd(2023, 10, 25),
                want: (2023, 43),
            },
        ];

        for case in &cases {
            assert_eq!(case.date.iso_week(), case.want, "ISO week of {:?}", case.date);
        }
    }

    #[test]
    fn test_add_date() {
        let date = Date::from_ymd(2011, 1, 1);
        assert_eq!(date.add_date(-1, 2, 3), Date::from_ymd(2010, 3, 4));
        assert_eq!(
            Date::from_ymd(2023, 1, 31).add_date(0, 1, 0),
            Date::from_ymd(2023, 3, 3)
        );
        assert_eq!(
            Date::from_ymd(2024, 1, 31).add_date(0, 1, 0),
            Date::from_ymd(2024, 3, 2)
        );
        assert_eq!(
            Date::from_ymd(2024, 2, 29).add_date(1, 0, 0),
            Date::from_ymd(2025, 3, 1)
        );
        assert_eq!(date.add_date(0, 0, 0), date);
    }

    #[test]
    fn test_arithmetic() {
        let mut date = Date::from_ymd(2024, 2, 28);
        assert_eq!(date + 1, Date::from_ymd(2024, 2, 29));
        assert_eq!(date + 2, Date::from_ymd(2024, 3, 1));
        assert_eq!(date - 59, Date::from_ymd(2023, 12, 31));
        assert_eq!(Date::from_ymd(2025, 1, 1) - Date::from_ymd(2024, 1, 1), 366);
        assert_eq!(Date::from_ymd(2024, 1, 1) - Date::from_ymd(2025, 1, 1), -366);

        date += 3;
        assert_eq!(date, Date::from_ymd(2024, 3, 2));
        date -= 3;
        assert_eq!(date, Date::from_ymd(2024, 2, 28));

        assert_eq!(Date::from_days(i64::MAX) + 1, Date::from_days(i64::MIN));
    }

    #[test]
    fn test_ordering() {
        let earlier = Date::from_ymd(1991, 8, 15);
        let later = Date::from_ymd(1991, 8, 16);
        assert!(earlier < later);
        assert_eq!(earlier.max(later), later);
        assert!(Date::from_ymd(-1, 1, 1) < Date::from_days(0));
    }

    #[test]
    fn test_debug() {
        assert_eq!(
            format!("{:?}", Date::from_ymd(2023, 7, 14)),
            "Date::from_ymd(2023, 7, 14)"
        );
        assert_eq!(
            format!("{:?}", Date::from_ymd(-5, 12, 31)),
            "Date::from_ymd(-5, 12, 31)"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Date::from_ymd(1991, 8, 15).to_string(), "1991-08-15");
        assert_eq!(Date::from_ymd(33, 1, 2).to_string(), "0033-01-02");
        assert_eq!(Date::from_ymd(-1, 6, 1).to_string(), "-0001-06-01");
        assert_eq!(format!("{:}", Date::from_days(0)), "0001-01-01");
    }

    #[test]
    fn test_display_padding() {
        let date = Date::from_ymd(2023, 10, 25);
        assert_eq!(format!("{date:>12}"), "  2023-10-25");
        assert_eq!(format!("{date:<12}|"), "2023-10-25  |");
        assert_eq!(format!("{date:*^14}"), "**2023-10-25**");
        assert_eq!(format!("{date:4}"), "2023-10-25");
    }

    #[test]
    fn test_predefined_layouts_round_trip() {
        let date = Date::from_ymd(2024, 2, 29);
        for pattern in [LAYOUT, RFC822, RFC1123, RFC3339] {
            let text = date.format(pattern);
            assert_eq!(text, Layout::compile(pattern).format(date));
            assert_eq!(Date::parse(pattern, &text), Ok(date), "{text:?} as {pattern:?}");
        }
        assert_eq!(date.format("Jan 2 2006"), "Feb 29 2024");
    }

    #[test]
    fn test_from_str() {
        let date: Date = "2024-02-29".parse().unwrap();
        assert_eq!(date, Date::from_ymd(2024, 2, 29));

        let err = "2023-02-29".parse::<Date>().unwrap_err();
        assert_eq!(err.reason(), Some(&InvalidDate::DayOutOfRange));

        let err = "29/02/2024".parse::<Date>().unwrap_err();
        assert!(matches!(err, ParseError::Mismatch { .. }));
        assert!(err.to_string().starts_with(r#"parsing date "29/02/2024" as "2006-01-02""#));
    }

    #[test]
    fn test_format_and_parse() {
        let date = Date::from_ymd(2023, 10, 25);
        assert_eq!(date.format("Mon Jan _2 2006"), "Wed Oct 25 2023");
        assert_eq!(date.format(RFC822), "25 Oct 23");
        assert_eq!(Date::parse(RFC822, "25 Oct 23"), Ok(date));
        assert_eq!(Date::parse("2006 __2", "2023 298"), Ok(date));
    }

    #[test]
    fn test_serde() {
        let date = Date::from_ymd(1991, 8, 15);
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, r#""1991-08-15""#);
        let parsed: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(date, parsed);
    }

    #[test]
    fn test_serde_validation() {
        for json in [r#""2024-13-01""#, r#""2024-02-30""#, r#""2024-1-01""#, "738714"] {
            let result: Result<Date, _> = serde_json::from_str(json);
            assert!(result.is_err(), "{json} should be rejected");
        }
    }

    #[test]
    fn test_default_is_epoch() {
        assert_eq!(Date::default(), Date::from_ymd(1, 1, 1));
    }
}
