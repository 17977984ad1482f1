//! The current date and conversions with `chrono::NaiveDate`.
//!
//! ```
//! use chrono::NaiveDate;
//! use plain_date::Date;
//!
//! let nd = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
//! let date = Date::from(nd);
//! assert_eq!(date, Date::from_ymd(2024, 2, 29));
//! assert_eq!(NaiveDate::try_from(date), Ok(nd));
//! ```

use chrono::{Datelike, NaiveDate, TimeZone, Utc};

use crate::Date;

/// Error converting a [`Date`] outside the range of `chrono::NaiveDate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("date {0} is out of range for chrono::NaiveDate")]
pub struct OutOfRangeError(pub Date);

impl Date {
    /// Returns the current date in the time zone `tz`.
    ///
    /// ```
    /// use plain_date::Date;
    ///
    /// let today = Date::today(&chrono::Utc);
    /// assert!(today > Date::from_ymd(2000, 1, 1));
    /// ```
    pub fn today<Tz: TimeZone>(tz: &Tz) -> Self {
        Utc::now().with_timezone(tz).date_naive().into()
    }
}

impl From<NaiveDate> for Date {
    fn from(d: NaiveDate) -> Self {
        // chrono counts 0001-01-01 as day 1
        Self::from_days(i64::from(d.num_days_from_ce()) - 1)
    }
}

impl TryFrom<Date> for NaiveDate {
    type Error = OutOfRangeError;

    fn try_from(date: Date) -> Result<Self, Self::Error> {
        date.days()
            .checked_add(1)
            .and_then(|days| i32::try_from(days).ok())
            .and_then(Self::from_num_days_from_ce_opt)
            .ok_or(OutOfRangeError(date))
    }
}
