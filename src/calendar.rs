//! Proleptic Gregorian arithmetic on day counts.
//!
//! Day counts are shifted onto an absolute epoch far in the past so that the
//! cycle decomposition can run on unsigned integers. Every function here is
//! total: inputs outside the supported year range wrap instead of panicking.

use std::cmp::Ordering;

use crate::consts::{
    ABSOLUTE_ZERO_YEAR, DAYS_BEFORE, DAYS_PER_4_YEARS, DAYS_PER_100_YEARS, DAYS_PER_400_YEARS,
    DAYS_PER_YEAR, INTERNAL_TO_ABSOLUTE, LEAP_DAY_ORDINAL,
};
use crate::types::is_leap_year;

/// Calendar fields of a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Civil {
    pub year: i64,
    pub month: u32,
    pub day: u32,
    /// Zero-based day of the year
    pub year_day0: u32,
}

/// Maps a day count relative to 0001-01-01 onto the absolute epoch.
#[inline]
pub(crate) const fn to_absolute(days: i64) -> u64 {
    days.wrapping_add(INTERNAL_TO_ABSOLUTE) as u64
}

/// Returns the year and the zero-based day of the year of an absolute day.
pub(crate) const fn year_and_day(abs: u64) -> (i64, u32) {
    let mut d = abs;

    // 400-year cycles
    let mut n = d / DAYS_PER_400_YEARS;
    let mut y = 400 * n;
    d -= DAYS_PER_400_YEARS * n;

    // 100-year cycles. The last one holds an extra leap day, so the last day
    // of a 400-year cycle divides out as 4; cut it back to 3.
    n = d / DAYS_PER_100_YEARS;
    n -= n >> 2;
    y += 100 * n;
    d -= DAYS_PER_100_YEARS * n;

    // 4-year cycles. The missing leap day of the last one does not matter.
    n = d / DAYS_PER_4_YEARS;
    y += 4 * n;
    d -= DAYS_PER_4_YEARS * n;

    // Years within a 4-year cycle, same correction as for centuries.
    n = d / DAYS_PER_YEAR;
    n -= n >> 2;
    y += n;
    d -= DAYS_PER_YEAR * n;

    ((y as i64).wrapping_add(ABSOLUTE_ZERO_YEAR), d as u32)
}

/// Returns the month and day of month for a zero-based day of `year`.
pub(crate) fn month_and_day(year: i64, year_day0: u32) -> (u32, u32) {
    let mut day = year_day0;
    if is_leap_year(year) {
        match day.cmp(&(LEAP_DAY_ORDINAL - 1)) {
            // after February 29, pretend it was not there
            Ordering::Greater => day -= 1,
            Ordering::Equal => return (2, 29),
            Ordering::Less => {}
        }
    }

    // Assuming 31-day months the estimate is low by at most one.
    let mut month = (day / 31) as usize;
    let end = DAYS_BEFORE[month + 1];
    let begin = if day >= end {
        month += 1;
        end
    } else {
        DAYS_BEFORE[month]
    };

    (month as u32 + 1, day - begin + 1)
}

/// Full calendar decomposition of an absolute day.
pub(crate) fn civil(abs: u64) -> Civil {
    let (year, year_day0) = year_and_day(abs);
    let (month, day) = month_and_day(year, year_day0);
    Civil {
        year,
        month,
        day,
        year_day0,
    }
}

/// Days from the absolute epoch to January 1 of `year`.
const fn days_since_epoch(year: i64) -> i64 {
    let mut y = year.wrapping_sub(ABSOLUTE_ZERO_YEAR);

    let mut n = y / 400;
    y -= 400 * n;
    let mut d = n.wrapping_mul(DAYS_PER_400_YEARS as i64);

    n = y / 100;
    y -= 100 * n;
    d = d.wrapping_add(n * DAYS_PER_100_YEARS as i64);

    n = y / 4;
    y -= 4 * n;
    d = d.wrapping_add(n * DAYS_PER_4_YEARS as i64);

    d.wrapping_add(y * DAYS_PER_YEAR as i64)
}

/// Day count (relative to 0001-01-01) of a possibly denormalized date.
///
/// Months outside `1..=12` carry into the year and days outside the month
/// carry into neighbouring months, in closed form.
pub(crate) const fn days_from_ymd(year: i64, month: i64, day: i64) -> i64 {
    let month0 = month.wrapping_sub(1);
    let year = year.wrapping_add(month0.div_euclid(12));
    let month = month0.rem_euclid(12) as usize + 1;

    let mut d = days_since_epoch(year).wrapping_add(DAYS_BEFORE[month - 1] as i64);
    if is_leap_year(year) && month >= 3 {
        d = d.wrapping_add(1);
    }

    d.wrapping_add(day.wrapping_sub(1))
        .wrapping_sub(INTERNAL_TO_ABSOLUTE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_is_day_zero() {
        assert_eq!(days_from_ymd(1, 1, 1), 0);
        assert_eq!(days_from_ymd(2, 1, 1), 365);
        assert_eq!(days_from_ymd(5, 1, 1), 1461);
        assert_eq!(days_from_ymd(5, 3, 1), 1520);
    }

    #[test]
    fn test_year_and_day_cycle_boundaries() {
        // Last day of a 400-year cycle is day 365 of a leap year
        let abs = to_absolute(days_from_ymd(2000, 12, 31));
        assert_eq!(year_and_day(abs), (2000, 365));

        // Last day of a century that is not a leap year
        let abs = to_absolute(days_from_ymd(1900, 12, 31));
        assert_eq!(year_and_day(abs), (1900, 364));

        // Last day of a 4-year cycle
        let abs = to_absolute(days_from_ymd(2024, 12, 31));
        assert_eq!(year_and_day(abs), (2024, 365));

        let abs = to_absolute(days_from_ymd(2025, 1, 1));
        assert_eq!(year_and_day(abs), (2025, 0));
    }

    #[test]
    fn test_month_and_day_leap_year() {
        assert_eq!(month_and_day(2024, 58), (2, 28));
        assert_eq!(month_and_day(2024, 59), (2, 29));
        assert_eq!(month_and_day(2024, 60), (3, 1));
        assert_eq!(month_and_day(2024, 365), (12, 31));
    }

    #[test]
    fn test_month_and_day_common_year() {
        assert_eq!(month_and_day(2023, 0), (1, 1));
        assert_eq!(month_and_day(2023, 30), (1, 31));
        assert_eq!(month_and_day(2023, 31), (2, 1));
        assert_eq!(month_and_day(2023, 59), (3, 1));
        assert_eq!(month_and_day(2023, 364), (12, 31));
    }

    #[test]
    fn test_civil() {
        let c = civil(to_absolute(days_from_ymd(2023, 10, 25)));
        assert_eq!(
            c,
            Civil {
                year: 2023,
                month: 10,
                day: 25,
                year_day0: 297,
            }
        );
    }

    #[test]
    fn test_denormalized_input_carries() {
        assert_eq!(days_from_ymd(1957, 96, 104), 717_408);
        assert_eq!(days_from_ymd(1964, 12, 104), 717_408);
        assert_eq!(days_from_ymd(1, 1, 0), -1);
        assert_eq!(days_from_ymd(0, 12, 31), -1);
        assert_eq!(days_from_ymd(2024, 0, 1), days_from_ymd(2023, 12, 1));
        assert_eq!(days_from_ymd(2024, -11, 1), days_from_ymd(2022, 13, 1));
    }

    #[test]
    fn test_extreme_inputs_do_not_panic() {
        for value in [i64::MIN, i64::MIN + 1, -1, 0, 1, i64::MAX - 1, i64::MAX] {
            let days = days_from_ymd(value, value, value);
            let _ = civil(to_absolute(days));
            let _ = civil(to_absolute(value));
        }
    }
}
