/// Reference layout: the reference date January 2, 2006 in numerical order
pub const LAYOUT: &str = "01/02 '06";
/// Day, abbreviated month and two-digit year
pub const RFC822: &str = "02 Jan 06";
/// Day, abbreviated month and four-digit year
pub const RFC1123: &str = "02 Jan 2006";
/// ISO 8601 calendar date, used for text encoding
pub const RFC3339: &str = "2006-01-02";

/// Default logical capacity of a layout cache
pub const DEFAULT_CACHE_SIZE: u64 = 1 << 10;

/// Number of days before each month begins in a non-leap year.
/// Index 12 holds the length of the whole year.
pub(crate) const DAYS_BEFORE: [u32; 13] = [
    0,
    31,
    31 + 28,
    31 + 28 + 31,
    31 + 28 + 31 + 30,
    31 + 28 + 31 + 30 + 31,
    31 + 28 + 31 + 30 + 31 + 30,
    31 + 28 + 31 + 30 + 31 + 30 + 31,
    31 + 28 + 31 + 30 + 31 + 30 + 31 + 31,
    31 + 28 + 31 + 30 + 31 + 30 + 31 + 31 + 30,
    31 + 28 + 31 + 30 + 31 + 30 + 31 + 31 + 30 + 31,
    31 + 28 + 31 + 30 + 31 + 30 + 31 + 31 + 30 + 31 + 30,
    31 + 28 + 31 + 30 + 31 + 30 + 31 + 31 + 30 + 31 + 30 + 31,
];

/// Day of year (1-based) of February 29 in a leap year
pub(crate) const LEAP_DAY_ORDINAL: u32 = 31 + 29;

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i64 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i64 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i64 = 400;

pub(crate) const DAYS_PER_400_YEARS: u64 = 146_097;
pub(crate) const DAYS_PER_100_YEARS: u64 = 36_524;
pub(crate) const DAYS_PER_4_YEARS: u64 = 1_461;
pub(crate) const DAYS_PER_YEAR: u64 = 365;

/// Year of the absolute epoch used for unsigned cycle arithmetic.
/// Must be 1 mod 400; dates before it do not convert correctly.
pub(crate) const ABSOLUTE_ZERO_YEAR: i64 = -292_277_022_399;

/// Year of `Date(0)`
pub(crate) const INTERNAL_YEAR: i64 = 1;

/// Days from the absolute epoch to `Date(0)`
pub(crate) const INTERNAL_TO_ABSOLUTE: i64 =
    (INTERNAL_YEAR - ABSOLUTE_ZERO_YEAR) / GREGORIAN_CYCLE * DAYS_PER_400_YEARS as i64;

pub(crate) const LONG_MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub(crate) const SHORT_MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub(crate) const LONG_DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

pub(crate) const SHORT_DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Two-digit years at or above this pivot belong to the 1900s
pub(crate) const TWO_DIGIT_YEAR_PIVOT: i64 = 69;
