//! Parsing dates through compiled layouts.
//!
//! The parser walks the layout's instructions over borrowed slices of the
//! input. Strings are only copied when an error is built, so a successful
//! parse does not allocate.

use crate::consts::{
    DAYS_BEFORE, LEAP_DAY_ORDINAL, LONG_DAY_NAMES, LONG_MONTH_NAMES, SHORT_DAY_NAMES,
    SHORT_MONTH_NAMES, TWO_DIGIT_YEAR_PIVOT,
};
use crate::layout::{Instruction, Layout, Op};
use crate::types::{days_in_month, is_leap_year};
use crate::Date;

/// Why well-formed input does not name a valid date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidDate {
    #[error("month out of range")]
    MonthOutOfRange,
    #[error("day out of range")]
    DayOutOfRange,
    #[error("day-of-year out of range")]
    YearDayOutOfRange,
    #[error("day-of-year does not match month")]
    YearDayMonthMismatch,
    #[error("day-of-year does not match day")]
    YearDayDayMismatch,
    #[error("extra text: {0:?}")]
    ExtraText(String),
}

/// Error returned when text cannot be parsed with a layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The input does not have the shape the layout demands.
    #[error("parsing date {value:?} as {layout:?}: cannot parse {value_elem:?} as {layout_elem:?}")]
    Mismatch {
        layout: String,
        value: String,
        /// The layout element that failed to match
        layout_elem: String,
        /// The input remaining where matching failed
        value_elem: String,
    },

    /// The input matches the layout but does not name a valid date.
    #[error("parsing date {value:?}: {reason}")]
    Invalid {
        layout: String,
        value: String,
        reason: InvalidDate,
    },
}

impl ParseError {
    /// The layout pattern that was used.
    pub fn layout(&self) -> &str {
        match self {
            Self::Mismatch { layout, .. } | Self::Invalid { layout, .. } => layout,
        }
    }

    /// The complete input that failed to parse.
    pub fn value(&self) -> &str {
        match self {
            Self::Mismatch { value, .. } | Self::Invalid { value, .. } => value,
        }
    }

    /// The semantic failure, if the input was well-formed.
    pub const fn reason(&self) -> Option<&InvalidDate> {
        match self {
            Self::Mismatch { .. } => None,
            Self::Invalid { reason, .. } => Some(reason),
        }
    }
}

/// Remaining input. Every method returns `None` on a syntax mismatch and
/// leaves the input in an unspecified position.
struct Input<'a> {
    rest: &'a str,
}

impl<'a> Input<'a> {
    fn advance(&mut self, n: usize) -> Option<&'a str> {
        let head = self.rest.get(..n)?;
        self.rest = self.rest.get(n..)?;
        Some(head)
    }

    fn is_digit_at(&self, i: usize) -> bool {
        self.rest.as_bytes().get(i).is_some_and(u8::is_ascii_digit)
    }

    /// Matches a literal, treating a run of spaces in the literal as any run
    /// of spaces in the input.
    fn accept(&mut self, literal: &str) -> Option<()> {
        let mut lit = literal.as_bytes();
        let mut value = self.rest.as_bytes();
        while let Some((&c, lit_tail)) = lit.split_first() {
            if c == b' ' {
                if value.first().is_some_and(|&b| b != b' ') {
                    return None;
                }
                value = trim_spaces(value);
                lit = trim_spaces(lit_tail);
                continue;
            }
            match value.split_first() {
                Some((&b, value_tail)) if b == c => {
                    value = value_tail;
                    lit = lit_tail;
                }
                _ => return None,
            }
        }
        self.advance(self.rest.len() - value.len()).map(drop)
    }

    /// Skips `b` if the input starts with it.
    fn skip_byte(&mut self, b: u8) {
        if self.rest.as_bytes().first() == Some(&b) {
            self.rest = &self.rest[1..];
        }
    }

    /// Parses exactly the next `n` bytes as an integer.
    fn atoi(&mut self, n: usize) -> Option<i64> {
        let head = self.rest.get(..n)?;
        let value = head.parse().ok()?;
        self.advance(n)?;
        Some(value)
    }

    /// Parses 1 to `n` leading digits, or exactly `n` when `fixed`.
    fn digits(&mut self, n: usize, fixed: bool) -> Option<u32> {
        let mut value = 0;
        let mut i = 0;
        while i < n && self.is_digit_at(i) {
            value = value * 10 + u32::from(self.rest.as_bytes()[i] - b'0');
            i += 1;
        }
        if i == 0 || (fixed && i != n) {
            return None;
        }
        self.advance(i)?;
        Some(value)
    }

    /// Consumes the first name of `table` the input starts with, ignoring
    /// ASCII case, and returns its index.
    fn lookup(&mut self, table: &[&str]) -> Option<usize> {
        let bytes = self.rest.as_bytes();
        let index = table.iter().position(|name| {
            bytes
                .get(..name.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(name.as_bytes()))
        })?;
        self.advance(table[index].len())?;
        Some(index)
    }
}

fn trim_spaces(bytes: &[u8]) -> &[u8] {
    let n = bytes.iter().take_while(|&&b| b == b' ').count();
    &bytes[n..]
}

/// Fields collected while executing a layout.
#[derive(Debug, Default)]
struct Fields {
    year: i64,
    month: Option<u32>,
    day: Option<u32>,
    year_day: Option<u32>,
}

impl Fields {
    /// Resolves the collected fields into a date.
    fn resolve(self) -> Result<Date, InvalidDate> {
        let year = self.year;
        let (month, day) = match self.year_day {
            Some(year_day) => {
                let (m, d) = month_day_of_year(year, year_day)?;
                if self.month.is_some_and(|month| month != m) {
                    return Err(InvalidDate::YearDayMonthMismatch);
                }
                if self.day.is_some_and(|day| day != d) {
                    return Err(InvalidDate::YearDayDayMismatch);
                }
                (m, d)
            }
            None => (self.month.unwrap_or(1), self.day.unwrap_or(1)),
        };

        if day < 1 || day > days_in_month(year, month) {
            return Err(InvalidDate::DayOutOfRange);
        }
        Ok(Date::from_ymd(year, i64::from(month), i64::from(day)))
    }
}

/// Month and day of the 1-based `year_day` of `year`.
fn month_day_of_year(year: i64, year_day: u32) -> Result<(u32, u32), InvalidDate> {
    let mut year_day = year_day;
    if is_leap_year(year) {
        if year_day == LEAP_DAY_ORDINAL {
            return Ok((2, 29));
        }
        if year_day > LEAP_DAY_ORDINAL {
            year_day -= 1;
        }
    }
    if !(1..=365).contains(&year_day) {
        return Err(InvalidDate::YearDayOutOfRange);
    }

    let mut month = (year_day - 1) / 31 + 1;
    if DAYS_BEFORE[month as usize] < year_day {
        month += 1;
    }
    Ok((month, year_day - DAYS_BEFORE[month as usize - 1]))
}

/// Outcome of a single instruction.
enum Step {
    Continue,
    Mismatch,
    Invalid(InvalidDate),
}

impl From<Option<()>> for Step {
    fn from(matched: Option<()>) -> Self {
        matched.map_or(Self::Mismatch, |()| Self::Continue)
    }
}

impl Layout {
    /// Parses `text` according to this layout.
    ///
    /// Fields missing from the layout default to year 0, January, and the
    /// first of the month. A two-digit year `NN` means 19NN when `NN >= 69`
    /// and 20NN otherwise. Weekday names are checked for syntax only; the
    /// weekday of the result is not compared with them.
    ///
    /// # Errors
    /// Returns [`ParseError::Mismatch`] when `text` does not match the layout
    /// and [`ParseError::Invalid`] when it names an invalid date.
    pub fn parse(&self, text: &str) -> Result<Date, ParseError> {
        let mut input = Input { rest: text };
        let mut fields = Fields::default();

        for inst in self.instructions() {
            let before = input.rest;
            match self.step(*inst, &mut input, &mut fields) {
                Step::Continue => {}
                Step::Mismatch => return Err(self.mismatch(*inst, text, before)),
                Step::Invalid(reason) => return Err(self.invalid(text, reason)),
            }
        }
        if !input.rest.is_empty() {
            return Err(self.invalid(text, InvalidDate::ExtraText(input.rest.to_owned())));
        }

        fields.resolve().map_err(|reason| self.invalid(text, reason))
    }

    fn step(&self, inst: Instruction, input: &mut Input<'_>, fields: &mut Fields) -> Step {
        let op = match inst {
            Instruction::Literal { start, end } => {
                return input.accept(self.literal(start, end)).into();
            }
            Instruction::Op(op) => op,
        };

        match op {
            Op::Year => input
                .atoi(2)
                .map(|year| {
                    fields.year = if year >= TWO_DIGIT_YEAR_PIVOT {
                        year + 1900
                    } else {
                        year + 2000
                    };
                })
                .into(),
            Op::LongYear | Op::UnderLongYear => {
                if op == Op::UnderLongYear && input.accept("_").is_none() {
                    return Step::Mismatch;
                }
                if !input.is_digit_at(0) {
                    return Step::Mismatch;
                }
                input.atoi(4).map(|year| fields.year = year).into()
            }
            Op::Month => lookup_month(input, &SHORT_MONTH_NAMES, fields),
            Op::LongMonth => lookup_month(input, &LONG_MONTH_NAMES, fields),
            Op::NumMonth | Op::ZeroMonth => match input.digits(2, op == Op::ZeroMonth) {
                None => Step::Mismatch,
                Some(month) if !(1..=12).contains(&month) => {
                    Step::Invalid(InvalidDate::MonthOutOfRange)
                }
                Some(month) => {
                    fields.month = Some(month);
                    Step::Continue
                }
            },
            // weekday names are checked for syntax and otherwise ignored
            Op::Weekday => input.lookup(&SHORT_DAY_NAMES).map(drop).into(),
            Op::LongWeekday => input.lookup(&LONG_DAY_NAMES).map(drop).into(),
            Op::Day | Op::ZeroDay | Op::UnderDay => {
                if op == Op::UnderDay {
                    input.skip_byte(b' ');
                }
                input
                    .digits(2, op == Op::ZeroDay)
                    .map(|day| fields.day = Some(day))
                    .into()
            }
            Op::ZeroYearDay | Op::UnderYearDay => {
                if op == Op::UnderYearDay {
                    input.skip_byte(b' ');
                    input.skip_byte(b' ');
                }
                input
                    .digits(3, op == Op::ZeroYearDay)
                    .map(|year_day| fields.year_day = Some(year_day))
                    .into()
            }
        }
    }

    fn mismatch(&self, inst: Instruction, text: &str, rest: &str) -> ParseError {
        let layout_elem = match inst {
            Instruction::Literal { start, end } => self.literal(start, end),
            Instruction::Op(op) => op.token(),
        };
        ParseError::Mismatch {
            layout: self.pattern().to_owned(),
            value: text.to_owned(),
            layout_elem: layout_elem.to_owned(),
            value_elem: rest.to_owned(),
        }
    }

    fn invalid(&self, text: &str, reason: InvalidDate) -> ParseError {
        ParseError::Invalid {
            layout: self.pattern().to_owned(),
            value: text.to_owned(),
            reason,
        }
    }
}

fn lookup_month(input: &mut Input<'_>, table: &[&str], fields: &mut Fields) -> Step {
    input
        .lookup(table)
        .map(|index| fields.month = Some(index as u32 + 1))
        .into()
}
