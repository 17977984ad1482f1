//! Rendering dates through compiled layouts.

use std::fmt::{self, Write};

use crate::calendar::{civil, to_absolute};
use crate::layout::{Instruction, Layout, Op};
use crate::types::Month;
use crate::Date;

/// A date paired with a layout, formatted when displayed.
///
/// Returned by [`Layout::display`]; nothing is rendered until the value is
/// written somewhere.
#[derive(Debug, Clone, Copy)]
pub struct Formatted<'a> {
    layout: &'a Layout,
    date: Date,
}

impl fmt::Display for Formatted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.width().is_some() {
            f.pad(&self.layout.format(self.date))
        } else {
            self.layout.write_to(self.date, f)
        }
    }
}

impl Layout {
    /// Returns `date` rendered according to this layout.
    pub fn format(&self, date: Date) -> String {
        let mut buf = String::with_capacity(self.pattern().len() + 10);
        self.append_format(date, &mut buf);
        buf
    }

    /// Appends `date`, rendered according to this layout, to `buf`.
    pub fn append_format(&self, date: Date, buf: &mut String) {
        // writing to a String cannot fail
        let _ = self.write_to(date, buf);
    }

    /// Returns a value that renders `date` according to this layout when
    /// displayed.
    pub const fn display(&self, date: Date) -> Formatted<'_> {
        Formatted { layout: self, date }
    }

    /// Writes `date` according to this layout.
    ///
    /// # Errors
    /// Returns an error only if `w` fails.
    pub fn write_to<W: Write + ?Sized>(&self, date: Date, w: &mut W) -> fmt::Result {
        let c = civil(to_absolute(date.days()));
        let year_day = c.year_day0 + 1;
        // Civil always yields a month in 1..=12.
        let month = Month::new(c.month).unwrap_or(Month::January);

        for inst in self.instructions() {
            match *inst {
                Instruction::Literal { start, end } => w.write_str(self.literal(start, end))?,
                Instruction::Op(op) => match op {
                    Op::Year => write!(w, "{:02}", (c.year % 100).unsigned_abs())?,
                    Op::LongYear | Op::UnderLongYear => {
                        if op == Op::UnderLongYear {
                            w.write_char('_')?;
                        }
                        if c.year < 0 {
                            w.write_char('-')?;
                        }
                        write!(w, "{:04}", c.year.unsigned_abs())?;
                    }
                    Op::Month => w.write_str(month.short_name())?,
                    Op::LongMonth => w.write_str(month.name())?,
                    Op::NumMonth => write!(w, "{}", c.month)?,
                    Op::ZeroMonth => write!(w, "{:02}", c.month)?,
                    Op::Weekday => w.write_str(date.weekday().short_name())?,
                    Op::LongWeekday => w.write_str(date.weekday().name())?,
                    Op::Day => write!(w, "{}", c.day)?,
                    Op::UnderDay => write!(w, "{:>2}", c.day)?,
                    Op::ZeroDay => write!(w, "{:02}", c.day)?,
                    Op::UnderYearDay => write!(w, "{year_day:>3}")?,
                    Op::ZeroYearDay => write!(w, "{year_day:03}")?,
                },
            }
        }
        Ok(())
    }
}
