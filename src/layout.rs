//! Layout compilation.
//!
//! A layout is written in terms of the reference date, Monday, January 2,
//! 2006. Every recognized rendition of one of its fields becomes an operator;
//! everything else is literal text:
//!
//! | Field        | Tokens                       |
//! |--------------|------------------------------|
//! | Year         | `2006` `_2006` `06`          |
//! | Month        | `January` `Jan` `01` `1`     |
//! | Weekday      | `Monday` `Mon`               |
//! | Day of month | `2` `_2` `02`                |
//! | Day of year  | `__2` `002`                  |
//!
//! Clock and zone tokens of the reference time (`15`, `04`, `PM`, `MST`, ...)
//! are not recognized and end up in literals.

use std::borrow::Cow;
use std::sync::Arc;

use crate::cache::{Cache, Sizer};
use crate::consts::{DEFAULT_CACHE_SIZE, LAYOUT, RFC822, RFC1123, RFC3339};
use crate::parse::ParseError;
use crate::prelude::*;
use crate::Date;

/// A formatting operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// `January`
    LongMonth,
    /// `Jan`
    Month,
    /// `Monday`
    LongWeekday,
    /// `Mon`
    Weekday,
    /// `002`
    ZeroYearDay,
    /// `01`
    ZeroMonth,
    /// `02`
    ZeroDay,
    /// `06`
    Year,
    /// `1`
    NumMonth,
    /// `2006`
    LongYear,
    /// `2`
    Day,
    /// `_2006`
    UnderLongYear,
    /// `_2`
    UnderDay,
    /// `__2`
    UnderYearDay,
}

struct Token {
    text: &'static str,
    /// The token must not be followed by a lower-case letter ("Mon" in "Month").
    ends_word: bool,
    op: Op,
}

const fn token(text: &'static str, ends_word: bool, op: Op) -> Token {
    Token {
        text,
        ends_word,
        op,
    }
}

/// Operator tokens in matching priority. Several tokens are prefixes or
/// substrings of others, so this order decides what a layout means. Do not
/// reorder.
const TOKENS: [Token; 14] = [
    token("January", false, Op::LongMonth),
    token("Jan", true, Op::Month),
    token("Monday", false, Op::LongWeekday),
    token("Mon", true, Op::Weekday),
    token("002", false, Op::ZeroYearDay),
    token("01", false, Op::ZeroMonth),
    token("02", false, Op::ZeroDay),
    token("06", false, Op::Year),
    token("1", false, Op::NumMonth),
    token("2006", false, Op::LongYear),
    token("2", false, Op::Day),
    token("_2006", false, Op::UnderLongYear),
    token("_2", false, Op::UnderDay),
    token("__2", false, Op::UnderYearDay),
];

impl Op {
    /// Returns the layout text of this operator.
    pub const fn token(self) -> &'static str {
        match self {
            Self::LongMonth => "January",
            Self::Month => "Jan",
            Self::LongWeekday => "Monday",
            Self::Weekday => "Mon",
            Self::ZeroYearDay => "002",
            Self::ZeroMonth => "01",
            Self::ZeroDay => "02",
            Self::Year => "06",
            Self::NumMonth => "1",
            Self::LongYear => "2006",
            Self::Day => "2",
            Self::UnderLongYear => "_2006",
            Self::UnderDay => "_2",
            Self::UnderYearDay => "__2",
        }
    }
}

/// One step of a compiled layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// Literal text, as the byte range `start..end` of the layout pattern
    Literal { start: usize, end: usize },
    Op(Op),
}

/// A compiled layout: the pattern text and the instructions it compiles to.
///
/// Compiling never fails. A pattern without any operator formats as itself
/// and parses only itself.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display(fmt = "{pattern}")]
pub struct Layout {
    pattern: Cow<'static, str>,
    program: Cow<'static, [Instruction]>,
}

/// `RFC3339`, compiled ahead of time for `Display` and `FromStr` of [`Date`].
pub(crate) static ISO: Layout = Layout::precompiled(
    RFC3339,
    &[
        Instruction::Op(Op::LongYear),
        Instruction::Literal { start: 4, end: 5 },
        Instruction::Op(Op::ZeroMonth),
        Instruction::Literal { start: 7, end: 8 },
        Instruction::Op(Op::ZeroDay),
    ],
);

static NUMERIC: Layout = Layout::precompiled(
    LAYOUT,
    &[
        Instruction::Op(Op::ZeroMonth),
        Instruction::Literal { start: 2, end: 3 },
        Instruction::Op(Op::ZeroDay),
        Instruction::Literal { start: 5, end: 7 },
        Instruction::Op(Op::Year),
    ],
);

static SHORT_YEAR: Layout = Layout::precompiled(
    RFC822,
    &[
        Instruction::Op(Op::ZeroDay),
        Instruction::Literal { start: 2, end: 3 },
        Instruction::Op(Op::Month),
        Instruction::Literal { start: 6, end: 7 },
        Instruction::Op(Op::Year),
    ],
);

static LONG_YEAR: Layout = Layout::precompiled(
    RFC1123,
    &[
        Instruction::Op(Op::ZeroDay),
        Instruction::Literal { start: 2, end: 3 },
        Instruction::Op(Op::Month),
        Instruction::Literal { start: 6, end: 7 },
        Instruction::Op(Op::LongYear),
    ],
);

impl Layout {
    const fn precompiled(pattern: &'static str, program: &'static [Instruction]) -> Self {
        Self {
            pattern: Cow::Borrowed(pattern),
            program: Cow::Borrowed(program),
        }
    }

    /// Returns the ahead-of-time compiled layout for one of the predefined
    /// patterns ([`LAYOUT`], [`RFC822`], [`RFC1123`], [`RFC3339`]).
    pub fn predefined(pattern: &str) -> Option<&'static Self> {
        [&ISO, &NUMERIC, &SHORT_YEAR, &LONG_YEAR]
            .into_iter()
            .find(|layout| layout.pattern() == pattern)
    }

    /// Compiles `pattern` into a layout.
    pub fn compile(pattern: &str) -> Self {
        let bytes = pattern.as_bytes();
        let mut program = Vec::new();
        let mut literal_start = 0;
        let mut i = 0;

        while i < bytes.len() {
            match next_op(&bytes[i..]) {
                Some((op, len)) => {
                    if literal_start < i {
                        program.push(Instruction::Literal {
                            start: literal_start,
                            end: i,
                        });
                    }
                    program.push(Instruction::Op(op));
                    i += len;
                    literal_start = i;
                }
                None => i += 1,
            }
        }
        if literal_start < bytes.len() {
            program.push(Instruction::Literal {
                start: literal_start,
                end: bytes.len(),
            });
        }

        Self {
            pattern: Cow::Owned(pattern.to_owned()),
            program: Cow::Owned(program),
        }
    }

    /// Returns the pattern this layout was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the compiled instructions.
    pub fn instructions(&self) -> &[Instruction] {
        &self.program
    }

    /// Returns the text of a literal instruction.
    pub(crate) fn literal(&self, start: usize, end: usize) -> &str {
        // Literal bounds always fall on ASCII token boundaries.
        self.pattern.get(start..end).unwrap_or_default()
    }
}

impl Sizer for Layout {}

/// Returns the operator at the start of `rest` and its length in bytes.
fn next_op(rest: &[u8]) -> Option<(Op, usize)> {
    TOKENS.iter().find_map(|token| {
        let suffix = rest.strip_prefix(token.text.as_bytes())?;
        if token.ends_word && suffix.first().is_some_and(u8::is_ascii_lowercase) {
            return None;
        }
        Some((token.op, token.text.len()))
    })
}

/// A bounded, thread-safe cache of compiled layouts keyed by pattern.
///
/// Format and parse calls through the cache compile each distinct pattern
/// once. The cache is owned by the caller; share it behind a reference or an
/// `Arc` across threads.
#[derive(Debug)]
pub struct LayoutCache {
    cache: Cache<String, Arc<Layout>>,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    /// Creates a cache holding up to [`DEFAULT_CACHE_SIZE`] layouts.
    pub fn new() -> Self {
        Self::with_max_size(DEFAULT_CACHE_SIZE)
    }

    /// Creates a cache holding up to `max_size` layouts.
    pub fn with_max_size(max_size: u64) -> Self {
        Self {
            cache: Cache::with_max_size(max_size),
        }
    }

    /// Returns the compiled layout for `pattern`, compiling it on first use.
    pub fn get(&self, pattern: &str) -> Arc<Layout> {
        self.cache.get(pattern, |pattern| {
            log::debug!("compiling date layout {pattern:?}");
            Arc::new(Layout::compile(pattern))
        })
    }

    /// Formats `date` according to `pattern`.
    pub fn format(&self, date: Date, pattern: &str) -> String {
        self.get(pattern).format(date)
    }

    /// Appends `date`, formatted according to `pattern`, to `buf`.
    pub fn append_format(&self, date: Date, pattern: &str, buf: &mut String) {
        self.get(pattern).append_format(date, buf);
    }

    /// Parses `text` according to `pattern`.
    ///
    /// # Errors
    /// Returns [`ParseError`] if `text` does not match the layout or names an
    /// invalid date.
    pub fn parse(&self, pattern: &str, text: &str) -> Result<Date, ParseError> {
        self.get(pattern).parse(text)
    }

    /// Drops the compiled layout for `pattern`, if cached.
    pub fn evict(&self, pattern: &str) {
        self.cache.evict(pattern);
    }

    /// Drops every compiled layout.
    pub fn flush(&self) {
        self.cache.flush();
    }

    /// Number of cached layouts.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Reports whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
