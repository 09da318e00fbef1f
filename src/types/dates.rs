use crate::error::LpoError;
use crate::types::observation::DATE_FORMAT;
use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct Year(pub i32);
impl Year {
    pub fn get(self) -> i32 {
        self.0
    }
}

impl Display for Year {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

impl From<NaiveDate> for Year {
    fn from(date: NaiveDate) -> Self {
        Year(date.year())
    }
}

/// An inclusive span of calendar days.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Every day in the span, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

impl Display for DateSpan {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Anything that names a single calendar date.
///
/// Conversion fails with [`LpoError::InvalidDate`] when the input does not
/// name a real day (for example the 31st of a 30-day month).
pub trait AnyDate {
    fn to_date(self) -> Result<NaiveDate, LpoError>;
}

impl AnyDate for NaiveDate {
    fn to_date(self) -> Result<NaiveDate, LpoError> {
        Ok(self)
    }
}

impl AnyDate for &str {
    fn to_date(self) -> Result<NaiveDate, LpoError> {
        NaiveDate::parse_from_str(self.trim(), DATE_FORMAT)
            .map_err(|_| LpoError::InvalidDate(self.to_string()))
    }
}

impl AnyDate for String {
    fn to_date(self) -> Result<NaiveDate, LpoError> {
        self.as_str().to_date()
    }
}

/// `(year, month, day)`, as entered in a form.
impl AnyDate for (i32, u32, u32) {
    fn to_date(self) -> Result<NaiveDate, LpoError> {
        let (year, month, day) = self;
        NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| LpoError::InvalidDate(format!("{year:04}-{month:02}-{day:02}")))
    }
}
