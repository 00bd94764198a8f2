//! Calendar-date arithmetic shared by the query engine and the CLI.
//!
//! Everything here works on `NaiveDate`: due dates carry no time component,
//! and "today" is the local calendar date.

use chrono::{Datelike, Days, Local, NaiveDate};
use std::fmt;

use crate::error::CoreError;

const DATE_FORMAT: &str = "%Y-%m-%d";

const MONTH_NAMES: [&str; 12] = [
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

/// The caller's local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| CoreError::InvalidDate(raw.trim().to_string()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// `date + days`, saturating at the end of chrono's range.
pub fn add_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}

/// Whether `date` falls in `[start, start + days]`, both ends included.
pub fn within_days(date: NaiveDate, start: NaiveDate, days: u32) -> bool {
    date >= start && date <= add_days(start, days)
}

/// A calendar month, as shown by the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, CoreError> {
        let invalid = || CoreError::InvalidMonth(format!("{year:04}-{month:02}"));
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(invalid());
        }
        let ym = Self { year, month };
        // Navigation must stay inside chrono's range.
        if ym.succ().checked_first_day().is_none() || ym.pred().checked_first_day().is_none() {
            return Err(invalid());
        }
        Ok(ym)
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parse `YYYY-MM`.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let invalid = || CoreError::InvalidMonth(raw.trim().to_string());
        let (y, m) = raw.trim().split_once('-').ok_or_else(invalid)?;
        let year = y.parse::<i32>().map_err(|_| invalid())?;
        let month = m.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn first_day(self) -> NaiveDate {
        // Checked in the constructors.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    fn checked_first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn days_in_month(self) -> u32 {
        (28..=31)
            .rev()
            .find(|&day| self.day(day).is_some())
            .unwrap_or(28)
    }

    /// Blank cells before the 1st in a Monday-first week.
    pub fn leading_blanks(self) -> u32 {
        self.first_day().weekday().num_days_from_monday()
    }

    pub fn day(self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn succ(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn pred(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Header text, e.g. "March 2025".
    pub fn title(self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
