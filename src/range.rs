//! Calendar ranges used to select expenses: inclusive date ranges, months and
//! years.

use std::fmt::Display;

use time::{Date, Month};

/// An inclusive range of dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// The first day in the range.
    pub start: Date,
    /// The last day in the range.
    pub end: Date,
}

impl DateRange {
    /// Create a range from `start` to `end`, both inclusive.
    ///
    /// A range whose start is after its end is allowed and contains no dates.
    pub fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    /// Whether `date` falls within the range.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

/// A calendar month of a specific year, e.g. March 2024.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    /// The year.
    pub year: i32,
    /// The month of the year.
    pub month: Month,
}

impl YearMonth {
    /// Create a month of `year`.
    pub fn new(year: i32, month: Month) -> Self {
        Self { year, month }
    }

    /// The month that `date` falls in.
    pub fn of(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The range from the first to the last day of the month.
    ///
    /// The range is empty if the year is outside what [Date] supports.
    pub fn range(self) -> DateRange {
        bounds(self.year, self.month, self.month)
    }
}

/// Formats as `MM-YYYY`, the same format the month is entered in.
impl Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}-{:04}", self.month as u8, self.year)
    }
}

/// The range from 1 January to 31 December of `year`.
///
/// The range is empty if `year` is outside what [Date] supports.
pub fn year_range(year: i32) -> DateRange {
    bounds(year, Month::January, Month::December)
}

/// The full English name of `month`.
pub fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "January",
        Month::February => "February",
        Month::March => "March",
        Month::April => "April",
        Month::May => "May",
        Month::June => "June",
        Month::July => "July",
        Month::August => "August",
        Month::September => "September",
        Month::October => "October",
        Month::November => "November",
        Month::December => "December",
    }
}

pub(crate) fn month_abbrev(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

/// Formats `date` like "05 Mar, 2024".
pub(crate) fn format_date_label(date: Date) -> String {
    format!(
        "{:02} {}, {}",
        date.day(),
        month_abbrev(date.month()),
        date.year()
    )
}

/// Contains no dates, since it starts after it ends.
const EMPTY_RANGE: DateRange = DateRange {
    start: Date::MAX,
    end: Date::MIN,
};

/// The range from the first day of `first` to the last day of `last` in
/// `year`, or [EMPTY_RANGE] if `time` cannot represent dates in `year`.
fn bounds(year: i32, first: Month, last: Month) -> DateRange {
    let start = Date::from_calendar_date(year, first, 1);
    let end = Date::from_calendar_date(year, last, last.length(year));

    match (start, end) {
        (Ok(start), Ok(end)) => DateRange { start, end },
        _ => {
            tracing::debug!("Year {year} is out of range, no dates will match");
            EMPTY_RANGE
        }
    }
}
