//! Expense Tracker is a command line tool for keeping a personal log of
//! expenses.
//!
//! Expenses are stored as rows of a flat CSV file. This library provides the
//! validation, storage, filtering, aggregation and charting used by the
//! `expense_tracker` binary, as well as the interactive menu it presents.

#![warn(missing_docs)]

mod aggregation;
mod charts;
mod config;
mod currency;
mod expense;
mod filter;
mod logging;
mod menu;
mod prompt;
mod range;
mod store;
mod table;

pub use aggregation::{
    Bucket, Interval, bucket_totals, share_labels, totals_by_category, totals_by_month,
};
pub use charts::{
    CategoryBreakdown, ChartWriter, bar_chart, bar_chart_title, category_months_pie_chart,
    category_months_title, category_pie_chart, render_chart_page,
};
pub use config::{Config, DEFAULT_CHART_DIR, DEFAULT_DATA_FILE};
pub use currency::format_currency;
pub use expense::{
    Category, Expense, ExpenseTitle, format_date, parse_amount, parse_category, parse_date,
    parse_month, parse_year,
};
pub use filter::{ExpenseFilter, filter_expenses};
pub use logging::setup_logging;
pub use menu::run_interactive;
pub use prompt::{Prompter, capitalise_first_char};
pub use range::{DateRange, YearMonth, month_name, year_range};
pub use store::ExpenseStore;
pub use table::expense_table;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The text could not be read as one of the six expense categories.
    #[error("\"{0}\" is not a valid category, enter a number between 1 and 6")]
    InvalidCategory(String),

    /// The text is not a real calendar date in the format DD-MM-YYYY.
    #[error("\"{0}\" is not a valid date, enter the date as DD-MM-YYYY")]
    InvalidDate(String),

    /// The text is not a month in the format MM-YYYY.
    #[error("\"{0}\" is not a valid month, enter the month as MM-YYYY")]
    InvalidMonth(String),

    /// The text is not a four digit year.
    #[error("\"{0}\" is not a valid year, enter the year as YYYY")]
    InvalidYear(String),

    /// The text is not a positive, finite amount of money.
    #[error("\"{0}\" is not a valid amount, enter a number greater than zero")]
    InvalidAmount(String),

    /// An empty string was used to create an expense title.
    #[error("expense title cannot be empty")]
    EmptyTitle,

    /// The user picked an option that is not on the menu.
    ///
    /// Holds the raw input and the number of options on the menu.
    #[error("\"{0}\" is not an option, enter a number between 1 and {1}")]
    InvalidOption(String, usize),

    /// The answer to a yes/no question was neither yes nor no.
    #[error("\"{0}\" is not an option, enter Y or N")]
    InvalidConfirmation(String),

    /// A row index that does not refer to an expense in the file.
    #[error("there is no expense with the number {index}, the file has {len} expense(s)")]
    RowOutOfRange {
        /// The requested row index.
        index: usize,
        /// The number of expenses in the file.
        len: usize,
    },

    /// The text could not be read as a row index.
    #[error("\"{0}\" is not a valid expense number")]
    InvalidRowIndex(String),

    /// The expense file had issues that prevented it from being parsed.
    ///
    /// Callers should pass the 1-based line number and a description of the
    /// problem.
    #[error("could not parse line {0} of the expense file: {1}")]
    InvalidCSV(u64, String),

    /// An unexpected IO error, including errors from the CSV reader and
    /// writer that are not caused by the file contents.
    #[error("an IO error occurred: {0}")]
    Io(String),

    /// A chart could not be written.
    #[error("could not write chart: {0}")]
    ChartError(String),
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        tracing::error!("an unhandled IO error occurred: {}", value);
        Error::Io(value.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        let line = value.position().map(|position| position.line());

        match (value.kind(), line) {
            (csv::ErrorKind::Io(_), _) => {
                tracing::error!("an unhandled CSV IO error occurred: {}", value);
                Error::Io(value.to_string())
            }
            (_, Some(line)) => Error::InvalidCSV(line, value.to_string()),
            (_, None) => Error::InvalidCSV(0, value.to_string()),
        }
    }
}
