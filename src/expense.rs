//! Defines the expense record and the validation of each of its fields.
//!
//! All user input, whether typed at a prompt, passed as a command line flag
//! or read back from the expense file, goes through the `parse_*` functions
//! in this module.

use std::{fmt::Display, ops::RangeInclusive, str::FromStr};

use serde::{Serialize, Serializer};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{Error, range::YearMonth};

const DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[day padding:none]-[month padding:none]-[year]");

/// What an expense was spent on.
///
/// Each category is identified by a number from 1 to 6, which is what the
/// user enters and what is stored in the expense file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    /// Food and household supplies.
    Groceries = 1,
    /// Going out, subscriptions, hobbies.
    Entertainment = 2,
    /// Transport and holidays.
    Travel = 3,
    /// Clothes, electronics and other purchases.
    Shopping = 4,
    /// Rent, utilities, insurance.
    Bills = 5,
    /// Money put aside.
    Investments = 6,
}

impl Category {
    /// Every category, ordered by code.
    pub const ALL: [Category; 6] = [
        Category::Groceries,
        Category::Entertainment,
        Category::Travel,
        Category::Shopping,
        Category::Bills,
        Category::Investments,
    ];

    /// The number that identifies the category.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Get the category for a code from 1 to 6.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.code() == code)
    }

    /// The display name of the category.
    pub fn name(self) -> &'static str {
        match self {
            Category::Groceries => "Groceries",
            Category::Entertainment => "Entertainment",
            Category::Travel => "Travel",
            Category::Shopping => "Shopping",
            Category::Bills => "Bills",
            Category::Investments => "Investments",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_category(s)
    }
}

/// Parse a category from its code (1 to 6) or its name.
///
/// Names are matched without regard to case.
///
/// # Errors
///
/// Returns [Error::InvalidCategory] for anything else, including codes
/// outside 1 to 6 and decimals such as "1.1".
pub fn parse_category(text: &str) -> Result<Category, Error> {
    let trimmed = text.trim();

    let category = match trimmed.parse::<u8>() {
        Ok(code) => Category::from_code(code),
        Err(_) => Category::ALL
            .into_iter()
            .find(|category| category.name().eq_ignore_ascii_case(trimmed)),
    };

    category.ok_or_else(|| Error::InvalidCategory(text.to_owned()))
}

/// Parse a date written as DD-MM-YYYY.
///
/// Day and month may have one or two digits and the year must have four, so
/// "05-03-2024" and "5-3-2024" are the same date.
///
/// # Errors
///
/// Returns [Error::InvalidDate] if the text is not in that format or is not a
/// real calendar date (e.g. "31-04-2024").
pub fn parse_date(text: &str) -> Result<Date, Error> {
    let trimmed = text.trim();

    if !has_digit_fields(trimmed, &[1..=2, 1..=2, 4..=4]) {
        return Err(Error::InvalidDate(text.to_owned()));
    }

    Date::parse(trimmed, DATE_FORMAT).map_err(|error| {
        tracing::debug!("could not parse date \"{text}\": {error}");
        Error::InvalidDate(text.to_owned())
    })
}

/// Parse a month written as MM-YYYY, e.g. "03-2024" or "3-2024".
///
/// # Errors
///
/// Returns [Error::InvalidMonth] if the text is not in that format or the
/// month is not between 01 and 12.
pub fn parse_month(text: &str) -> Result<YearMonth, Error> {
    let trimmed = text.trim();

    if !has_digit_fields(trimmed, &[1..=2, 4..=4]) {
        return Err(Error::InvalidMonth(text.to_owned()));
    }

    Date::parse(&format!("01-{trimmed}"), DATE_FORMAT)
        .map(YearMonth::of)
        .map_err(|_| Error::InvalidMonth(text.to_owned()))
}

/// Parse a four digit year, e.g. "2024".
///
/// # Errors
///
/// Returns [Error::InvalidYear] if the text is not four digits or is "0000".
pub fn parse_year(text: &str) -> Result<i32, Error> {
    let trimmed = text.trim();

    if !has_digit_fields(trimmed, &[4..=4]) {
        return Err(Error::InvalidYear(text.to_owned()));
    }

    match trimmed.parse::<i32>() {
        Ok(year) if year >= 1 => Ok(year),
        _ => Err(Error::InvalidYear(text.to_owned())),
    }
}

/// Parse an amount of money.
///
/// # Errors
///
/// Returns [Error::InvalidAmount] if the text is not a number, or the number
/// is not finite or not greater than zero.
pub fn parse_amount(text: &str) -> Result<f64, Error> {
    match text.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(Error::InvalidAmount(text.to_owned())),
    }
}

/// Format a date as DD-MM-YYYY, the format dates are entered and stored in.
pub fn format_date(date: Date) -> String {
    format!(
        "{:02}-{:02}-{:04}",
        date.day(),
        date.month() as u8,
        date.year()
    )
}

/// Checks that `text` is made of dash separated fields of ASCII digits, one
/// per entry in `widths`, each with a digit count within its width.
fn has_digit_fields(text: &str, widths: &[RangeInclusive<usize>]) -> bool {
    let fields: Vec<&str> = text.split('-').collect();

    fields.len() == widths.len()
        && fields.iter().zip(widths).all(|(field, width)| {
            width.contains(&field.len()) && field.bytes().all(|byte| byte.is_ascii_digit())
        })
}

/// A validated, non-empty description of an expense.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Hash)]
pub struct ExpenseTitle(String);

impl ExpenseTitle {
    /// Create an expense title.
    ///
    /// Leading and trailing whitespace is removed.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyTitle] if `title` is empty
    /// or only whitespace.
    pub fn new(title: &str) -> Result<Self, Error> {
        let title = title.trim();

        if title.is_empty() {
            Err(Error::EmptyTitle)
        } else {
            Ok(Self(title.to_owned()))
        }
    }
}

impl AsRef<str> for ExpenseTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ExpenseTitle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExpenseTitle::new(s)
    }
}

impl Display for ExpenseTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single expense, i.e. money spent on something on a given day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expense {
    /// What the money was spent on.
    pub title: ExpenseTitle,
    /// The category of the expense.
    pub category: Category,
    /// When the money was spent.
    #[serde(serialize_with = "serialize_date")]
    pub date: Date,
    /// How much was spent, always greater than zero.
    pub amount: f64,
}

impl Expense {
    /// Create a new expense.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidAmount] if `amount` is not finite or not greater
    /// than zero.
    pub fn new(
        title: ExpenseTitle,
        category: Category,
        date: Date,
        amount: f64,
    ) -> Result<Self, Error> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(Error::InvalidAmount(amount.to_string()));
        }

        Ok(Self {
            title,
            category,
            date,
            amount,
        })
    }

    /// Create an expense from raw text fields, validating each of them.
    ///
    /// # Errors
    ///
    /// Returns the error for the first field that fails validation, checked
    /// in the order title, category, date, amount.
    pub fn parse(title: &str, category: &str, date: &str, amount: &str) -> Result<Self, Error> {
        Expense::new(
            ExpenseTitle::new(title)?,
            parse_category(category)?,
            parse_date(date)?,
            parse_amount(amount)?,
        )
    }
}

fn serialize_date<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_date(*date))
}
