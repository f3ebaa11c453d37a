//! Expense aggregation for charts.
//!
//! Provides functions to total expenses by week, month, category and month of
//! the year, and to label the shares of a total.

use std::collections::BTreeMap;

use time::{Date, Month, macros::date};

use crate::expense::{Category, Expense};

/// Weeks are counted from this Monday.
const WEEK_EPOCH: Date = date!(1900 - 01 - 01);

/// The length of time that expenses are grouped by in a bar chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    /// Monday to Sunday.
    Week,
    /// A calendar month.
    Month,
}

impl Interval {
    /// The name used in chart titles, e.g. "Week".
    pub fn label(self) -> &'static str {
        match self {
            Interval::Week => "Week",
            Interval::Month => "Month",
        }
    }

    fn bucket_key(self, date: Date) -> i64 {
        match self {
            Interval::Week => (date - WEEK_EPOCH).whole_days().div_euclid(7),
            Interval::Month => date.year() as i64 * 12 + date.month() as i64,
        }
    }
}

/// The total spent during one interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket {
    /// The date of the earliest expense in the interval.
    pub first_date: Date,
    /// The sum of the amounts of the expenses in the interval.
    pub total: f64,
}

/// Totals expenses by week or month.
///
/// # Returns
/// One bucket per interval that has at least one expense, in chronological
/// order. Intervals without expenses are skipped.
pub fn bucket_totals<'a>(
    expenses: impl IntoIterator<Item = &'a Expense>,
    interval: Interval,
) -> Vec<Bucket> {
    let mut buckets: BTreeMap<i64, Bucket> = BTreeMap::new();

    for expense in expenses {
        let bucket = buckets
            .entry(interval.bucket_key(expense.date))
            .or_insert(Bucket {
                first_date: expense.date,
                total: 0.0,
            });

        bucket.first_date = bucket.first_date.min(expense.date);
        bucket.total += expense.amount;
    }

    buckets.into_values().collect()
}

/// Totals expenses by category.
///
/// # Returns
/// Pairs of category and total, ordered by category code. Categories without
/// expenses are omitted.
pub fn totals_by_category<'a>(
    expenses: impl IntoIterator<Item = &'a Expense>,
) -> Vec<(Category, f64)> {
    let mut totals: BTreeMap<Category, f64> = BTreeMap::new();

    for expense in expenses {
        *totals.entry(expense.category).or_insert(0.0) += expense.amount;
    }

    totals.into_iter().collect()
}

/// Totals expenses by the month of the year they fall in, regardless of year.
///
/// # Returns
/// Pairs of month and total in calendar order. Months without expenses are
/// omitted.
pub fn totals_by_month<'a>(expenses: impl IntoIterator<Item = &'a Expense>) -> Vec<(Month, f64)> {
    let mut totals: BTreeMap<u8, f64> = BTreeMap::new();

    for expense in expenses {
        *totals.entry(expense.date.month() as u8).or_insert(0.0) += expense.amount;
    }

    totals
        .into_iter()
        .filter_map(|(number, total)| Month::try_from(number).ok().map(|month| (month, total)))
        .collect()
}

/// Labels each share of a total with its percentage, e.g. "Groceries, 42.0 %".
pub fn share_labels<L: AsRef<str>>(totals: &[(L, f64)]) -> Vec<String> {
    let sum: f64 = totals.iter().map(|(_, total)| total).sum();

    totals
        .iter()
        .map(|(label, total)| {
            let percent = if sum > 0.0 { total / sum * 100.0 } else { 0.0 };
            format!("{}, {:.1} %", label.as_ref(), percent)
        })
        .collect()
}
