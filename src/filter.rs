//! Selecting expenses by date, month, year, date window or category.

use time::Date;

use crate::{
    expense::{Category, Expense},
    range::{DateRange, YearMonth, year_range},
};

/// A predicate over expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseFilter {
    /// Expenses on exactly this date.
    Date(Date),
    /// Expenses within this month.
    Month(YearMonth),
    /// Expenses within this year.
    Year(i32),
    /// Expenses between two dates, both inclusive.
    Window(DateRange),
    /// Expenses in this category.
    Category(Category),
}

impl ExpenseFilter {
    /// Whether `expense` satisfies the filter.
    pub fn matches(&self, expense: &Expense) -> bool {
        match self {
            ExpenseFilter::Date(date) => expense.date == *date,
            ExpenseFilter::Month(month) => month.range().contains(expense.date),
            ExpenseFilter::Year(year) => year_range(*year).contains(expense.date),
            ExpenseFilter::Window(range) => range.contains(expense.date),
            ExpenseFilter::Category(category) => expense.category == *category,
        }
    }
}

/// Select the expenses that satisfy every filter in `filters`.
///
/// Each selected expense is paired with its row index in `expenses` so that
/// it can be referred to later, e.g. when editing. File order is kept. An
/// empty `filters` selects everything.
pub fn filter_expenses<'a>(
    expenses: &'a [Expense],
    filters: &[ExpenseFilter],
) -> Vec<(usize, &'a Expense)> {
    let selected: Vec<_> = expenses
        .iter()
        .enumerate()
        .filter(|(_, expense)| filters.iter().all(|filter| filter.matches(expense)))
        .collect();

    tracing::debug!(
        "filters {filters:?} selected {} of {} expenses",
        selected.len(),
        expenses.len()
    );

    selected
}
