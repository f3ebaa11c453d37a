//! Plain text rendering of expense tables for the terminal.

use unicode_segmentation::UnicodeSegmentation;

use crate::{currency::format_currency, expense::Expense, expense::format_date};

/// The max number of graphemes to display in the title column before
/// truncating and displaying ellipses.
const MAX_TITLE_GRAPHEMES: usize = 32;

const HEADERS: [&str; 5] = ["#", "Title", "Category", "Date", "Amount"];

/// Render `rows` as an aligned table followed by the number of expenses and
/// their total.
///
/// Each row is shown with its row index so the user can pick it when editing
/// or deleting.
pub fn expense_table(rows: &[(usize, &Expense)]) -> String {
    if rows.is_empty() {
        return "No expenses found.\n".to_owned();
    }

    let cells: Vec<[String; 5]> = rows
        .iter()
        .map(|(index, expense)| {
            [
                index.to_string(),
                truncate_title(expense.title.as_ref()),
                expense.category.to_string(),
                format_date(expense.date),
                format_currency(expense.amount),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(grapheme_count);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(grapheme_count(cell));
        }
    }

    let mut table = String::new();
    push_row(&mut table, &HEADERS.map(str::to_owned), &widths);

    let rule_width = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    table.push_str(&"-".repeat(rule_width));
    table.push('\n');

    for row in &cells {
        push_row(&mut table, row, &widths);
    }

    let total: f64 = rows.iter().map(|(_, expense)| expense.amount).sum();
    table.push_str(&format!(
        "{} expense(s), total {}\n",
        rows.len(),
        format_currency(total)
    ));

    table
}

/// Appends one line to `table`. The index and amount columns are right
/// aligned, the rest left aligned.
fn push_row(table: &mut String, row: &[String; 5], widths: &[usize; 5]) {
    let line = row
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(column, (cell, width))| {
            let padding = " ".repeat(width - grapheme_count(cell));
            if column == 0 || column == 4 {
                format!("{padding}{cell}")
            } else {
                format!("{cell}{padding}")
            }
        })
        .collect::<Vec<_>>()
        .join("  ");

    table.push_str(line.trim_end());
    table.push('\n');
}

fn grapheme_count(text: &str) -> usize {
    text.graphemes(true).count()
}

fn truncate_title(title: &str) -> String {
    if grapheme_count(title) <= MAX_TITLE_GRAPHEMES {
        title.to_owned()
    } else {
        let truncated: String = title
            .graphemes(true)
            .take(MAX_TITLE_GRAPHEMES - 3)
            .collect();
        truncated + "..."
    }
}
