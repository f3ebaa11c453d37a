use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use time::{Date, Duration, Month, macros::date};

use expense_tracker::{Category, Expense, ExpenseStore, ExpenseTitle};

/// A utility for creating a test expense file for expense_tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the CSV file to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate an expense file for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'Expense.csv').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'Expense.csv').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating expense file at {output_path:#?}");
    let store = ExpenseStore::new(output_path);

    let expenses = sample_expenses()?;
    for expense in &expenses {
        store.append(expense)?;
    }

    println!("Wrote {} expenses.", expenses.len());
    println!("Success!");

    Ok(())
}

/// A year of expenses in 2024 that look like a household budget.
///
/// Amounts vary with the day of the year so that the charts are not flat, but
/// the output is the same on every run.
fn sample_expenses() -> Result<Vec<Expense>, expense_tracker::Error> {
    let mut expenses = Vec::new();
    let mut push = |title: &str,
                    category: Category,
                    date: Date,
                    amount: f64|
     -> Result<(), expense_tracker::Error> {
        Expense::new(ExpenseTitle::new(title)?, category, date, amount)
            .map(|expense| expenses.push(expense))
    };

    let mut day = date!(2024 - 01 - 03);
    while day.year() == 2024 {
        let wobble = f64::from(day.ordinal() % 17);
        push("Weekly groceries", Category::Groceries, day, 85.0 + wobble * 2.5)?;
        push(
            "Bakery",
            Category::Groceries,
            day + Duration::days(3),
            6.8 + wobble / 4.0,
        )?;
        day += Duration::weeks(1);
    }

    let mut month = Month::January;
    loop {
        let first = Date::from_calendar_date(2024, month, 1).map_err(|error| {
            expense_tracker::Error::InvalidDate(format!("{month} 2024: {error}"))
        })?;
        let number = f64::from(u8::from(month));

        push("Rent", Category::Bills, first, 1450.0)?;
        push("Electricity", Category::Bills, first + Duration::days(14), 60.0 + number * 3.0)?;
        push("Index fund", Category::Investments, first + Duration::days(24), 300.0)?;
        push(
            "Cinema",
            Category::Entertainment,
            first + Duration::days(9),
            18.5 + number,
        )?;
        push("Clothes", Category::Shopping, first + Duration::days(19), 40.0 + number * 7.5)?;

        if u8::from(month) % 3 == 0 {
            push("Train tickets", Category::Travel, first + Duration::days(5), 120.0 + number * 10.0)?;
        }

        if month == Month::December {
            break;
        }
        month = month.next();
    }

    push("Summer holiday", Category::Travel, date!(2024 - 07 - 20), 1890.0)?;
    push("Concert", Category::Entertainment, date!(2024 - 09 - 14), 95.0)?;

    expenses.sort_by_key(|expense| expense.date);

    Ok(expenses)
}
