//! The interactive menu: adding, filtering, visualizing, changing and deleting
//! expenses by answering prompts.
//!
//! Every flow re-asks until it gets a valid answer. End of input at any prompt
//! ends the session without an error.

use std::io::{BufRead, Write};

use crate::{
    Error,
    aggregation::{Interval, bucket_totals, totals_by_category, totals_by_month},
    charts::{
        CategoryBreakdown, bar_chart, bar_chart_title, category_months_pie_chart,
        category_months_title, category_pie_chart,
    },
    config::Config,
    expense::{
        Category, Expense, ExpenseTitle, format_date, parse_amount, parse_category, parse_date,
        parse_month, parse_year,
    },
    filter::{ExpenseFilter, filter_expenses},
    prompt::Prompter,
    range::{DateRange, format_date_label, month_abbrev},
    table::expense_table,
};

/// Whether the session should carry on after a flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    EndOfInput,
}

const MAIN_OPTIONS: [&str; 6] = [
    "Enter Expense Entry",
    "Filter Expenses",
    "Visualize Expenses",
    "Change an Expense Entry",
    "Delete an Expense Entry",
    "Quit",
];

const FILTER_OPTIONS: [&str; 5] = [
    "By Date",
    "By Month",
    "By Year",
    "By a window (Start/End Date)",
    "By Category",
];

const VISUALIZE_OPTIONS: [&str; 2] = ["Barchart", "Piechart"];

const BAR_OPTIONS: [&str; 3] = ["Weekly expenses", "Monthly expenses", "Both"];

const PIE_OPTIONS: [&str; 4] = [
    "Yearly expenses by category",
    "Monthly expenses by category",
    "Expenses in a certain period by category",
    "Monthly expenses in a certain category in a year",
];

const OPTION_QUESTION: &str = "Enter option: ";

/// Run the interactive menu until the user quits or input ends.
///
/// The expense file is reloaded before every task so that each task sees the
/// changes made by the previous one.
///
/// # Errors
///
/// Returns an error if the expense file cannot be read or written, or if
/// reading from or writing to the terminal fails. Invalid answers are not
/// errors, they are reported to the user and asked again.
pub fn run_interactive<R: BufRead, W: Write>(
    config: &Config,
    prompter: &mut Prompter<R, W>,
) -> Result<(), Error> {
    prompter.say("Welcome to Expense Tracker!")?;

    loop {
        let expenses = config.store().load()?;

        prompter.say("")?;
        let Some(choice) = prompter.choose(
            "What would you like to do today?",
            &MAIN_OPTIONS,
            "Please enter the number of the task you want to perform: ",
        )?
        else {
            break;
        };

        tracing::debug!("Main menu choice: {}", MAIN_OPTIONS[choice]);

        let flow = match choice {
            0 => add_expense(config, prompter)?,
            1 => filter_flow(&expenses, prompter)?,
            2 => visualize_flow(config, &expenses, prompter)?,
            3 => change_expense(config, &expenses, prompter)?,
            4 => delete_expense(config, &expenses, prompter)?,
            _ => break,
        };

        if flow == Flow::EndOfInput {
            break;
        }
    }

    prompter.say("Goodbye!")?;

    Ok(())
}

fn add_expense<R: BufRead, W: Write>(
    config: &Config,
    prompter: &mut Prompter<R, W>,
) -> Result<Flow, Error> {
    prompter.say("Let's start adding expenses")?;

    let Some(title) = prompter.ask_until("Enter the title of the expense: ", ExpenseTitle::new)?
    else {
        return Ok(Flow::EndOfInput);
    };
    let Some(category) = ask_category(prompter)? else {
        return Ok(Flow::EndOfInput);
    };
    let Some(date) =
        prompter.ask_until("Enter the date of the expense as DD-MM-YYYY: ", parse_date)?
    else {
        return Ok(Flow::EndOfInput);
    };
    let Some(amount) = prompter.ask_until("Enter the amount: ", parse_amount)? else {
        return Ok(Flow::EndOfInput);
    };

    let expense = Expense::new(title, category, date, amount)?;

    match config.store().append(&expense) {
        Ok(()) => prompter.say("Expense successfully saved!")?,
        Err(error) => prompter.print_error(format!("could not save the expense: {error}"))?,
    }

    Ok(Flow::Continue)
}

fn filter_flow<R: BufRead, W: Write>(
    expenses: &[Expense],
    prompter: &mut Prompter<R, W>,
) -> Result<Flow, Error> {
    let Some(choice) = prompter.choose(
        "How would you like to filter the expenses?",
        &FILTER_OPTIONS,
        OPTION_QUESTION,
    )?
    else {
        return Ok(Flow::EndOfInput);
    };

    let selection = match choice {
        0 => prompter
            .ask_until("Enter the date as DD-MM-YYYY: ", parse_date)?
            .map(|date| {
                (
                    format!("Expenses on {} are:", format_date_label(date)),
                    ExpenseFilter::Date(date),
                )
            }),
        1 => prompter
            .ask_until("Enter the month as MM-YYYY: ", parse_month)?
            .map(|month| {
                (
                    format!("Expenses in {}, {} are:", month_abbrev(month.month), month.year),
                    ExpenseFilter::Month(month),
                )
            }),
        2 => prompter
            .ask_until("Enter the year as YYYY: ", parse_year)?
            .map(|year| (format!("Expenses in {year} are:"), ExpenseFilter::Year(year))),
        3 => ask_window(prompter)?.map(|range| {
            (
                format!(
                    "Expenses within {} and {} are:",
                    format_date_label(range.start),
                    format_date_label(range.end)
                ),
                ExpenseFilter::Window(range),
            )
        }),
        _ => ask_category(prompter)?.map(|category| {
            (
                format!("Expenses with Category {category} are:"),
                ExpenseFilter::Category(category),
            )
        }),
    };

    let Some((heading, filter)) = selection else {
        return Ok(Flow::EndOfInput);
    };

    let selected = filter_expenses(expenses, &[filter]);
    prompter.say(heading)?;
    prompter.say(expense_table(&selected))?;

    Ok(Flow::Continue)
}

fn visualize_flow<R: BufRead, W: Write>(
    config: &Config,
    expenses: &[Expense],
    prompter: &mut Prompter<R, W>,
) -> Result<Flow, Error> {
    let Some(choice) = prompter.choose(
        "How would you like to visualize the expenses?",
        &VISUALIZE_OPTIONS,
        OPTION_QUESTION,
    )?
    else {
        return Ok(Flow::EndOfInput);
    };

    match choice {
        0 => bar_chart_flow(config, expenses, prompter),
        _ => pie_chart_flow(config, expenses, prompter),
    }
}

fn bar_chart_flow<R: BufRead, W: Write>(
    config: &Config,
    expenses: &[Expense],
    prompter: &mut Prompter<R, W>,
) -> Result<Flow, Error> {
    let Some(choice) = prompter.choose(
        "Which bar charts do you want to see?",
        &BAR_OPTIONS,
        OPTION_QUESTION,
    )?
    else {
        return Ok(Flow::EndOfInput);
    };

    let intervals: &[Interval] = match choice {
        0 => &[Interval::Week],
        1 => &[Interval::Month],
        _ => &[Interval::Week, Interval::Month],
    };

    let Some(range) = ask_window(prompter)? else {
        return Ok(Flow::EndOfInput);
    };

    let selected = filter_expenses(expenses, &[ExpenseFilter::Window(range)]);

    if selected.is_empty() {
        prompter.say(format!(
            "No expenses found between {} and {}.",
            format_date(range.start),
            format_date(range.end)
        ))?;
        return Ok(Flow::Continue);
    }

    for &interval in intervals {
        let buckets = bucket_totals(selected.iter().map(|(_, expense)| *expense), interval);
        let title = bar_chart_title(interval);
        write_chart(config, prompter, &title, &bar_chart(&buckets, interval))?;
    }

    Ok(Flow::Continue)
}

fn pie_chart_flow<R: BufRead, W: Write>(
    config: &Config,
    expenses: &[Expense],
    prompter: &mut Prompter<R, W>,
) -> Result<Flow, Error> {
    let Some(choice) = prompter.choose(
        "Which pie chart do you want to see?",
        &PIE_OPTIONS,
        OPTION_QUESTION,
    )?
    else {
        return Ok(Flow::EndOfInput);
    };

    let breakdown = match choice {
        0 => prompter
            .ask_until("Enter the year as YYYY: ", parse_year)?
            .map(CategoryBreakdown::Year),
        1 => prompter
            .ask_until("Enter the month as MM-YYYY: ", parse_month)?
            .map(CategoryBreakdown::Month),
        2 => ask_window(prompter)?.map(CategoryBreakdown::Window),
        _ => return category_months_flow(config, expenses, prompter),
    };

    let Some(breakdown) = breakdown else {
        return Ok(Flow::EndOfInput);
    };

    let selected = filter_expenses(expenses, &[breakdown.filter()]);
    let title = breakdown.title();

    if selected.is_empty() {
        prompter.say(format!("No expenses found for the {title}."))?;
        return Ok(Flow::Continue);
    }

    let totals = totals_by_category(selected.iter().map(|(_, expense)| *expense));
    write_chart(
        config,
        prompter,
        &title,
        &category_pie_chart(&breakdown, &totals),
    )?;

    Ok(Flow::Continue)
}

fn category_months_flow<R: BufRead, W: Write>(
    config: &Config,
    expenses: &[Expense],
    prompter: &mut Prompter<R, W>,
) -> Result<Flow, Error> {
    let Some(category) = ask_category(prompter)? else {
        return Ok(Flow::EndOfInput);
    };
    let Some(year) = prompter.ask_until("Enter the year as YYYY: ", parse_year)? else {
        return Ok(Flow::EndOfInput);
    };

    let selected = filter_expenses(
        expenses,
        &[ExpenseFilter::Category(category), ExpenseFilter::Year(year)],
    );
    let title = category_months_title(category, year);

    if selected.is_empty() {
        prompter.say(format!("No expenses found for the {title}."))?;
        return Ok(Flow::Continue);
    }

    let totals = totals_by_month(selected.iter().map(|(_, expense)| *expense));
    write_chart(
        config,
        prompter,
        &title,
        &category_months_pie_chart(category, year, &totals),
    )?;

    Ok(Flow::Continue)
}

fn change_expense<R: BufRead, W: Write>(
    config: &Config,
    expenses: &[Expense],
    prompter: &mut Prompter<R, W>,
) -> Result<Flow, Error> {
    if expenses.is_empty() {
        prompter.say("There are no expenses to change yet.")?;
        return Ok(Flow::Continue);
    }

    prompter.say(expense_table(&filter_expenses(expenses, &[])))?;

    let Some(found) = prompter.confirm("Do you see the entry you want to change? [Y/N]: ")? else {
        return Ok(Flow::EndOfInput);
    };

    if !found {
        prompter.say("No expense was changed.")?;
        return Ok(Flow::Continue);
    }

    let Some(index) = prompter.ask_until(
        "Please type the number in front of the entry you want to change: ",
        |answer| parse_row_index(answer, expenses.len()),
    )?
    else {
        return Ok(Flow::EndOfInput);
    };

    let current = &expenses[index];
    prompter.say("Leave an answer blank to keep the current value.")?;

    let Some(title) = prompter.ask_or_keep(
        &format!("The current title is \"{}\". Enter the new title: ", current.title),
        current.title.clone(),
        ExpenseTitle::new,
    )?
    else {
        return Ok(Flow::EndOfInput);
    };

    prompter.say(category_menu())?;
    let Some(category) = prompter.ask_or_keep(
        &format!(
            "The current category is {} ({}). Enter the new category: ",
            current.category.code(),
            current.category
        ),
        current.category,
        parse_category,
    )?
    else {
        return Ok(Flow::EndOfInput);
    };

    let Some(date) = prompter.ask_or_keep(
        &format!(
            "The current date is {}. Enter the new date as DD-MM-YYYY: ",
            format_date(current.date)
        ),
        current.date,
        parse_date,
    )?
    else {
        return Ok(Flow::EndOfInput);
    };

    let Some(amount) = prompter.ask_or_keep(
        &format!(
            "The current amount is {}. Enter the new amount: ",
            current.amount
        ),
        current.amount,
        parse_amount,
    )?
    else {
        return Ok(Flow::EndOfInput);
    };

    let expense = Expense::new(title, category, date, amount)?;
    config.store().replace(index, &expense)?;
    prompter.say(format!("Expense {index} successfully changed!"))?;

    Ok(Flow::Continue)
}

fn delete_expense<R: BufRead, W: Write>(
    config: &Config,
    expenses: &[Expense],
    prompter: &mut Prompter<R, W>,
) -> Result<Flow, Error> {
    if expenses.is_empty() {
        prompter.say("There are no expenses to delete yet.")?;
        return Ok(Flow::Continue);
    }

    prompter.say(expense_table(&filter_expenses(expenses, &[])))?;

    let Some(index) = prompter.ask_until(
        "Please type the number in front of the entry you want to delete: ",
        |answer| parse_row_index(answer, expenses.len()),
    )?
    else {
        return Ok(Flow::EndOfInput);
    };

    let Some(confirmed) = prompter.confirm(&format!(
        "Delete \"{}\" from {}? [Y/N]: ",
        expenses[index].title,
        format_date(expenses[index].date)
    ))?
    else {
        return Ok(Flow::EndOfInput);
    };

    if confirmed {
        let removed = config.store().remove(index)?;
        prompter.say(format!("Deleted \"{}\".", removed.title))?;
    } else {
        prompter.say("No expense was deleted.")?;
    }

    Ok(Flow::Continue)
}

fn ask_category<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<Option<Category>, Error> {
    prompter.say(category_menu())?;
    prompter.ask_until("Category: ", parse_category)
}

/// Ask for a start and an end date.
fn ask_window<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<Option<DateRange>, Error> {
    let Some(start) = prompter.ask_until("Enter the start date as DD-MM-YYYY: ", parse_date)?
    else {
        return Ok(None);
    };
    let Some(end) = prompter.ask_until("Enter the end date as DD-MM-YYYY: ", parse_date)? else {
        return Ok(None);
    };

    if start > end {
        tracing::warn!("Window starts after it ends, no expenses will match");
    }

    Ok(Some(DateRange::new(start, end)))
}

fn write_chart<R: BufRead, W: Write>(
    config: &Config,
    prompter: &mut Prompter<R, W>,
    title: &str,
    chart: &charming::Chart,
) -> Result<(), Error> {
    match config.chart_writer().write(title, chart) {
        Ok(path) => prompter.say(format!(
            "Saved \"{title}\" to {}, open it in a web browser to view it.",
            path.display()
        )),
        Err(error) => prompter.print_error(error),
    }
}

fn category_menu() -> String {
    let mut menu = "Enter the category as a number as follows:".to_owned();

    for category in Category::ALL {
        menu.push_str(&format!("\n  {} : {}", category.code(), category));
    }

    menu
}

fn parse_row_index(answer: &str, len: usize) -> Result<usize, Error> {
    let index = answer
        .trim()
        .parse::<usize>()
        .map_err(|_| Error::InvalidRowIndex(answer.to_owned()))?;

    if index < len {
        Ok(index)
    } else {
        Err(Error::RowOutOfRange { index, len })
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, io::Cursor};

    use tempfile::TempDir;
    use time::macros::date;

    use crate::{
        Error,
        config::Config,
        expense::{Category, Expense, ExpenseTitle},
        menu::{category_menu, parse_row_index, run_interactive},
        prompt::Prompter,
    };

    fn create_test_expense(
        title: &str,
        category: Category,
        date: time::Date,
        amount: f64,
    ) -> Expense {
        Expense::new(ExpenseTitle::new(title).unwrap(), category, date, amount).unwrap()
    }

    fn get_test_config() -> (TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path().join("Expense.csv"), dir.path().join("charts"));

        (dir, config)
    }

    fn populate(config: &Config) -> Vec<Expense> {
        let expenses = vec![
            create_test_expense("Milk", Category::Groceries, date!(2024 - 01 - 02), 3.5),
            create_test_expense("Concert", Category::Entertainment, date!(2024 - 01 - 05), 80.0),
            create_test_expense("Bread", Category::Groceries, date!(2024 - 01 - 09), 4.2),
            create_test_expense("Rent", Category::Bills, date!(2024 - 02 - 01), 1200.0),
            create_test_expense("Flight", Category::Travel, date!(2023 - 07 - 14), 310.0),
        ];

        for expense in &expenses {
            config.store().append(expense).unwrap();
        }

        expenses
    }

    /// Runs the menu with `input` and returns everything it printed.
    fn run_with_input(config: &Config, input: &str) -> String {
        let mut prompter = Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());

        run_interactive(config, &mut prompter).unwrap();

        let (_, output) = prompter.into_parts();
        String::from_utf8(output).unwrap()
    }

    fn chart_files(dir: &TempDir) -> Vec<String> {
        let Ok(entries) = fs::read_dir(dir.path().join("charts")) else {
            return Vec::new();
        };

        let mut names: Vec<String> = entries
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn quits_from_main_menu() {
        let (_dir, config) = get_test_config();

        let output = run_with_input(&config, "6\n");

        assert!(output.starts_with("Welcome to Expense Tracker!"));
        assert!(output.contains("  1. Enter Expense Entry"));
        assert!(output.trim_end().ends_with("Goodbye!"));
    }

    #[test]
    fn end_of_input_ends_session() {
        let (_dir, config) = get_test_config();

        let output = run_with_input(&config, "");

        assert!(output.trim_end().ends_with("Goodbye!"));
    }

    #[test]
    fn invalid_main_menu_option_is_asked_again() {
        let (_dir, config) = get_test_config();

        let output = run_with_input(&config, "nine\n0\n6\n");

        assert!(output.contains("\"nine\" is not an option"));
        assert!(output.contains("\"0\" is not an option"));
    }

    #[test]
    fn add_expense_validates_and_appends() {
        let (_dir, config) = get_test_config();

        let output = run_with_input(
            &config,
            "1\n\nCoffee\n9\n2\n31-02-2024\n05-03-2024\n-1\n4.5\n6\n",
        );

        assert!(output.contains("Expense title cannot be empty"));
        assert!(output.contains("\"9\" is not a valid category"));
        assert!(output.contains("\"31-02-2024\" is not a valid date"));
        assert!(output.contains("\"-1\" is not a valid amount"));
        assert!(output.contains("Expense successfully saved!"));
        assert_eq!(
            config.store().load().unwrap(),
            vec![create_test_expense(
                "Coffee",
                Category::Entertainment,
                date!(2024 - 03 - 05),
                4.5
            )]
        );
    }

    #[test]
    fn add_expense_stops_at_end_of_input_without_saving() {
        let (_dir, config) = get_test_config();

        let output = run_with_input(&config, "1\nCoffee\n2\n");

        assert!(output.trim_end().ends_with("Goodbye!"));
        assert!(config.store().load().unwrap().is_empty());
    }

    #[test]
    fn filter_by_category_lists_matching_rows_with_indices() {
        let (_dir, config) = get_test_config();
        populate(&config);

        let output = run_with_input(&config, "2\n5\n1\n6\n");

        assert!(output.contains("Expenses with Category Groceries are:"));
        assert!(output.contains("0  Milk"));
        assert!(output.contains("2  Bread"));
        assert!(!output.contains("Concert"));
        assert!(output.contains("2 expense(s)"));
    }

    #[test]
    fn filter_by_date_month_year_and_window() {
        let (_dir, config) = get_test_config();
        populate(&config);

        let output = run_with_input(
            &config,
            "2\n1\n05-01-2024\n\
            2\n2\n02-2024\n\
            2\n3\n2023\n\
            2\n4\n01-01-2024\n03-01-2024\n\
            6\n",
        );

        assert!(output.contains("Expenses on 05 Jan, 2024 are:"));
        assert!(output.contains("1  Concert"));
        assert!(output.contains("Expenses in Feb, 2024 are:"));
        assert!(output.contains("3  Rent"));
        assert!(output.contains("Expenses in 2023 are:"));
        assert!(output.contains("4  Flight"));
        assert!(output.contains("Expenses within 01 Jan, 2024 and 03 Jan, 2024 are:"));
        assert!(output.contains("0  Milk"));
    }

    #[test]
    fn filter_with_no_matches_says_so() {
        let (_dir, config) = get_test_config();
        populate(&config);

        let output = run_with_input(&config, "2\n3\n1999\n6\n");

        assert!(output.contains("No expenses found."));
    }

    #[test]
    fn change_expense_replaces_row_and_keeps_blank_fields() {
        let (_dir, config) = get_test_config();
        let mut expenses = populate(&config);

        let output = run_with_input(&config, "4\ny\n9\n1\nOpera\n\n\n95\n6\n");

        assert!(output.contains("There is no expense with the number 9"));
        assert!(output.contains("The current title is \"Concert\""));
        assert!(output.contains("Expense 1 successfully changed!"));
        expenses[1] = create_test_expense(
            "Opera",
            Category::Entertainment,
            date!(2024 - 01 - 05),
            95.0,
        );
        assert_eq!(config.store().load().unwrap(), expenses);
    }

    #[test]
    fn change_expense_can_be_declined() {
        let (_dir, config) = get_test_config();
        let expenses = populate(&config);

        let output = run_with_input(&config, "4\nmaybe\nn\n6\n");

        assert!(output.contains("\"maybe\" is not an option, enter Y or N"));
        assert!(output.contains("No expense was changed."));
        assert_eq!(config.store().load().unwrap(), expenses);
    }

    #[test]
    fn change_expense_without_expenses() {
        let (_dir, config) = get_test_config();

        let output = run_with_input(&config, "4\n6\n");

        assert!(output.contains("There are no expenses to change yet."));
    }

    #[test]
    fn delete_expense_removes_row_after_confirmation() {
        let (_dir, config) = get_test_config();
        let mut expenses = populate(&config);

        let output = run_with_input(&config, "5\n3\ny\n6\n");

        assert!(output.contains("Delete \"Rent\" from 01-02-2024? [Y/N]"));
        assert!(output.contains("Deleted \"Rent\"."));
        expenses.remove(3);
        assert_eq!(config.store().load().unwrap(), expenses);
    }

    #[test]
    fn delete_expense_can_be_cancelled() {
        let (_dir, config) = get_test_config();
        let expenses = populate(&config);

        let output = run_with_input(&config, "5\n0\nno\n6\n");

        assert!(output.contains("No expense was deleted."));
        assert_eq!(config.store().load().unwrap(), expenses);
    }

    #[test]
    fn tasks_see_changes_from_earlier_tasks() {
        let (_dir, config) = get_test_config();

        let output = run_with_input(
            &config,
            "1\nTea\n1\n10-10-2024\n2.5\n2\n1\n10-10-2024\n6\n",
        );

        assert!(output.contains("Expenses on 10 Oct, 2024 are:"));
        assert!(output.contains("0  Tea"));
    }

    #[test]
    fn bar_charts_for_both_intervals_are_written() {
        let (dir, config) = get_test_config();
        populate(&config);

        let output = run_with_input(&config, "3\n1\n3\n01-01-2024\n31-12-2024\n6\n");

        assert!(output.contains("Saved \"Weekly expenses\""));
        assert!(output.contains("Saved \"Monthly expenses\""));
        assert_eq!(
            chart_files(&dir),
            vec!["monthly-expenses.html", "weekly-expenses.html"]
        );
    }

    #[test]
    fn bar_chart_with_empty_window_writes_nothing() {
        let (dir, config) = get_test_config();
        populate(&config);

        let output = run_with_input(&config, "3\n1\n1\n01-01-2020\n31-12-2020\n6\n");

        assert!(output.contains("No expenses found between 01-01-2020 and 31-12-2020."));
        assert!(chart_files(&dir).is_empty());
    }

    #[test]
    fn yearly_pie_chart_is_written() {
        let (dir, config) = get_test_config();
        populate(&config);

        let output = run_with_input(&config, "3\n2\n1\n2024\n6\n");

        assert!(output.contains("Saved \"2024 Yearly Category Breakdown\""));
        assert_eq!(
            chart_files(&dir),
            vec!["2024-yearly-category-breakdown.html"]
        );
        let page = fs::read_to_string(
            dir.path()
                .join("charts")
                .join("2024-yearly-category-breakdown.html"),
        )
        .unwrap();
        assert!(page.contains("Bills"));
        assert!(!page.contains("Travel"));
    }

    #[test]
    fn monthly_and_window_pie_charts_are_written() {
        let (dir, config) = get_test_config();
        populate(&config);

        run_with_input(
            &config,
            "3\n2\n2\n01-2024\n3\n2\n3\n01-01-2023\n31-12-2023\n6\n",
        );

        assert_eq!(
            chart_files(&dir),
            vec![
                "01-2024-monthly-category-breakdown.html",
                "from-01-01-2023-to-31-12-2023-category-breakdown.html",
            ]
        );
    }

    #[test]
    fn category_months_pie_chart_only_uses_chosen_year() {
        let (dir, config) = get_test_config();
        populate(&config);

        let output = run_with_input(&config, "3\n2\n4\n1\n2024\n3\n2\n4\n3\n2024\n6\n");

        assert!(output.contains("Saved \"Monthly expenses in Groceries in 2024\""));
        assert!(output.contains("No expenses found for the Monthly expenses in Travel in 2024."));
        assert_eq!(
            chart_files(&dir),
            vec!["monthly-expenses-in-groceries-in-2024.html"]
        );
    }

    #[test]
    fn parse_row_index_checks_bounds() {
        assert_eq!(parse_row_index("2", 3), Ok(2));
        assert_eq!(
            parse_row_index("3", 3),
            Err(Error::RowOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            parse_row_index("-1", 3),
            Err(Error::InvalidRowIndex("-1".to_owned()))
        );
    }

    #[test]
    fn category_menu_lists_all_categories() {
        let menu = category_menu();

        assert!(menu.contains("1 : Groceries"));
        assert!(menu.contains("6 : Investments"));
    }
}
