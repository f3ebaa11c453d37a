use std::{
    error::Error,
    io::{self},
    path::PathBuf,
    process::exit,
};

use charming::Chart;
use clap::{ArgGroup, Parser, Subcommand};
use serde::Serialize;
use time::Date;

use expense_tracker::{
    Category, CategoryBreakdown, Config, DEFAULT_CHART_DIR, DEFAULT_DATA_FILE, DateRange, Expense,
    ExpenseFilter, ExpenseTitle, Interval, Prompter, YearMonth, bar_chart, bar_chart_title,
    bucket_totals, capitalise_first_char, category_months_pie_chart, category_months_title,
    category_pie_chart, expense_table, filter_expenses, format_date, parse_amount, parse_category,
    parse_date, parse_month, parse_year, run_interactive, setup_logging, totals_by_category,
    totals_by_month,
};

/// Keep track of your expenses in a CSV file.
///
/// Run without a command to use the interactive menu.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the CSV file that holds the expenses.
    #[arg(long, env = "EXPENSE_TRACKER_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    /// Directory to write chart pages to.
    #[arg(long, env = "EXPENSE_TRACKER_CHART_DIR", default_value = DEFAULT_CHART_DIR)]
    chart_dir: PathBuf,

    /// File path to append debug logs to.
    #[arg(long, env = "EXPENSE_TRACKER_LOG_FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add an expense to the end of the file.
    Add {
        #[arg(long, value_parser = ExpenseTitle::new)]
        title: ExpenseTitle,

        /// The category number (1 to 6) or name.
        #[arg(long, value_parser = parse_category)]
        category: Category,

        /// The date as DD-MM-YYYY.
        #[arg(long, value_parser = parse_date)]
        date: Date,

        #[arg(long, value_parser = parse_amount)]
        amount: f64,
    },

    /// List expenses, optionally narrowed down by filters that all must match.
    List {
        /// Only expenses on this date (DD-MM-YYYY).
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,

        /// Only expenses in this month (MM-YYYY).
        #[arg(long, value_parser = parse_month)]
        month: Option<YearMonth>,

        /// Only expenses in this year (YYYY).
        #[arg(long, value_parser = parse_year)]
        year: Option<i32>,

        /// Only expenses on or after this date (DD-MM-YYYY).
        #[arg(long, value_parser = parse_date, requires = "to")]
        from: Option<Date>,

        /// Only expenses on or before this date (DD-MM-YYYY).
        #[arg(long, value_parser = parse_date, requires = "from")]
        to: Option<Date>,

        /// Only expenses in this category, by number (1 to 6) or name.
        #[arg(long, value_parser = parse_category)]
        category: Option<Category>,

        /// Print the expenses as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Change an expense. Fields that are not given keep their current value.
    Edit {
        /// The number shown in front of the expense by `list`.
        index: usize,

        #[arg(long, value_parser = ExpenseTitle::new)]
        title: Option<ExpenseTitle>,

        #[arg(long, value_parser = parse_category)]
        category: Option<Category>,

        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,

        #[arg(long, value_parser = parse_amount)]
        amount: Option<f64>,
    },

    /// Delete an expense.
    Delete {
        /// The number shown in front of the expense by `list`.
        index: usize,
    },

    /// Write a chart page to the chart directory.
    #[command(subcommand)]
    Chart(ChartCommand),
}

#[derive(Subcommand, Debug)]
enum ChartCommand {
    /// Weekly totals between two dates as a bar chart.
    Weekly {
        #[command(flatten)]
        window: Window,
    },

    /// Monthly totals between two dates as a bar chart.
    Monthly {
        #[command(flatten)]
        window: Window,
    },

    /// The share of each category in a year, month or window as a pie chart.
    #[command(group(
        ArgGroup::new("selection")
            .required(true)
            .args(["year", "month", "from"])
    ))]
    Categories {
        #[arg(long, value_parser = parse_year)]
        year: Option<i32>,

        #[arg(long, value_parser = parse_month)]
        month: Option<YearMonth>,

        #[arg(long, value_parser = parse_date, requires = "to")]
        from: Option<Date>,

        #[arg(long, value_parser = parse_date, requires = "from")]
        to: Option<Date>,
    },

    /// The share of each month in one category's spending in a year as a pie
    /// chart.
    CategoryMonths {
        #[arg(long, value_parser = parse_category)]
        category: Category,

        #[arg(long, value_parser = parse_year)]
        year: i32,
    },
}

/// Start and end dates, both inclusive.
#[derive(clap::Args, Debug)]
struct Window {
    /// The first date as DD-MM-YYYY.
    #[arg(long, value_parser = parse_date)]
    from: Date,

    /// The last date as DD-MM-YYYY.
    #[arg(long, value_parser = parse_date)]
    to: Date,
}

impl Window {
    fn range(&self) -> DateRange {
        DateRange::new(self.from, self.to)
    }
}

/// An expense with its row index, as printed by `list --json`.
#[derive(Serialize)]
struct ListedExpense<'a> {
    index: usize,
    #[serde(flatten)]
    expense: &'a Expense,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    setup_logging(args.log_file.as_deref())?;

    let config = Config::new(args.data_file, args.chart_dir);
    tracing::debug!("Using expense file {:?}", config.store().path());

    let result = match args.command {
        None => {
            let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());
            run_interactive(&config, &mut prompter)
        }
        Some(command) => run_command(&config, command),
    };

    if let Err(error) = result {
        print_error(error);
        exit(1);
    }

    Ok(())
}

fn run_command(config: &Config, command: Command) -> Result<(), expense_tracker::Error> {
    match command {
        Command::Add {
            title,
            category,
            date,
            amount,
        } => {
            let expense = Expense::new(title, category, date, amount)?;
            config.store().append(&expense)?;
            println!("Expense successfully saved!");
        }
        Command::List {
            date,
            month,
            year,
            from,
            to,
            category,
            json,
        } => {
            let expenses = config.store().load()?;

            let mut filters = Vec::new();
            filters.extend(date.map(ExpenseFilter::Date));
            filters.extend(month.map(ExpenseFilter::Month));
            filters.extend(year.map(ExpenseFilter::Year));
            filters.extend(
                from.zip(to)
                    .map(|(start, end)| ExpenseFilter::Window(DateRange::new(start, end))),
            );
            filters.extend(category.map(ExpenseFilter::Category));

            let selected = filter_expenses(&expenses, &filters);

            if json {
                let listed: Vec<ListedExpense> = selected
                    .into_iter()
                    .map(|(index, expense)| ListedExpense { index, expense })
                    .collect();
                let text = serde_json::to_string_pretty(&listed)
                    .map_err(|error| expense_tracker::Error::Io(error.to_string()))?;
                println!("{text}");
            } else {
                print!("{}", expense_table(&selected));
            }
        }
        Command::Edit {
            index,
            title,
            category,
            date,
            amount,
        } => {
            let expenses = config.store().load()?;
            let current = expenses
                .get(index)
                .ok_or(expense_tracker::Error::RowOutOfRange {
                    index,
                    len: expenses.len(),
                })?;

            let expense = Expense::new(
                title.unwrap_or_else(|| current.title.clone()),
                category.unwrap_or(current.category),
                date.unwrap_or(current.date),
                amount.unwrap_or(current.amount),
            )?;
            config.store().replace(index, &expense)?;
            println!("Expense {index} successfully changed!");
        }
        Command::Delete { index } => {
            let removed = config.store().remove(index)?;
            println!(
                "Deleted \"{}\" from {}.",
                removed.title,
                format_date(removed.date)
            );
        }
        Command::Chart(chart_command) => write_chart(config, chart_command)?,
    }

    Ok(())
}

fn write_chart(config: &Config, command: ChartCommand) -> Result<(), expense_tracker::Error> {
    let expenses = config.store().load()?;

    let chart = match command {
        ChartCommand::Weekly { window } => interval_chart(&expenses, &window, Interval::Week),
        ChartCommand::Monthly { window } => interval_chart(&expenses, &window, Interval::Month),
        ChartCommand::Categories {
            year,
            month,
            from,
            to,
        } => {
            let breakdown = match (year, month, from.zip(to)) {
                (Some(year), _, _) => CategoryBreakdown::Year(year),
                (_, Some(month), _) => CategoryBreakdown::Month(month),
                (_, _, Some((start, end))) => CategoryBreakdown::Window(DateRange::new(start, end)),
                (None, None, None) => {
                    print_error("choose the expenses with --year, --month or --from and --to");
                    exit(2);
                }
            };

            categories_chart(&expenses, &breakdown)
        }
        ChartCommand::CategoryMonths { category, year } => {
            category_months_chart(&expenses, category, year)
        }
    };

    let Some((title, chart)) = chart else {
        return Ok(());
    };

    let path = config.chart_writer().write(&title, &chart)?;
    println!(
        "Saved \"{title}\" to {}, open it in a web browser to view it.",
        path.display()
    );

    Ok(())
}

fn interval_chart(
    expenses: &[Expense],
    window: &Window,
    interval: Interval,
) -> Option<(String, Chart)> {
    let selected = filter_expenses(expenses, &[ExpenseFilter::Window(window.range())]);

    if selected.is_empty() {
        println!(
            "No expenses found between {} and {}.",
            format_date(window.from),
            format_date(window.to)
        );
        return None;
    }

    let buckets = bucket_totals(selected.iter().map(|(_, expense)| *expense), interval);

    Some((bar_chart_title(interval), bar_chart(&buckets, interval)))
}

fn categories_chart(
    expenses: &[Expense],
    breakdown: &CategoryBreakdown,
) -> Option<(String, Chart)> {
    let selected = filter_expenses(expenses, &[breakdown.filter()]);
    let title = breakdown.title();

    if selected.is_empty() {
        println!("No expenses found for the {title}.");
        return None;
    }

    let totals = totals_by_category(selected.iter().map(|(_, expense)| *expense));
    let chart = category_pie_chart(breakdown, &totals);

    Some((title, chart))
}

fn category_months_chart(
    expenses: &[Expense],
    category: Category,
    year: i32,
) -> Option<(String, Chart)> {
    let selected = filter_expenses(
        expenses,
        &[ExpenseFilter::Category(category), ExpenseFilter::Year(year)],
    );
    let title = category_months_title(category, year);

    if selected.is_empty() {
        println!("No expenses found for the {title}.");
        return None;
    }

    let totals = totals_by_month(selected.iter().map(|(_, expense)| *expense));
    let chart = category_months_pie_chart(category, year, &totals);

    Some((title, chart))
}

fn print_error(error: impl ToString) {
    eprintln!(
        "\x1b[31;1m{}\x1b[0m",
        capitalise_first_char(&error.to_string())
    );
}
