//! Chart generation and rendering.
//!
//! This module creates ECharts visualizations of expenses:
//! - **Bar charts**: weekly or monthly totals over a chosen window
//! - **Category pie charts**: the share of each category in a year, month or window
//! - **Category month pie charts**: the share of each month in one category's yearly spending
//!
//! Each chart is serialized as JSON configuration for the ECharts library and
//! written to a standalone HTML page that loads ECharts from a CDN.

use std::{fs, path::PathBuf};

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, ItemStyle, JsFunction, Orient,
        Tooltip, Trigger,
    },
    series::{Bar, Pie},
};
use maud::{DOCTYPE, PreEscaped, html};
use time::Month;

use crate::{
    Error,
    aggregation::{Bucket, Interval, share_labels},
    expense::{Category, format_date},
    filter::ExpenseFilter,
    range::{DateRange, YearMonth, month_name},
};

const ECHARTS_SOURCE: &str = "https://cdn.jsdelivr.net/npm/echarts@5.5.1/dist/echarts.min.js";

/// The HTML element ID of the chart container.
const CHART_ID: &str = "chart";

/// The selection of expenses that a category pie chart breaks down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryBreakdown {
    /// Every expense in a year.
    Year(i32),
    /// Every expense in a month.
    Month(YearMonth),
    /// Every expense between two dates, both inclusive.
    Window(DateRange),
}

impl CategoryBreakdown {
    /// The chart title, e.g. "2024 Yearly Category Breakdown".
    pub fn title(&self) -> String {
        match self {
            CategoryBreakdown::Year(year) => format!("{year} Yearly Category Breakdown"),
            CategoryBreakdown::Month(month) => format!("{month} Monthly Category Breakdown"),
            CategoryBreakdown::Window(range) => format!(
                "From {} to {} Category Breakdown",
                format_date(range.start),
                format_date(range.end)
            ),
        }
    }

    /// The filter that selects the expenses to break down.
    pub fn filter(&self) -> ExpenseFilter {
        match self {
            CategoryBreakdown::Year(year) => ExpenseFilter::Year(*year),
            CategoryBreakdown::Month(month) => ExpenseFilter::Month(*month),
            CategoryBreakdown::Window(range) => ExpenseFilter::Window(*range),
        }
    }
}

/// Writes charts as HTML pages to a directory.
#[derive(Debug, Clone)]
pub struct ChartWriter {
    dir: PathBuf,
}

impl ChartWriter {
    /// Create a writer that saves charts to `dir`.
    ///
    /// The directory is created when the first chart is written.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Render `chart` as a page titled `title` and write it to the chart
    /// directory.
    ///
    /// The file is named after the title, e.g. "Weekly expenses" is written to
    /// `weekly-expenses.html`. An existing file with the same name is replaced.
    ///
    /// # Returns
    /// The path of the written file.
    pub fn write(&self, title: &str, chart: &Chart) -> Result<PathBuf, Error> {
        fs::create_dir_all(&self.dir)
            .map_err(|error| Error::ChartError(format!("{:?}: {error}", self.dir)))?;

        let path = self.dir.join(format!("{}.html", file_stem(title)));
        fs::write(&path, render_chart_page(title, chart))
            .map_err(|error| Error::ChartError(format!("{path:?}: {error}")))?;

        tracing::info!("Wrote chart \"{title}\" to {path:?}");

        Ok(path)
    }
}

/// Renders a standalone HTML page that displays `chart`.
pub fn render_chart_page(title: &str, chart: &Chart) -> String {
    let script = format!(
        r#"(function() {{
            const chart = echarts.init(document.getElementById("{CHART_ID}"));
            const option = {};
            chart.setOption(option);
            window.addEventListener('resize', chart.resize);
        }})();"#,
        chart
    );

    html!(
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (title) }
                script src=(ECHARTS_SOURCE) {}
            }
            body {
                div id=(CHART_ID) style="width: 100%; height: 90vh;" {}
                script { (PreEscaped(script)) }
            }
        }
    )
    .into_string()
}

/// A bar chart of the totals in `buckets`, labelled with the date of the
/// first expense in each bucket.
pub fn bar_chart(buckets: &[Bucket], interval: Interval) -> Chart {
    let labels: Vec<String> = buckets
        .iter()
        .map(|bucket| format_date(bucket.first_date))
        .collect();
    let values: Vec<f64> = buckets.iter().map(|bucket| bucket.total).collect();

    Chart::new()
        .title(Title::new().text(bar_chart_title(interval)))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .name(format!("{} within chosen dates", interval.label()))
                .axis_label(AxisLabel::new().rotate(90))
                .data(labels),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .name("Amount of expense")
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Bar::new().name("Expenses").data(values))
}

/// The title of a bar chart, e.g. "Weekly expenses".
pub fn bar_chart_title(interval: Interval) -> String {
    format!("{}ly expenses", interval.label())
}

/// A pie chart of the share of each category in `totals`.
pub fn category_pie_chart(breakdown: &CategoryBreakdown, totals: &[(Category, f64)]) -> Chart {
    let named_totals: Vec<(&str, f64)> = totals
        .iter()
        .map(|(category, total)| (category.name(), *total))
        .collect();

    pie_chart(&breakdown.title(), &named_totals)
}

/// The title of a category month pie chart, e.g. "Monthly expenses in Bills in 2024".
pub fn category_months_title(category: Category, year: i32) -> String {
    format!("Monthly expenses in {category} in {year}")
}

/// A pie chart of the share of each month in `totals`, the spending of
/// `category` in `year`.
pub fn category_months_pie_chart(category: Category, year: i32, totals: &[(Month, f64)]) -> Chart {
    let named_totals: Vec<(&str, f64)> = totals
        .iter()
        .map(|(month, total)| (month_name(*month), *total))
        .collect();

    pie_chart(&category_months_title(category, year), &named_totals)
}

/// A pie chart where each slice is named with its label and percentage share.
fn pie_chart(title: &str, named_totals: &[(&str, f64)]) -> Chart {
    let labels = share_labels(named_totals);
    let data: Vec<(f64, &str)> = named_totals
        .iter()
        .zip(&labels)
        .map(|((_, total), label)| (*total, label.as_str()))
        .collect();

    Chart::new()
        .title(Title::new().text(title).left("center"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().orient(Orient::Vertical).left("75%").top("10%"))
        .series(
            Pie::new()
                .name(title)
                .radius("60%")
                .center(vec!["40%", "55%"])
                .item_style(ItemStyle::new().border_color("black").border_width(1))
                .data(data),
        )
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('de-CH', {
              style: 'currency',
              currency: 'CHF'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

/// Turns a chart title into a file name without extension, e.g.
/// "From 01-01-2024 to 31-01-2024 Category Breakdown" becomes
/// "from-01-01-2024-to-31-01-2024-category-breakdown".
fn file_stem(title: &str) -> String {
    title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| word.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::{Month, macros::date};

    use crate::{
        aggregation::{Bucket, Interval},
        charts::{
            CategoryBreakdown, ChartWriter, bar_chart, category_months_pie_chart,
            category_pie_chart, file_stem, render_chart_page,
        },
        expense::Category,
        filter::ExpenseFilter,
        range::{DateRange, YearMonth},
    };

    fn test_buckets() -> Vec<Bucket> {
        vec![
            Bucket {
                first_date: date!(2024 - 01 - 03),
                total: 15.0,
            },
            Bucket {
                first_date: date!(2024 - 01 - 08),
                total: 20.0,
            },
        ]
    }

    #[test]
    fn breakdown_titles() {
        assert_eq!(
            CategoryBreakdown::Year(2024).title(),
            "2024 Yearly Category Breakdown"
        );
        assert_eq!(
            CategoryBreakdown::Month(YearMonth::new(2024, Month::March)).title(),
            "03-2024 Monthly Category Breakdown"
        );
        assert_eq!(
            CategoryBreakdown::Window(DateRange::new(
                date!(2024 - 01 - 01),
                date!(2024 - 01 - 31)
            ))
            .title(),
            "From 01-01-2024 to 31-01-2024 Category Breakdown"
        );
    }

    #[test]
    fn breakdown_filters() {
        assert_eq!(
            CategoryBreakdown::Year(2024).filter(),
            ExpenseFilter::Year(2024)
        );
    }

    #[test]
    fn bar_chart_options_contain_titles_and_labels() {
        let options = bar_chart(&test_buckets(), Interval::Week).to_string();

        assert!(options.contains("Weekly expenses"));
        assert!(options.contains("Week within chosen dates"));
        assert!(options.contains("Amount of expense"));
        assert!(options.contains("03-01-2024"));
        assert!(options.contains("08-01-2024"));
    }

    #[test]
    fn monthly_bar_chart_title() {
        let options = bar_chart(&test_buckets(), Interval::Month).to_string();

        assert!(options.contains("Monthly expenses"));
        assert!(options.contains("Month within chosen dates"));
    }

    #[test]
    fn category_pie_chart_labels_shares() {
        let totals = vec![(Category::Groceries, 60.0), (Category::Bills, 40.0)];

        let options = category_pie_chart(&CategoryBreakdown::Year(2024), &totals).to_string();

        assert!(options.contains("2024 Yearly Category Breakdown"));
        assert!(options.contains("Groceries, 60.0 %"));
        assert!(options.contains("Bills, 40.0 %"));
    }

    #[test]
    fn category_months_pie_chart_uses_month_names() {
        let totals = vec![(Month::July, 25.0), (Month::September, 75.0)];

        let options = category_months_pie_chart(Category::Travel, 2023, &totals).to_string();

        assert!(options.contains("Monthly expenses in Travel in 2023"));
        assert!(options.contains("July, 25.0 %"));
        assert!(options.contains("September, 75.0 %"));
    }

    #[test]
    fn chart_page_loads_echarts_and_initializes_chart() {
        let chart = bar_chart(&test_buckets(), Interval::Week);

        let page = render_chart_page("Weekly expenses", &chart);
        let document = Html::parse_document(&page);

        let title = document
            .select(&Selector::parse("title").unwrap())
            .next()
            .expect("page should have a title");
        assert_eq!(title.text().collect::<String>(), "Weekly expenses");

        let container = Selector::parse("div#chart").unwrap();
        assert_eq!(document.select(&container).count(), 1);

        let external_script = Selector::parse("script[src]").unwrap();
        let source = document
            .select(&external_script)
            .next()
            .and_then(|script| script.value().attr("src"))
            .expect("page should load echarts");
        assert!(source.contains("echarts"));

        let inline_script = Selector::parse("script:not([src])").unwrap();
        let script = document
            .select(&inline_script)
            .next()
            .expect("page should have an inline script")
            .text()
            .collect::<String>();
        assert!(script.contains("echarts.init"));
        assert!(script.contains("setOption"));
        assert!(script.contains("Weekly expenses"));
    }

    #[test]
    fn chart_writer_names_file_after_title() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ChartWriter::new(dir.path().join("charts"));
        let chart = bar_chart(&test_buckets(), Interval::Month);

        let path = writer.write("Monthly expenses", &chart).unwrap();

        assert_eq!(path, dir.path().join("charts").join("monthly-expenses.html"));
        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn file_stem_is_lowercase_and_hyphenated() {
        assert_eq!(
            file_stem("From 01-01-2024 to 31-01-2024 Category Breakdown"),
            "from-01-01-2024-to-31-01-2024-category-breakdown"
        );
        assert_eq!(
            file_stem("Monthly expenses in Bills in 2024"),
            "monthly-expenses-in-bills-in-2024"
        );
    }
}
