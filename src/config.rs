//! Runtime configuration shared by the interactive menu and the subcommands.

use std::path::PathBuf;

use crate::{charts::ChartWriter, store::ExpenseStore};

/// The default location of the expense file.
pub const DEFAULT_DATA_FILE: &str = "./Expense.csv";

/// The default directory for chart pages.
pub const DEFAULT_CHART_DIR: &str = ".";

/// Where expenses are read from and charts are written to.
#[derive(Debug, Clone)]
pub struct Config {
    store: ExpenseStore,
    chart_writer: ChartWriter,
}

impl Config {
    /// Create a configuration for the expense file at `data_file`, writing
    /// charts to `chart_dir`.
    pub fn new(data_file: impl Into<PathBuf>, chart_dir: impl Into<PathBuf>) -> Config {
        Config {
            store: ExpenseStore::new(data_file),
            chart_writer: ChartWriter::new(chart_dir),
        }
    }

    /// The expense file.
    pub fn store(&self) -> &ExpenseStore {
        &self.store
    }

    /// The chart output directory.
    pub fn chart_writer(&self) -> &ChartWriter {
        &self.chart_writer
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new(DEFAULT_DATA_FILE, DEFAULT_CHART_DIR)
    }
}
