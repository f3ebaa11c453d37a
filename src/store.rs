//! The expense file: a CSV file with one expense per row.
//!
//! The file starts with the header `Title,Category,Date,Amount`. Categories
//! are stored as their code, dates as DD-MM-YYYY and amounts as plain
//! decimals. Rows are addressed by their 0-based position after the header.

use std::{
    fs::{self, File, OpenOptions},
    io::{ErrorKind, Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use crate::{
    Error,
    expense::{Expense, format_date},
};

/// The header row of the expense file.
pub const HEADER: [&str; 4] = ["Title", "Category", "Date", "Amount"];

/// Reads and writes expenses in a CSV file.
#[derive(Debug, Clone)]
pub struct ExpenseStore {
    path: PathBuf,
}

impl ExpenseStore {
    /// Create a store for the file at `path`.
    ///
    /// The file does not need to exist, it is created by the first [ExpenseStore::append].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the expense file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every expense in the file, in file order.
    ///
    /// A missing file is treated as an empty one.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidCSV] with the line number of the first row that
    /// has the wrong number of fields or a field that fails validation, or
    /// [Error::Io] if the file could not be read.
    pub fn load(&self) -> Result<Vec<Expense>, Error> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                tracing::debug!("No expense file at {:?}, starting empty", self.path);
                return Ok(Vec::new());
            }
            Err(error) => return Err(error.into()),
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);
        let mut expenses = Vec::new();

        for record in reader.records() {
            let record = record?;
            expenses.push(parse_record(&record)?);
        }

        tracing::debug!("Loaded {} expenses from {:?}", expenses.len(), self.path);

        Ok(expenses)
    }

    /// Append `expense` to the end of the file.
    ///
    /// The file and its header are created if the file does not exist or is
    /// empty. If the last row of an existing file has no line ending, one is
    /// added first so the new row starts on its own line.
    pub fn append(&self, expense: &Expense) -> Result<(), Error> {
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;
        let len = file.metadata()?.len();

        if len > 0 && !ends_with_newline(&mut file)? {
            tracing::debug!("{:?} does not end with a line ending, adding one", self.path);
            file.write_all(b"\n")?;
        }

        let mut writer = WriterBuilder::new().from_writer(file);

        if len == 0 {
            writer.write_record(HEADER)?;
        }

        writer.write_record(to_record(expense))?;
        writer.flush()?;

        tracing::info!("Appended expense \"{}\" to {:?}", expense.title, self.path);

        Ok(())
    }

    /// Replace the expense at row `index` with `expense`, keeping every other
    /// row as it was.
    ///
    /// # Errors
    ///
    /// Returns [Error::RowOutOfRange] if there is no row `index`, in which case
    /// the file is not modified.
    pub fn replace(&self, index: usize, expense: &Expense) -> Result<(), Error> {
        let mut expenses = self.load()?;
        check_index(index, expenses.len())?;

        expenses[index] = expense.clone();
        self.rewrite(&expenses)?;

        tracing::info!("Replaced expense {index} in {:?}", self.path);

        Ok(())
    }

    /// Remove the expense at row `index`, shifting later rows up by one.
    ///
    /// Returns the removed expense.
    ///
    /// # Errors
    ///
    /// Returns [Error::RowOutOfRange] if there is no row `index`, in which case
    /// the file is not modified.
    pub fn remove(&self, index: usize) -> Result<Expense, Error> {
        let mut expenses = self.load()?;
        check_index(index, expenses.len())?;

        let removed = expenses.remove(index);
        self.rewrite(&expenses)?;

        tracing::info!("Removed expense {index} from {:?}", self.path);

        Ok(removed)
    }

    /// Write `expenses` to a temporary file next to the expense file, then
    /// move it over the expense file.
    ///
    /// The temporary file is removed if either step fails.
    fn rewrite(&self, expenses: &[Expense]) -> Result<(), Error> {
        let temp_path = self.temp_path();

        let result = write_expenses(&temp_path, expenses)
            .and_then(|()| fs::rename(&temp_path, &self.path).map_err(Error::from));

        if result.is_err() && temp_path.exists() {
            if let Err(error) = fs::remove_file(&temp_path) {
                tracing::error!("Could not remove temporary file {temp_path:?}: {error}");
            }
        }

        result
    }

    fn temp_path(&self) -> PathBuf {
        let mut file_name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        file_name.push(".tmp");

        self.path.with_file_name(file_name)
    }
}

fn write_expenses(path: &Path, expenses: &[Expense]) -> Result<(), Error> {
    let mut writer = WriterBuilder::new().from_path(path)?;
    writer.write_record(HEADER)?;

    for expense in expenses {
        writer.write_record(to_record(expense))?;
    }

    writer.flush()?;

    Ok(())
}

/// Whether the last byte of `file` is a line feed. Leaves the cursor at the
/// end of the file.
fn ends_with_newline(file: &mut File) -> Result<bool, Error> {
    let mut last = [0; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;

    Ok(last[0] == b'\n')
}

fn check_index(index: usize, len: usize) -> Result<(), Error> {
    if index < len {
        Ok(())
    } else {
        Err(Error::RowOutOfRange { index, len })
    }
}

fn to_record(expense: &Expense) -> [String; 4] {
    [
        expense.title.to_string(),
        expense.category.code().to_string(),
        format_date(expense.date),
        expense.amount.to_string(),
    ]
}

fn parse_record(record: &StringRecord) -> Result<Expense, Error> {
    let line = record.position().map(|position| position.line()).unwrap_or(0);

    if record.len() != HEADER.len() {
        return Err(Error::InvalidCSV(
            line,
            format!("expected {} fields but found {}", HEADER.len(), record.len()),
        ));
    }

    Expense::parse(&record[0], &record[1], &record[2], &record[3])
        .map_err(|error| Error::InvalidCSV(line, error.to_string()))
}
