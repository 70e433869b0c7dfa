//! Output table persistence.
//!
//! The whole table is read, one row is appended and the file is rewritten.
//! There is no locking and no atomic replace: two runs writing the same file
//! at once can lose a row.

mod delimited;
mod xlsx;

use std::fmt;
use std::path::Path;
use tracing::info;

use crate::error::{Result, ScoutError};
use crate::models::{ProductRecord, COLUMNS};

/// One spreadsheet cell.
///
/// Cells read from an existing workbook keep their type so rewriting the
/// file leaves earlier rows as they were. Date and duration cells hold the
/// Excel serial value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(f64),
    Duration(f64),
}

impl Cell {
    /// Text content; `Some("")` for an empty cell, `None` for typed cells
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Empty => Some(""),
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value)
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::from(value.to_string())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) | Cell::DateTime(n) | Cell::Duration(n) => write!(f, "{}", n),
            Cell::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
        }
    }
}

impl PartialEq<&str> for Cell {
    fn eq(&self, other: &&str) -> bool {
        self.as_text() == Some(*other)
    }
}

impl PartialEq<String> for Cell {
    fn eq(&self, other: &String) -> bool {
        self.as_text() == Some(other.as_str())
    }
}

/// Header row plus data rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn with_columns() -> Self {
        Self {
            headers: COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a record as text cells, matching them to columns by header name.
    ///
    /// Record columns the table lacks are added at the end; columns only the
    /// table has stay empty in the new row.
    pub fn push_record(&mut self, record: &ProductRecord) {
        let mut row = vec![Cell::Empty; self.headers.len()];

        for (column, value) in COLUMNS.iter().zip(record.to_row()) {
            let index = match self.headers.iter().position(|h| h == column) {
                Some(index) => index,
                None => {
                    self.headers.push(column.to_string());
                    for existing in &mut self.rows {
                        existing.push(Cell::Empty);
                    }
                    row.push(Cell::Empty);
                    self.headers.len() - 1
                }
            };
            row[index] = Cell::from(value);
        }

        self.rows.push(row);
    }

    /// Pad short rows so every row is as wide as the header
    fn normalize(mut self) -> Self {
        let width = self
            .rows
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(self.headers.len());

        self.headers.resize(width, String::new());
        for row in &mut self.rows {
            row.resize(width, Cell::Empty);
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Xlsx,
    Csv,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("xlsx") => Ok(TableFormat::Xlsx),
            Some("csv") => Ok(TableFormat::Csv),
            _ => Err(ScoutError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Read the table at `path`. `None` if the file does not exist; an
/// unreadable or corrupt file is an error.
pub fn load_table(path: &Path) -> Result<Option<Table>> {
    let format = TableFormat::from_path(path)?;
    if !path.exists() {
        return Ok(None);
    }

    let table = match format {
        TableFormat::Xlsx => xlsx::read(path)?,
        TableFormat::Csv => delimited::read(path)?,
    };
    Ok(Some(table.normalize()))
}

/// Replace the file at `path` with `table`
pub fn save_table(path: &Path, table: &Table) -> Result<()> {
    match TableFormat::from_path(path)? {
        TableFormat::Xlsx => xlsx::write(path, table),
        TableFormat::Csv => delimited::write(path, table),
    }
}

/// Load the existing table (if any), append `record` and rewrite the file.
/// Returns the table as written.
pub fn append_record(path: &Path, record: &ProductRecord) -> Result<Table> {
    let mut table = match load_table(path)? {
        Some(table) if !table.headers.is_empty() => {
            info!("Loaded {} existing row(s) from {}", table.len(), path.display());
            table
        }
        _ => {
            info!("Starting new table at {}", path.display());
            Table::with_columns()
        }
    };

    table.push_record(record);
    save_table(path, &table)?;

    info!("Wrote {} row(s) to {}", table.len(), path.display());
    Ok(table)
}
