use std::path::Path;

use super::{Cell, Table};
use crate::error::{Result, ScoutError};

pub(super) fn read(path: &Path) -> Result<Table> {
    let load_error = |e: csv::Error| ScoutError::Load {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let mut reader = csv::Reader::from_path(path).map_err(load_error)?;
    let headers = reader
        .headers()
        .map_err(load_error)?
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(load_error)?;
        rows.push(record.iter().map(Cell::from).collect());
    }

    Ok(Table { headers, rows })
}

pub(super) fn write(path: &Path, table: &Table) -> Result<()> {
    let write_error = |e: csv::Error| ScoutError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let mut writer = csv::Writer::from_path(path).map_err(write_error)?;
    writer.write_record(&table.headers).map_err(write_error)?;
    for row in &table.rows {
        writer
            .write_record(row.iter().map(Cell::to_string))
            .map_err(write_error)?;
    }
    writer.flush().map_err(|e| ScoutError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(())
}
