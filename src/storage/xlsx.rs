use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;
use tracing::debug;

use super::{Cell, Table};
use crate::error::{Result, ScoutError};

const DATETIME_FORMAT: &str = "dd/mm/yyyy hh:mm:ss";
const DURATION_FORMAT: &str = "[h]:mm:ss";

/// First worksheet of the workbook; the first row is the header
pub(super) fn read(path: &Path) -> Result<Table> {
    let load_error = |message: String| ScoutError::Load {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| load_error(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| load_error("workbook has no worksheet".to_string()))?
        .map_err(|e| load_error(e.to_string()))?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        debug!("{} has an empty first sheet", path.display());
        return Ok(Table::default());
    };

    Ok(Table {
        headers: header_row.iter().map(|c| to_cell(c).to_string()).collect(),
        rows: rows.map(|row| row.iter().map(to_cell).collect()).collect(),
    })
}

/// Header in bold; text, number, boolean and date cells keep their type
pub(super) fn write(path: &Path, table: &Table) -> Result<()> {
    let write_error = |e: rust_xlsxwriter::XlsxError| ScoutError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let header_format = Format::new().set_bold();
    let datetime_format = Format::new().set_num_format(DATETIME_FORMAT);
    let duration_format = Format::new().set_num_format(DURATION_FORMAT);

    for (col_idx, header) in table.headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col_idx as u16, header, &header_format)
            .map_err(write_error)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let sheet_row = (row_idx + 1) as u32;
        for (col_idx, cell) in row.iter().enumerate() {
            let col = col_idx as u16;
            let written = match cell {
                Cell::Empty => continue,
                Cell::Text(text) if text.is_empty() => continue,
                Cell::Text(text) => worksheet.write_string(sheet_row, col, text),
                Cell::Number(n) => worksheet.write_number(sheet_row, col, *n),
                Cell::Bool(b) => worksheet.write_boolean(sheet_row, col, *b),
                Cell::DateTime(serial) => {
                    worksheet.write_number_with_format(sheet_row, col, *serial, &datetime_format)
                }
                Cell::Duration(serial) => {
                    worksheet.write_number_with_format(sheet_row, col, *serial, &duration_format)
                }
            };
            written.map_err(write_error)?;
        }
    }

    worksheet.autofit();
    workbook.save(path).map_err(write_error)?;

    Ok(())
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::from(s.as_str()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) if dt.is_duration() => Cell::Duration(dt.as_f64()),
        Data::DateTime(dt) => Cell::DateTime(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::from(s.as_str()),
        Data::Error(e) => Cell::Text(e.to_string()),
    }
}
