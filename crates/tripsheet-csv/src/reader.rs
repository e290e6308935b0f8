//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::CsvReadOptions;
use tripsheet_core::{CellValue, Error as CoreError, Worksheet, MAX_COLS};

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read a CSV file into a worksheet with the given name
    pub fn read_file<P: AsRef<Path>>(
        path: P,
        name: &str,
        options: &CsvReadOptions,
    ) -> CsvResult<Worksheet> {
        let file = File::open(path)?;
        Self::read(file, name, options)
    }

    /// Read CSV from a reader into a worksheet with the given name
    pub fn read<R: Read>(reader: R, name: &str, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(options.has_header)
            .flexible(true)
            .from_reader(reader);

        let mut worksheet = Worksheet::new(name);
        let mut row_idx = 0u32;

        if options.has_header {
            let headers = csv_reader.headers()?.clone();
            if !headers.is_empty() {
                for (col, value) in headers.iter().enumerate() {
                    worksheet.set_cell_value_at(row_idx, column(col)?, value.trim())?;
                }
                row_idx += 1;
            }
        }

        for result in csv_reader.records() {
            let record = result?;

            for (col, field) in record.iter().enumerate() {
                let value = if options.auto_detect_types {
                    CellValue::parse_display(field)
                } else if field.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::string(field)
                };

                worksheet.set_cell_value_at(row_idx, column(col)?, value)?;
            }

            row_idx += 1;
        }

        Ok(worksheet)
    }
}

/// Field position as a column index, rejecting rows wider than a sheet
fn column(position: usize) -> CsvResult<u16> {
    u16::try_from(position)
        .ok()
        .filter(|col| *col < MAX_COLS)
        .ok_or_else(|| CoreError::ColumnOutOfBounds(MAX_COLS, MAX_COLS - 1).into())
}
