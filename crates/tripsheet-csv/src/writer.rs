//! CSV writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::{CsvWriteOptions, LineTerminator};
use tripsheet_core::Worksheet;

/// CSV file writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write a worksheet to a CSV file
    pub fn write_file<P: AsRef<Path>>(
        worksheet: &Worksheet,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write(worksheet, file, options)
    }

    /// Write a worksheet's data range to a writer as display values
    pub fn write<W: Write>(
        worksheet: &Worksheet,
        writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
        };

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(terminator)
            .from_writer(writer);

        for row in worksheet.data_range_values() {
            let record: Vec<String> = row.iter().map(|value| value.to_string()).collect();
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_write_display_values() {
        let mut ws = Worksheet::new("expenses");
        ws.append_row(["date", "desc", "amount"]).unwrap();
        ws.set_cell_value("A2", "2024/01/01").unwrap();
        ws.set_cell_value("B2", "Taxi, airport").unwrap();
        ws.set_cell_value("C2", 20.0).unwrap();

        let mut buf = Vec::new();
        CsvWriter::write(&ws, &mut buf, &CsvWriteOptions::default()).unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "date,desc,amount\n2024/01/01,\"Taxi, airport\",20\n"
        );
    }

    #[test]
    fn test_write_pads_rows_to_data_range() {
        let mut ws = Worksheet::new("packing");
        ws.set_cell_value("A1", "id").unwrap();
        ws.set_cell_value("C1", "packed").unwrap();
        ws.set_cell_value("C3", true).unwrap();

        let mut buf = Vec::new();
        let options = CsvWriteOptions {
            line_terminator: LineTerminator::CRLF,
            ..Default::default()
        };
        CsvWriter::write(&ws, &mut buf, &options).unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "id,,packed\r\n,,\r\n,,TRUE\r\n"
        );
    }

    #[test]
    fn test_write_empty_sheet() {
        let ws = Worksheet::new("flights");
        let mut buf = Vec::new();
        CsvWriter::write(&ws, &mut buf, &CsvWriteOptions::default()).unwrap();
        assert!(buf.is_empty());
    }
}
