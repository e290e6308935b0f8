//! # tripsheet-csv
//!
//! CSV reader and writer for tripsheet, plus the directory layout that turns
//! a folder of CSV files into a workbook (one sheet per file).

mod directory;
mod error;
mod options;
mod reader;
mod writer;

pub use directory::CsvWorkbook;
pub use error::{CsvError, CsvResult};
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator};
pub use reader::CsvReader;
pub use writer::CsvWriter;
