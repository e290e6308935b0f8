//! A workbook stored as a directory of CSV files, one file per sheet.

use std::fs;
use std::path::{Path, PathBuf};

use tripsheet_core::{Workbook, Worksheet};

use crate::error::{CsvError, CsvResult};
use crate::options::{CsvReadOptions, CsvWriteOptions};
use crate::reader::CsvReader;
use crate::writer::CsvWriter;

/// Loads and saves workbooks laid out as `<dir>/<sheet name>.csv`
pub struct CsvWorkbook;

impl CsvWorkbook {
    /// Path of the file holding `sheet` inside `dir`
    pub fn sheet_path<P: AsRef<Path>>(dir: P, sheet: &str) -> PathBuf {
        dir.as_ref().join(format!("{}.csv", sheet))
    }

    /// Load every `*.csv` file in `dir` as a sheet named after the file stem.
    ///
    /// Files are loaded in name order. Files whose stem is not a valid sheet
    /// name are skipped.
    pub fn read_dir<P: AsRef<Path>>(dir: P, options: &CsvReadOptions) -> CsvResult<Workbook> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(CsvError::NotADirectory(dir.to_path_buf()));
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .and_then(|e| e.to_str())
                        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
            })
            .collect();
        paths.sort();

        let mut workbook = Workbook::empty();
        for path in paths {
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }

            let worksheet = CsvReader::read_file(&path, name, options)?;
            if let Err(e) = workbook.add_existing_worksheet(worksheet) {
                tracing::warn!("skipping {}: {e}", path.display());
                continue;
            }
            tracing::debug!("loaded sheet '{name}' from {}", path.display());
        }

        Ok(workbook)
    }

    /// Persist one sheet to `<dir>/<sheet name>.csv`.
    ///
    /// The file is written next to its destination and renamed over it, so a
    /// reader never observes a half-written sheet.
    pub fn write_sheet<P: AsRef<Path>>(
        dir: P,
        worksheet: &Worksheet,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let dir = dir.as_ref();
        let target = Self::sheet_path(dir, worksheet.name());
        let staging = dir.join(format!(".{}.csv.tmp", worksheet.name()));

        CsvWriter::write_file(worksheet, &staging, options)?;
        fs::rename(&staging, &target)?;
        Ok(())
    }

    /// Persist every sheet of `workbook` into `dir`, creating it if needed
    pub fn write_dir<P: AsRef<Path>>(
        dir: P,
        workbook: &Workbook,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        for worksheet in workbook.worksheets() {
            Self::write_sheet(dir, worksheet, options)?;
        }
        Ok(())
    }
}
