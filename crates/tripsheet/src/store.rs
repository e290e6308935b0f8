//! Backing stores: where the workbook lives.
//!
//! A store is an explicit handle passed to the [`SheetAccessor`](crate::SheetAccessor);
//! there is no process-wide "active spreadsheet".

use std::path::{Path, PathBuf};

use tripsheet_core::Workbook;
use tripsheet_csv::{CsvReadOptions, CsvWorkbook, CsvWriteOptions};

use crate::error::Result;

/// Native primitives of a tabular backing store.
///
/// Reads go through [`workbook`](BackingStore::workbook). After mutating a
/// sheet through [`workbook_mut`](BackingStore::workbook_mut) the caller must
/// call [`persist`](BackingStore::persist) for that sheet before returning to
/// its own caller, so every write is visible to the next read.
pub trait BackingStore {
    /// The current workbook
    fn workbook(&self) -> &Workbook;

    /// The current workbook, for in-place edits
    fn workbook_mut(&mut self) -> &mut Workbook;

    /// Make the current state of `sheet` durable
    fn persist(&mut self, sheet: &str) -> Result<()>;
}

/// A store that lives only in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    workbook: Workbook,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing workbook
    pub fn from_workbook(workbook: Workbook) -> Self {
        Self { workbook }
    }

    /// Take the workbook back out
    pub fn into_workbook(self) -> Workbook {
        self.workbook
    }
}

impl BackingStore for MemoryStore {
    fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    fn workbook_mut(&mut self) -> &mut Workbook {
        &mut self.workbook
    }

    fn persist(&mut self, _sheet: &str) -> Result<()> {
        Ok(())
    }
}

/// A store backed by a directory of CSV files, one per sheet.
///
/// The directory is loaded once on open. Each persisted sheet is rewritten
/// in full, so the directory must not be edited by another writer while
/// the store is open.
#[derive(Debug)]
pub struct CsvDirStore {
    dir: PathBuf,
    workbook: Workbook,
    write_options: CsvWriteOptions,
}

impl CsvDirStore {
    /// Open an existing workbook directory
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        let workbook = CsvWorkbook::read_dir(&dir, &CsvReadOptions::default())?;
        tracing::debug!(
            "opened {} with sheets {:?}",
            dir.display(),
            workbook.sheet_names()
        );

        Ok(Self {
            dir,
            workbook,
            write_options: CsvWriteOptions::default(),
        })
    }

    /// Open a workbook directory, creating it when it does not exist yet
    pub fn open_or_create<P: AsRef<Path>>(dir: P) -> Result<Self> {
        std::fs::create_dir_all(dir.as_ref())?;
        Self::open(dir)
    }

    /// The directory holding the sheets
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl BackingStore for CsvDirStore {
    fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    fn workbook_mut(&mut self) -> &mut Workbook {
        &mut self.workbook
    }

    fn persist(&mut self, sheet: &str) -> Result<()> {
        if let Some(worksheet) = self.workbook.worksheet_by_name(sheet) {
            CsvWorkbook::write_sheet(&self.dir, worksheet, &self.write_options)?;
            tracing::trace!("persisted {}", CsvWorkbook::sheet_path(&self.dir, sheet).display());
        }
        Ok(())
    }
}
