//! Sheet accessor: named tables, full reads and single-cell writes.
//!
//! All coordinates at this layer are 1-based, the way spreadsheet users count
//! rows and columns. Nothing is cached between calls; every read renders the
//! sheet as it is right now.

use tripsheet_core::{CellAddress, CellValue, Worksheet};

use crate::error::{Error, Result};
use crate::store::BackingStore;

/// A resolved reference to one table (sheet) of the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableHandle {
    name: String,
}

impl TableHandle {
    /// The sheet name
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Table-level access to a [`BackingStore`]
#[derive(Debug)]
pub struct SheetAccessor<S> {
    store: S,
}

impl<S: BackingStore> SheetAccessor<S> {
    /// Wrap a store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Unwrap the underlying store
    pub fn into_store(self) -> S {
        self.store
    }

    /// Resolve a table by name.
    ///
    /// Fails with [`Error::TableNotFound`]; read paths treat that as "no
    /// records".
    pub fn open_table(&self, name: &str) -> Result<TableHandle> {
        match self.store.workbook().worksheet_by_name(name) {
            Some(_) => Ok(TableHandle { name: name.into() }),
            None => Err(Error::TableNotFound(name.into())),
        }
    }

    /// Create a table holding just a header row, or return the existing one
    /// untouched.
    pub fn create_table(&mut self, name: &str, header: &[&str]) -> Result<TableHandle> {
        if let Ok(handle) = self.open_table(name) {
            return Ok(handle);
        }

        let workbook = self.store.workbook_mut();
        let index = workbook.add_worksheet_with_name(name)?;
        tracing::info!("created sheet '{name}' at position {index}");

        let handle = TableHandle { name: name.into() };
        if !header.is_empty() {
            self.sheet_mut(&handle)?.append_row(header.iter().copied())?;
        }
        if let Err(e) = self.store.persist(name) {
            tracing::warn!("could not persist new sheet '{name}': {e}");
            self.store.workbook_mut().remove_worksheet(name)?;
            return Err(e);
        }
        Ok(handle)
    }

    /// Every populated row including the header, as display strings.
    ///
    /// Rows are padded to the width of the data range.
    pub fn read_all(&self, table: &TableHandle) -> Result<Vec<Vec<String>>> {
        let sheet = self.sheet(table)?;
        Ok(sheet
            .data_range_values()
            .into_iter()
            .map(|row| row.iter().map(|v| v.to_string()).collect())
            .collect())
    }

    /// Current extent of the table as (rows, columns), header included
    pub fn extent(&self, table: &TableHandle) -> Result<(u32, u32)> {
        let sheet = self.sheet(table)?;
        Ok(match sheet.data_range() {
            Some(range) => (range.row_count(), range.col_count() as u32),
            None => (0, 0),
        })
    }

    /// Overwrite exactly one cell.
    ///
    /// `row` and `column` are 1-based and must fall inside the table's
    /// current extent, otherwise [`Error::OutOfRange`].
    pub fn write_cell<V: Into<CellValue>>(
        &mut self,
        table: &TableHandle,
        row: u32,
        column: u32,
        value: V,
    ) -> Result<()> {
        self.write_row_cells(table, row, vec![(column, value.into())])
            .map(|_| ())
    }

    /// Overwrite several cells of one row as a single write.
    ///
    /// Every coordinate is checked against the extent as it was before the
    /// first cell changes, so clearing a trailing cell cannot push a later
    /// cell of the same batch out of range. The sheet is persisted once; if
    /// that fails every cell is restored and nothing is visible to later
    /// reads. Returns the number of cells written.
    pub fn write_row_cells(
        &mut self,
        table: &TableHandle,
        row: u32,
        cells: Vec<(u32, CellValue)>,
    ) -> Result<usize> {
        let (rows, columns) = self.extent(table)?;
        let mut targets = Vec::with_capacity(cells.len());
        for (column, value) in cells {
            if row == 0 || column == 0 || row > rows || column > columns {
                return Err(Error::OutOfRange {
                    table: table.name.clone(),
                    row,
                    column,
                    rows,
                    columns,
                });
            }
            targets.push((CellAddress::from_numbers(row, column)?, value));
        }
        if targets.is_empty() {
            return Ok(0);
        }

        let sheet = self.sheet_mut(table)?;
        let mut previous = Vec::with_capacity(targets.len());
        for (addr, value) in &targets {
            tracing::debug!("write {}!{} = {:?}", table.name, addr, value.to_string());
            previous.push((addr.row, addr.col, sheet.get_value_at(addr.row, addr.col)));
            sheet.set_cell_value_at(addr.row, addr.col, value.clone())?;
        }

        self.persist_or_restore(table, previous)?;
        Ok(targets.len())
    }

    /// Append a row after the last populated row, values from column 1.
    ///
    /// Returns the 1-based number of the written row.
    pub fn append_row<I, V>(&mut self, table: &TableHandle, values: I) -> Result<u32>
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let values: Vec<CellValue> = values.into_iter().map(Into::into).collect();
        let width = values.len();
        let index = self.sheet_mut(table)?.append_row(values)?;
        tracing::debug!("appended {}!A{}", table.name, index + 1);

        let previous = (0..width)
            .map(|col| (index, col as u16, CellValue::Empty))
            .collect();
        self.persist_or_restore(table, previous)?;
        Ok(index + 1)
    }

    /// Persist `table`, putting `previous` cell values back when that fails
    fn persist_or_restore(
        &mut self,
        table: &TableHandle,
        previous: Vec<(u32, u16, CellValue)>,
    ) -> Result<()> {
        let Err(e) = self.store.persist(&table.name) else {
            return Ok(());
        };

        tracing::warn!("could not persist '{}', restoring: {e}", table.name);
        let sheet = self.sheet_mut(table)?;
        for (row, col, value) in previous.into_iter().rev() {
            sheet.set_cell_value_at(row, col, value)?;
        }
        Err(e)
    }

    fn sheet(&self, table: &TableHandle) -> Result<&Worksheet> {
        self.store
            .workbook()
            .worksheet_by_name(&table.name)
            .ok_or_else(|| Error::TableNotFound(table.name.clone()))
    }

    fn sheet_mut(&mut self, table: &TableHandle) -> Result<&mut Worksheet> {
        self.store
            .workbook_mut()
            .worksheet_by_name_mut(&table.name)
            .ok_or_else(|| Error::TableNotFound(table.name.clone()))
    }
}
