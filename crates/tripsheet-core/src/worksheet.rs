//! Worksheet type

use crate::cell::{CellAddress, CellRange, CellStorage, CellValue};
use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};

/// A worksheet (single named sheet in a workbook)
#[derive(Debug, Clone)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Cell storage
    cells: CellStorage,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: CellStorage::new(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    // === Cell Access ===

    /// Get cell value by address string (e.g., "A1")
    pub fn get_value(&self, address: &str) -> Result<CellValue> {
        let addr = CellAddress::parse(address)?;
        Ok(self.get_value_at(addr.row, addr.col))
    }

    /// Get cell value by indices
    pub fn get_value_at(&self, row: u32, col: u16) -> CellValue {
        self.cells.get(row, col).cloned().unwrap_or(CellValue::Empty)
    }

    // === Cell Modification ===

    /// Set a cell value by address string
    pub fn set_cell_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr.row, addr.col, value)
    }

    /// Set a cell value by row and column indices
    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<()> {
        self.validate_cell_position(row, col)?;
        self.cells.set_value(row, col, value.into());
        Ok(())
    }

    /// Append a row after the last populated row.
    ///
    /// Values are placed left to right starting at column A. Returns the
    /// 0-based index of the new row.
    pub fn append_row<I, V>(&mut self, values: I) -> Result<u32>
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let row = match self.last_row() {
            Some(last) => last + 1,
            None => 0,
        };
        self.validate_cell_position(row, 0)?;

        for (col, value) in values.into_iter().enumerate() {
            if col >= MAX_COLS as usize {
                return Err(Error::ColumnOutOfBounds(MAX_COLS, MAX_COLS - 1));
            }
            self.cells.set_value(row, col as u16, value.into());
        }

        Ok(row)
    }

    // === Range Operations ===

    /// Get the used range (bounds of all non-empty cells)
    pub fn used_range(&self) -> Option<CellRange> {
        self.cells
            .used_bounds()
            .map(|(min_row, min_col, max_row, max_col)| {
                CellRange::from_indices(min_row, min_col, max_row, max_col)
            })
    }

    /// Get the data range: from A1 to the last populated row and column.
    pub fn data_range(&self) -> Option<CellRange> {
        self.used_range()
            .map(|used| CellRange::from_indices(0, 0, used.end.row, used.end.col))
    }

    /// Read the whole data range as a rectangle of values, row by row.
    ///
    /// Gaps inside the rectangle come back as [`CellValue::Empty`].
    pub fn data_range_values(&self) -> Vec<Vec<CellValue>> {
        let Some(range) = self.data_range() else {
            return Vec::new();
        };

        let width = range.col_count() as usize;
        let mut rows = vec![vec![CellValue::Empty; width]; range.row_count() as usize];
        for (row, col, value) in self.cells.iter() {
            rows[row as usize][col as usize] = value.clone();
        }
        rows
    }

    /// Index of the last row holding a value
    pub fn last_row(&self) -> Option<u32> {
        self.cells.row_indices().last()
    }

    /// Index of the last column holding a value in any row
    pub fn last_column(&self) -> Option<u16> {
        self.used_range().map(|r| r.end.col)
    }

    /// Number of rows in the data range
    pub fn row_count(&self) -> u32 {
        self.last_row().map(|r| r + 1).unwrap_or(0)
    }

    /// Validate cell position
    fn validate_cell_position(&self, row: u32, col: u16) -> Result<()> {
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }
        if col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col, MAX_COLS - 1));
        }
        Ok(())
    }

    /// Get the number of non-empty cells
    pub fn cell_count(&self) -> usize {
        self.cells.cell_count()
    }

    /// Check if the worksheet is empty
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_worksheet() {
        let ws = Worksheet::new("Test");
        assert_eq!(ws.name(), "Test");
        assert!(ws.is_empty());
        assert_eq!(ws.row_count(), 0);
        assert!(ws.data_range_values().is_empty());
    }

    #[test]
    fn test_set_cell_values() {
        let mut ws = Worksheet::new("Test");

        ws.set_cell_value("A1", "Hello").unwrap();
        ws.set_cell_value("B1", 42.0).unwrap();
        ws.set_cell_value("C1", true).unwrap();

        assert_eq!(ws.get_value("A1").unwrap().as_string(), Some("Hello"));
        assert_eq!(ws.get_value("B1").unwrap().as_number(), Some(42.0));
        assert_eq!(ws.get_value("C1").unwrap().as_bool(), Some(true));
        assert!(ws.get_value("D1").unwrap().is_empty());
    }

    #[test]
    fn test_data_range_starts_at_a1() {
        let mut ws = Worksheet::new("Test");

        assert!(ws.data_range().is_none());

        ws.set_cell_value_at(5, 3, "A").unwrap();
        ws.set_cell_value_at(10, 7, "B").unwrap();

        let used = ws.used_range().unwrap();
        assert_eq!(used.to_string(), "D6:H11");

        let data = ws.data_range().unwrap();
        assert_eq!(data.to_string(), "A1:H11");
    }

    #[test]
    fn test_data_range_values_fills_gaps() {
        let mut ws = Worksheet::new("Test");
        ws.set_cell_value("A1", "id").unwrap();
        ws.set_cell_value("C1", "time").unwrap();
        ws.set_cell_value("A2", 1).unwrap();

        let values = ws.data_range_values();
        assert_eq!(
            values,
            vec![
                vec![CellValue::from("id"), CellValue::Empty, CellValue::from("time")],
                vec![CellValue::from(1), CellValue::Empty, CellValue::Empty],
            ]
        );
    }

    #[test]
    fn test_append_row_after_last_populated_row() {
        let mut ws = Worksheet::new("Test");
        assert_eq!(ws.append_row(["id", "title"]).unwrap(), 0);

        // A gap row stays a gap; append goes after the last populated row
        ws.set_cell_value("B4", "stray").unwrap();
        let row = ws
            .append_row(vec![CellValue::from(2), CellValue::from("Taxi")])
            .unwrap();
        assert_eq!(row, 4);
        assert_eq!(ws.get_value("A5").unwrap().as_number(), Some(2.0));
        assert_eq!(ws.row_count(), 5);
    }

    #[test]
    fn test_writing_empty_clears_cell() {
        let mut ws = Worksheet::new("Test");
        ws.set_cell_value("A1", "x").unwrap();
        ws.set_cell_value("A1", CellValue::Empty).unwrap();
        assert!(ws.is_empty());
    }

    #[test]
    fn test_out_of_bounds() {
        let mut ws = Worksheet::new("Test");
        assert!(ws.set_cell_value_at(MAX_ROWS, 0, "x").is_err());
        assert!(ws.set_cell_value_at(0, MAX_COLS, "x").is_err());
    }
}
