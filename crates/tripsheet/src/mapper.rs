//! Record mapper: rows to records on read, record changes to cell writes on
//! write.

use indexmap::IndexMap;
use tripsheet_core::CellValue;

use crate::accessor::SheetAccessor;
use crate::error::{Error, Result};
use crate::record::{FieldValue, Identity, Record};
use crate::schema::{ColumnIndex, ColumnRef, FieldSpec, TableSchema};
use crate::store::BackingStore;

/// A sparse update: only the named fields are written.
///
/// Values are stored the way a spreadsheet stores typed-in text (see
/// [`CellValue::parse_display`]), so leading and trailing spaces are dropped
/// and the next read returns the trimmed text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    values: IndexMap<String, FieldValue>,
}

impl Patch {
    /// Empty patch
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace one field value
    pub fn set<V: Into<FieldValue>>(mut self, field: &str, value: V) -> Self {
        self.values.insert(field.to_string(), value.into());
        self
    }

    /// Add a field value only when present
    pub fn set_opt<V: Into<FieldValue>>(self, field: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(field, value),
            None => self,
        }
    }

    /// Whether the patch writes nothing
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of fields in the patch
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterate the patched fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// What a successful patch touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchOutcome {
    /// 1-based row that was patched
    pub row: u32,
    /// Number of cells written
    pub cells_written: usize,
}

/// Where an appended record landed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appended {
    /// 1-based row that was written
    pub row: u32,
    /// Generated id, when the table has an id column
    pub id: Option<String>,
}

/// Column positions of one schema against one header row
struct Resolved<'s> {
    key: usize,
    id: Option<usize>,
    fields: Vec<(&'s FieldSpec, Option<usize>)>,
}

impl<'s> Resolved<'s> {
    fn new(schema: &'s TableSchema, index: &ColumnIndex<'_>) -> Self {
        let id = schema.id_column.as_ref().and_then(|c| index.resolve(c));
        let fields = schema
            .fields
            .iter()
            .map(|spec| (spec, index.resolve(&spec.column)))
            .collect();

        Self {
            key: id.unwrap_or(0),
            id,
            fields,
        }
    }
}

fn cell(row: &[String], column: usize) -> &str {
    row.get(column).map(String::as_str).unwrap_or("")
}

/// Project data rows into records.
///
/// Pure: the same header, rows and schema always give the same records, in
/// source row order. Rows whose key cell is blank are skipped. The key cell
/// is the id column when the header has it, the first column otherwise.
/// Fields whose column is missing get their kind's zero value.
pub fn project_records(header: &[String], rows: &[Vec<String>], schema: &TableSchema) -> Vec<Record> {
    let index = ColumnIndex::build(header);
    let resolved = Resolved::new(schema, &index);

    rows.iter()
        .enumerate()
        .filter(|(_, row)| !cell(row, resolved.key).trim().is_empty())
        .map(|(i, row)| {
            let fields = resolved
                .fields
                .iter()
                .map(|(spec, column)| {
                    let value = match column {
                        Some(column) => FieldValue::parse(spec.kind, cell(row, *column)),
                        None => FieldValue::zero(spec.kind),
                    };
                    (spec.field.clone(), value)
                })
                .collect();

            Record {
                // Header is row 1
                row: i as u32 + 2,
                id: resolved.id.map(|c| cell(row, c).trim().to_string()),
                fields,
            }
        })
        .collect()
}

/// Read every record of a table.
///
/// Never fails: a missing table or a sheet without data rows yields no
/// records.
pub fn read_records<S: BackingStore>(accessor: &SheetAccessor<S>, schema: &TableSchema) -> Vec<Record> {
    let rows = match accessor
        .open_table(&schema.sheet)
        .and_then(|table| accessor.read_all(&table))
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::debug!("no records from '{}': {e}", schema.sheet);
            return Vec::new();
        }
    };

    match rows.split_first() {
        Some((header, data)) => project_records(header, data, schema),
        None => Vec::new(),
    }
}

/// Locate the 1-based row an identity refers to.
fn locate_row(
    schema: &TableSchema,
    index: &ColumnIndex<'_>,
    rows: &[Vec<String>],
    identity: &Identity,
) -> Result<u32> {
    let not_found = || Error::RecordNotFound {
        table: schema.sheet.clone(),
        identity: identity.to_string(),
    };

    match identity {
        Identity::Row(row) => {
            if *row < 2 {
                return Err(Error::InvalidRow(*row));
            }
            if *row as usize > rows.len() {
                return Err(not_found());
            }
            Ok(*row)
        }
        Identity::Id(id) => {
            let id_ref = schema
                .id_column
                .as_ref()
                .ok_or_else(|| Error::MissingIdColumn(schema.sheet.clone()))?;
            let id_col = index.resolve(id_ref).ok_or_else(|| Error::ColumnNotFound {
                table: schema.sheet.clone(),
                column: id_ref.to_string(),
            })?;

            let wanted = id.trim();
            if wanted.is_empty() {
                return Err(not_found());
            }

            // First match wins; later duplicates are never touched
            rows.iter()
                .enumerate()
                .skip(1)
                .find(|(_, row)| cell(row, id_col).trim() == wanted)
                .map(|(i, _)| i as u32 + 1)
                .ok_or_else(not_found)
        }
    }
}

/// Resolve the column a field writes to, failing on unknown fields and
/// columns missing from the sheet.
fn write_column(
    schema: &TableSchema,
    index: &ColumnIndex<'_>,
    columns: u32,
    field: &str,
) -> Result<usize> {
    let spec = schema.field(field).ok_or_else(|| Error::UnknownField {
        table: schema.sheet.clone(),
        field: field.to_string(),
    })?;

    match index.resolve(&spec.column) {
        Some(column) if (column as u32) < columns => Ok(column),
        _ => {
            tracing::warn!(
                "field '{}' has no column '{}' in '{}'",
                field,
                spec.column,
                schema.sheet
            );
            Err(Error::ColumnNotFound {
                table: schema.sheet.clone(),
                column: spec.column.to_string(),
            })
        }
    }
}

/// Write the fields of `patch` into the row `identity` resolves to.
///
/// Fields absent from the patch are left untouched. The row and every
/// column are resolved before the first write, so a failed patch writes
/// nothing.
pub fn apply_patch<S: BackingStore>(
    accessor: &mut SheetAccessor<S>,
    schema: &TableSchema,
    identity: &Identity,
    patch: &Patch,
) -> Result<PatchOutcome> {
    let table = accessor.open_table(&schema.sheet)?;
    let rows = accessor.read_all(&table)?;
    let header: &[String] = rows.first().map(Vec::as_slice).unwrap_or(&[]);
    let index = ColumnIndex::build(header);
    let (_, columns) = accessor.extent(&table)?;

    let row = locate_row(schema, &index, &rows, identity)?;

    let writes = patch
        .iter()
        .map(|(field, value)| {
            let column = write_column(schema, &index, columns, field)?;
            Ok((column as u32 + 1, CellValue::parse_display(&value.to_display())))
        })
        .collect::<Result<Vec<_>>>()?;

    let cells_written = accessor.write_row_cells(&table, row, writes)?;
    Ok(PatchOutcome { row, cells_written })
}

/// Next id for a table: one past the largest numeric id in use, or 1.
fn next_id(schema: &TableSchema, rows: &[Vec<String>], id_col: usize) -> Result<String> {
    let max = rows
        .iter()
        .skip(1)
        .filter_map(|row| cell(row, id_col).trim().parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    max.checked_add(1)
        .map(|id| id.to_string())
        .ok_or_else(|| Error::IdsExhausted(schema.sheet.clone()))
}

/// Append one record as a full row.
///
/// Values are placed by their field's column; every other cell is left
/// empty. A table without a header row gets the schema's template header
/// first. Tables with an id column get a freshly generated id.
pub fn append_record<S: BackingStore>(
    accessor: &mut SheetAccessor<S>,
    schema: &TableSchema,
    values: &IndexMap<String, FieldValue>,
) -> Result<Appended> {
    let table = accessor.open_table(&schema.sheet)?;
    let mut rows = accessor.read_all(&table)?;

    if rows.is_empty() {
        let template = schema.template_header();
        tracing::info!("writing header {:?} to empty '{}'", template, schema.sheet);
        accessor.append_row(&table, template.iter().map(|name| CellValue::parse_display(name)))?;
        rows = accessor.read_all(&table)?;
    }

    let header: &[String] = rows.first().map(Vec::as_slice).unwrap_or(&[]);
    let index = ColumnIndex::build(header);
    let mut row = vec![String::new(); index.width()];

    for (field, value) in values {
        let spec = schema.field(field).ok_or_else(|| Error::UnknownField {
            table: schema.sheet.clone(),
            field: field.clone(),
        })?;
        let display = value.to_display();

        match index.resolve(&spec.column) {
            Some(column) => {
                if row.len() <= column {
                    row.resize(column + 1, String::new());
                }
                row[column] = display;
            }
            None if display.trim().is_empty() => {}
            None => {
                return Err(Error::ColumnNotFound {
                    table: schema.sheet.clone(),
                    column: spec.column.to_string(),
                })
            }
        }
    }

    let id = match &schema.id_column {
        Some(id_ref) => match index.resolve(id_ref) {
            Some(id_col) => {
                let id = next_id(schema, &rows, id_col)?;
                if row.len() <= id_col {
                    row.resize(id_col + 1, String::new());
                }
                row[id_col] = id.clone();
                Some(id)
            }
            None => {
                tracing::warn!(
                    "'{}' has no '{}' column, appending without an id",
                    schema.sheet,
                    id_ref
                );
                None
            }
        },
        None => None,
    };

    if row.iter().all(|v| v.trim().is_empty()) {
        return Err(Error::EmptyRecord(schema.sheet.clone()));
    }

    let written = accessor.append_row(&table, row.iter().map(|v| CellValue::parse_display(v)))?;
    Ok(Appended { row: written, id })
}

/// Id column reference used by every table with explicit ids
pub fn id_column() -> ColumnRef {
    ColumnRef::name("id")
}
