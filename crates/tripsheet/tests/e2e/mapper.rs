//! Record mapper behavior over a persisted store.

use pretty_assertions::assert_eq;
use tripsheet::mapper::{apply_patch, read_records, Patch};
use tripsheet::{CsvDirStore, Error, Identity, SheetAccessor, TableSchema};
use tripsheet::{FieldSpec, FieldValue};

use crate::{sheet_text, workbook_dir};

fn simple_events() -> TableSchema {
    TableSchema::new(
        "events",
        vec![FieldSpec::text("title", "title"), FieldSpec::text("time", "time")],
    )
    .with_id_column(tripsheet::mapper::id_column())
}

fn accessor(dir: &std::path::Path) -> SheetAccessor<CsvDirStore> {
    SheetAccessor::new(CsvDirStore::open(dir).unwrap())
}

#[test]
fn test_patch_then_reproject() {
    let dir = workbook_dir(&[("events", "id,title,time\n1,Visit museum,10:00\n")]);
    let mut accessor = accessor(dir.path());
    let schema = simple_events();

    apply_patch(
        &mut accessor,
        &schema,
        &Identity::Id("1".into()),
        &Patch::new().set("time", "11:00"),
    )
    .unwrap();

    let records = read_records(&self::accessor(dir.path()), &schema);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id.as_deref(), Some("1"));
    assert_eq!(records[0].get("title"), Some(&FieldValue::from("Visit museum")));
    assert_eq!(records[0].get("time"), Some(&FieldValue::from("11:00")));
}

#[test]
fn test_round_trip_changes_one_field() {
    let dir = workbook_dir(&[(
        "events",
        "id,title,time\n1,Visit museum,10:00\n2,Lunch,12:30\n,,\n3,Drive north,08:00\n",
    )]);
    let mut accessor = accessor(dir.path());
    let schema = simple_events();

    let before = read_records(&accessor, &schema);
    assert_eq!(before.len(), 3);

    let target = &before[1];
    apply_patch(
        &mut accessor,
        &schema,
        &target.identity(),
        &Patch::new().set("title", "Late lunch"),
    )
    .unwrap();

    let mut expected = before.clone();
    expected[1]
        .fields
        .insert("title".into(), FieldValue::from("Late lunch"));
    assert_eq!(read_records(&self::accessor(dir.path()), &schema), expected);
}

#[test]
fn test_failed_patches_leave_the_file_alone() {
    let content = "id,title,time\n1,Visit museum,10:00\n";
    let dir = workbook_dir(&[("events", content)]);
    let mut accessor = accessor(dir.path());
    let schema = simple_events();

    let err = apply_patch(
        &mut accessor,
        &schema,
        &Identity::Id("9".into()),
        &Patch::new().set("time", "11:00"),
    )
    .unwrap_err();
    assert!(err.is_not_found());

    let outcome = apply_patch(&mut accessor, &schema, &Identity::Id("1".into()), &Patch::new())
        .unwrap();
    assert_eq!(outcome.cells_written, 0);

    assert!(matches!(
        apply_patch(
            &mut accessor,
            &schema,
            &Identity::Row(2),
            &Patch::new().set("time", "11:00").set("place", "x"),
        ),
        Err(Error::UnknownField { .. })
    ));

    assert_eq!(sheet_text(dir.path(), "events"), content);
}

#[test]
fn test_display_values_survive_persistence() {
    let dir = workbook_dir(&[("events", "id,title,time\n007,Visit museum,10:00\n")]);
    let mut accessor = accessor(dir.path());
    let schema = simple_events();

    apply_patch(
        &mut accessor,
        &schema,
        &Identity::Id("007".into()),
        &Patch::new().set("title", "1,250"),
    )
    .unwrap();

    assert_eq!(
        sheet_text(dir.path(), "events"),
        "id,title,time\n007,\"1,250\",10:00\n"
    );
    let records = read_records(&self::accessor(dir.path()), &schema);
    assert_eq!(records[0].text("title"), "1,250");
}
