//! The itinerary requests end to end.

use pretty_assertions::assert_eq;
use tripsheet::{
    ActionResult, BackingStore, EventUpdate, FieldValue, NewExpense, PackingToggle, Request,
    Response,
};

use crate::{open, sheet_text, workbook_dir, EVENTS, PACKING};

#[test]
fn test_fetch_all_with_partial_workbook() {
    let dir = workbook_dir(&[("events", EVENTS), ("flights", "")]);
    let data = open(dir.path()).fetch_all();

    assert!(data.success);
    assert_eq!(data.events.len(), 3);
    assert!(data.flights.is_empty());
    assert!(data.landmarks.is_empty());
    assert!(data.packing.is_empty());
    assert!(data.expenses.is_empty());

    let lunch = &data.events[1];
    assert_eq!(lunch.row, 3);
    assert_eq!(lunch.id.as_deref(), Some("2"));
    assert_eq!(lunch.get("seq"), Some(&FieldValue::Number(2.0)));
    assert_eq!(lunch.text("dayTitle"), "Arrival");
    assert_eq!(lunch.text("moveTime"), "");
    assert_eq!(lunch.text("note"), "noodles");
}

#[test]
fn test_update_event_writes_only_given_fields() {
    let dir = workbook_dir(&[("events", EVENTS)]);
    let mut itinerary = open(dir.path());

    let result = itinerary.update_event(&EventUpdate {
        id: Some("3".into()),
        time: Some("07:30".into()),
        note: Some("leave early".into()),
        ..Default::default()
    });
    assert_eq!(result, ActionResult::ok(4, Some("3".into())));

    let events = open(dir.path()).events();
    assert_eq!(events[2].text("time"), "07:30");
    assert_eq!(events[2].text("note"), "leave early");
    assert_eq!(events[2].text("title"), "Drive north");
    assert_eq!(events[0].text("time"), "10:00");
}

#[test]
fn test_update_missing_event_reports_not_found() {
    let dir = workbook_dir(&[("events", EVENTS)]);
    let mut itinerary = open(dir.path());

    let result = itinerary.update_event(&EventUpdate {
        id: Some("42".into()),
        title: Some("Ghost".into()),
        ..Default::default()
    });
    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("record id '42' not found in events"));

    let result = itinerary.update_event(&EventUpdate {
        row_index: Some(1),
        title: Some("Header".into()),
        ..Default::default()
    });
    assert_eq!(result, ActionResult::failure("invalid row index 1"));
    assert_eq!(sheet_text(dir.path(), "events"), EVENTS);
}

#[test]
fn test_toggle_packing_writes_one_cell() {
    let dir = workbook_dir(&[("packing", PACKING)]);
    let mut itinerary = open(dir.path());
    let before = itinerary
        .accessor()
        .store()
        .workbook()
        .worksheet_by_name("packing")
        .unwrap()
        .data_range_values();

    let result = itinerary.toggle_packing(&PackingToggle {
        id: Some("1".into()),
        row_index: None,
        checked: true,
    });
    assert!(result.success);

    assert_eq!(
        sheet_text(dir.path(), "packing"),
        "id,category,item,required,packed,memo\n\
         1,clothes,Jacket,TRUE,TRUE,\n\
         2,docs,Passport,TRUE,FALSE,\n"
    );

    let after = open(dir.path())
        .accessor()
        .store()
        .workbook()
        .worksheet_by_name("packing")
        .unwrap()
        .data_range_values();
    let changed: Vec<(usize, usize)> = before
        .iter()
        .zip(&after)
        .enumerate()
        .flat_map(|(r, (b, a))| {
            b.iter()
                .zip(a)
                .enumerate()
                .filter(|(_, (x, y))| x != y)
                .map(move |(c, _)| (r, c))
        })
        .collect();
    assert_eq!(changed, vec![(1, 4)]);
}

#[test]
fn test_toggle_packing_by_row_offset() {
    let dir = workbook_dir(&[("packing", PACKING)]);
    let mut itinerary = open(dir.path());

    let passport = &itinerary.packing()[1];
    assert_eq!(passport.get("packed"), Some(&FieldValue::Flag(false)));

    let result = itinerary.toggle_packing(&PackingToggle {
        id: None,
        row_index: Some(passport.row),
        checked: true,
    });
    assert!(result.success);
    assert_eq!(open(dir.path()).packing()[1].get("packed"), Some(&FieldValue::Flag(true)));
}

#[test]
fn test_add_expense_to_empty_table() {
    let dir = workbook_dir(&[(
        "expenses",
        "id,date,category,desc,amount,currency,paid_by,memo\n",
    )]);
    let mut itinerary = open(dir.path());

    let result = itinerary.add_expense(&NewExpense {
        date: "2024/01/01".into(),
        desc: "Taxi".into(),
        amount: Some(20.0),
        ..Default::default()
    });
    assert_eq!(result, ActionResult::ok(2, Some("1".into())));

    let expenses = open(dir.path()).expenses();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].id.as_deref(), Some("1"));
    assert_eq!(expenses[0].text("date"), "2024/01/01");
    assert_eq!(expenses[0].text("desc"), "Taxi");
    assert_eq!(expenses[0].get("amount"), Some(&FieldValue::Number(20.0)));
}

#[test]
fn test_add_expense_to_headerless_sheet() {
    let dir = workbook_dir(&[("expenses", "")]);
    let mut itinerary = open(dir.path());

    let result = itinerary.add_expense(&NewExpense {
        date: "2024/07/03".into(),
        category: "food".into(),
        desc: "Hotpot".into(),
        amount: Some(188.0),
        currency: "CNY".into(),
        paid_by: "Mei".into(),
        memo: String::new(),
    });
    assert!(result.success);

    assert_eq!(
        sheet_text(dir.path(), "expenses"),
        "id,date,category,desc,amount,currency,paid_by,memo\n\
         1,2024/07/03,food,Hotpot,188,CNY,Mei,\n"
    );
}

#[test]
fn test_landmarks_resolve_by_position() {
    let dir = workbook_dir(&[(
        "landmarks",
        "名稱,類型,緯度,經度,備註\nXilamuren,grassland,41.35,111.2,yurts\n,,,,\n",
    )]);
    let landmarks = open(dir.path()).landmarks();

    assert_eq!(landmarks.len(), 1);
    assert_eq!(landmarks[0].text("name"), "Xilamuren");
    assert_eq!(landmarks[0].get("lng"), Some(&FieldValue::Number(111.2)));
    assert_eq!(landmarks[0].id, None);
}

#[test]
fn test_init_template_then_dispatch() {
    let dir = tempfile::tempdir().unwrap();
    let mut itinerary = open(dir.path());
    assert_eq!(itinerary.init_template().unwrap().len(), 5);
    assert!(dir.path().join("landmarks.csv").exists());

    let response = itinerary.dispatch(&Request::AddExpense(NewExpense {
        desc: "Water".into(),
        amount: Some(3.5),
        ..Default::default()
    }));
    assert!(response.is_success());

    match open(dir.path()).dispatch(&Request::FetchAll) {
        Response::Data(data) => {
            assert_eq!(data.expenses.len(), 1);
            assert_eq!(data.expenses[0].get("amount"), Some(&FieldValue::Number(3.5)));
        }
        other => panic!("Expected data, got {other:?}"),
    }
}
