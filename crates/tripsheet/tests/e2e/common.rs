//! Common utilities for E2E tests.

use std::path::Path;

use tempfile::TempDir;
use tripsheet::{CsvDirStore, Itinerary};

/// Create a temp workbook directory holding the given `(sheet, csv)` files.
pub fn workbook_dir(sheets: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    for (sheet, content) in sheets {
        std::fs::write(dir.path().join(format!("{sheet}.csv")), content).expect("write sheet");
    }
    dir
}

/// Open an itinerary over a workbook directory.
pub fn open(dir: &Path) -> Itinerary<CsvDirStore> {
    Itinerary::new(CsvDirStore::open(dir).expect("open store"))
}

/// Raw content of one persisted sheet.
pub fn sheet_text(dir: &Path, sheet: &str) -> String {
    std::fs::read_to_string(dir.join(format!("{sheet}.csv"))).expect("read sheet")
}

pub const EVENTS: &str = "\
id,day_index,date,date_label,day_title,seq,time,title,place,move_time,note
1,1,2024/07/01,Mon,Arrival,1,10:00,Visit museum,Capital Museum,30 min,
2,1,2024/07/01,Mon,Arrival,2,12:30,Lunch,Wangfujing,,noodles
3,2,2024/07/02,Tue,Grassland,1,08:00,Drive north,Xilamuren,3 h,
";

pub const PACKING: &str = "\
id,category,item,required,packed,memo
1,clothes,Jacket,TRUE,FALSE,
2,docs,Passport,TRUE,FALSE,
";
