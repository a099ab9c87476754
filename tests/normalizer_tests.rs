mod common;

use chrono::NaiveDate;
use common::{header, num, sheet_with_rows, text};
use datesheet::excel::io::{Cell, RawSheet};
use datesheet::excel::{normalize_sheet, DateErrorPolicy, SheetSchema};
use datesheet::ScheduleError;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn row_with_both_codes_yields_two_records_same_date() {
    let sheet = sheet_with_rows(vec![vec![
        text("Sat"), num(45787.0), text("CS101"), text("Programming"), text("MA201"), text("Calculus"),
    ]]);
    let table = normalize_sheet(&sheet, &SheetSchema::default(), DateErrorPolicy::Abort).unwrap();

    assert_eq!(table.len(), 2);
    let r = table.records();
    assert_eq!(r[0].date, ymd(2025, 5, 10));
    assert_eq!(r[1].date, r[0].date);
    assert_eq!(r[0].course_code, "cs101");
    assert_eq!(r[0].time_slot.label, "09:00-12:00");
    assert_eq!(r[1].course_code, "ma201");
    assert_eq!(r[1].time_slot.label, "13:00-16:00");
}

#[test]
fn row_without_codes_yields_nothing() {
    let sheet = sheet_with_rows(vec![vec![text("Sat"), num(45787.0), Cell::Empty, text(""), text("  "), Cell::Empty]]);
    let table = normalize_sheet(&sheet, &SheetSchema::default(), DateErrorPolicy::Abort).unwrap();
    assert!(table.is_empty());
}

#[test]
fn blank_date_rows_are_spacers() {
    let sheet = sheet_with_rows(vec![
        vec![],
        vec![text("Mon"), Cell::Empty, text("CS999"), text("Ghost"), Cell::Empty, Cell::Empty],
        vec![text("Tue"), text("13/05/2025"), text("CS201"), text("Data Structures")],
    ]);
    let table = normalize_sheet(&sheet, &SheetSchema::default(), DateErrorPolicy::Abort).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.report().blank_rows, 2);
    assert!(!table.contains_code("cs999"));
}

#[test]
fn missing_marker_row_is_format_error() {
    let sheet: RawSheet = vec![
        vec![text("Final Date Sheet")],
        vec![text("Weekday"), text("Date"), text("Code"), text("9-12"), text("Code"), text("1-4")],
        vec![text("Mon"), num(45787.0), text("CS101"), text("Programming")],
    ];
    let err = normalize_sheet(&sheet, &SheetSchema::default(), DateErrorPolicy::Abort).unwrap_err();
    assert!(matches!(err, ScheduleError::FormatError(_)));
}

#[test]
fn bad_date_aborts_by_default() {
    let sheet = sheet_with_rows(vec![
        vec![text("Mon"), num(45787.0), text("CS101"), text("Programming")],
        vec![text("Tue"), text("to be announced"), text("CS201"), text("Data Structures")],
    ]);
    let err = normalize_sheet(&sheet, &SheetSchema::default(), DateErrorPolicy::Abort).unwrap_err();
    match err {
        // título + encabezado + 2 filas: la mala es la fila 4
        ScheduleError::DateParseError { row, value } => {
            assert_eq!(row, 4);
            assert_eq!(value, "to be announced");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn bad_date_skipped_when_configured() {
    let sheet = sheet_with_rows(vec![
        vec![text("Mon"), num(45787.0), text("CS101"), text("Programming")],
        vec![text("Tue"), text("to be announced"), text("CS201"), text("Data Structures")],
    ]);
    let table = normalize_sheet(&sheet, &SheetSchema::default(), DateErrorPolicy::Skip).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.report().skipped_rows.len(), 1);
    assert_eq!(table.report().skipped_rows[0].row, 4);
}

#[test]
fn output_sorted_by_date_then_clock_time() {
    let mut sheet: RawSheet = vec![header("9:00-12:00", "2:00-5:00 PM")];
    sheet.push(vec![text("Mon"), text("12/05/2025"), text("B1"), text("b"), text("B2"), text("b2")]);
    sheet.push(vec![text("Sat"), text("10/05/2025"), Cell::Empty, Cell::Empty, text("A2"), text("a2")]);
    sheet.push(vec![text("Sat"), text("10/05/2025"), text("A1"), text("a"), Cell::Empty, Cell::Empty]);

    let table = normalize_sheet(&sheet, &SheetSchema::default(), DateErrorPolicy::Abort).unwrap();
    let order: Vec<&str> = table.records().iter().map(|r| r.course_code.as_str()).collect();
    // "2:00-5:00 PM" es lexicalmente menor que "9:00-12:00", pero empieza después
    assert_eq!(order, vec!["a1", "a2", "b1", "b2"]);
}

#[test]
fn every_record_within_date_range_and_on_a_header_slot() {
    let sheet = sheet_with_rows(vec![
        vec![text("Fri"), num(45786.0), text("X1"), text("x"), text("X2"), text("x2")],
        vec![text("Mon"), text("Monday, 12 May 2025"), Cell::Empty, Cell::Empty, text("Y2"), text("y2")],
        vec![text("Wed"), text("2025-05-14"), text("Z1"), text("z"), Cell::Empty, Cell::Empty],
    ]);
    let table = normalize_sheet(&sheet, &SheetSchema::default(), DateErrorPolicy::Abort).unwrap();
    let (first, last) = (ymd(2025, 5, 9), ymd(2025, 5, 14));
    let (morning, afternoon) = table.slots();

    assert_eq!(table.date_range(), Some((first, last)));
    for r in table.records() {
        assert!(r.date >= first && r.date <= last);
        assert!(r.time_slot == *morning || r.time_slot == *afternoon);
    }
}

#[test]
fn header_anchor_can_be_offset_and_marker_custom() {
    let sheet: RawSheet = vec![
        vec![Cell::Empty, text("Exam Schedule")],
        vec![Cell::Empty, text("Weekday"), text("Date"), text("Code"), text("Morning 9-12"), text("Code"), text("Evening")],
        vec![Cell::Empty, text("Mon"), num(45789.0), text("cs101"), text("Programming"), text("cs102"), text("OOP")],
    ];
    let schema = SheetSchema::default().with_markers(["Week Day", "weekday"]);
    let table = normalize_sheet(&sheet, &schema, DateErrorPolicy::Abort).unwrap();
    let (m, a) = table.slots();
    assert_eq!(m.label, "Morning 9-12");
    assert_eq!(a.label, "Evening");
    assert_eq!(table.len(), 2);
    assert_eq!(table.report().header_row, 2);
}

#[test]
fn duplicate_course_on_same_date_is_reported() {
    let sheet = sheet_with_rows(vec![
        vec![text("Mon"), num(45789.0), text("CS101"), text("Programming"), text("cs101 "), text("Programming Lab")],
    ]);
    let table = normalize_sheet(&sheet, &SheetSchema::default(), DateErrorPolicy::Abort).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.report().duplicates.len(), 1);
    assert_eq!(table.report().duplicates[0].course_code, "cs101");
}

#[test]
fn numeric_code_cells_have_no_fraction() {
    let sheet = sheet_with_rows(vec![vec![text("Mon"), num(45789.0), num(101.0), text("Numbered course")]]);
    let table = normalize_sheet(&sheet, &SheetSchema::default(), DateErrorPolicy::Abort).unwrap();
    assert_eq!(table.records()[0].course_code, "101");
}

#[test]
fn twelve_hour_afternoon_label_sorts_after_morning() {
    let mut sheet: RawSheet = vec![header("8:30-11:30", "1:00-4:00")];
    sheet.push(vec![text("Mon"), text("12/05/2025"), text("M1"), text("Morning exam"), text("A1"), text("Afternoon exam")]);

    let table = normalize_sheet(&sheet, &SheetSchema::default(), DateErrorPolicy::Abort).unwrap();
    let order: Vec<(&str, &str)> = table
        .records()
        .iter()
        .map(|r| (r.time_slot.label.as_str(), r.course_name.as_str()))
        .collect();
    assert_eq!(order, vec![("8:30-11:30", "Morning exam"), ("1:00-4:00", "Afternoon exam")]);
}
