mod common;

use chrono::NaiveDate;
use common::{num, sheet_with_rows, text};
use datesheet::excel::io::Cell;
use datesheet::excel::{normalize_sheet, DateErrorPolicy, SheetSchema};
use datesheet::lookup::format::{render_outcome_html, render_outcome_text, NO_EXAMS_MESSAGE};
use datesheet::lookup::lookup;
use datesheet::ScheduleTable;

fn sample_table() -> ScheduleTable {
    let sheet = sheet_with_rows(vec![
        vec![text("Mon"), text("12/05/2025"), text("CS201"), text("Data Structures"), text("MA101"), text("Calculus")],
        vec![text("Sat"), num(45787.0), text("CS101"), text("Programming Fundamentals"), Cell::Empty, Cell::Empty],
        vec![text("Tue"), text("13/05/2025"), text("EE101"), text("Circuits"), text("CS301"), text("Automata <Theory>")],
    ]);
    normalize_sheet(&sheet, &SheetSchema::default(), DateErrorPolicy::Abort).unwrap()
}

#[test]
fn matches_case_and_whitespace_insensitively_and_reports_missing() {
    let table = sample_table();
    let outcome = lookup(&table, &["CS101", "  cs201 ", "MA999"]);

    let codes: Vec<&str> = outcome.matches.iter().map(|r| r.course_code.as_str()).collect();
    assert_eq!(codes, vec!["cs101", "cs201"]);
    assert_eq!(outcome.not_found.len(), 1);
    assert_eq!(outcome.not_found[0].code, "ma999");
    assert!(!outcome.is_empty());
}

#[test]
fn results_follow_table_order() {
    let table = sample_table();
    let outcome = lookup(&table, &["cs201", "cs101"]);
    let dates: Vec<NaiveDate> = outcome.matches.iter().map(|r| r.date).collect();
    assert_eq!(
        dates,
        vec![NaiveDate::from_ymd_opt(2025, 5, 10).unwrap(), NaiveDate::from_ymd_opt(2025, 5, 12).unwrap()]
    );
}

#[test]
fn empty_request_is_no_exams_found_not_error() {
    let table = sample_table();
    let empty: [&str; 0] = [];
    let outcome = lookup(&table, &empty);
    assert!(outcome.is_empty());
    assert!(outcome.not_found.is_empty());
    assert!(render_outcome_text(&outcome).contains(NO_EXAMS_MESSAGE));

    let blanks = lookup(&table, &["", "   "]);
    assert!(blanks.is_empty());
    assert!(blanks.requested.is_empty());
}

#[test]
fn only_unknown_codes_gives_warning_and_no_exams() {
    let table = sample_table();
    let outcome = lookup(&table, &["zz999"]);
    assert!(outcome.is_empty());
    let text = render_outcome_text(&outcome);
    assert!(text.contains("These codes were not found: zz999"));
    assert!(text.contains(NO_EXAMS_MESSAGE));
}

#[test]
fn close_codes_get_a_suggestion() {
    let table = sample_table();
    let outcome = lookup(&table, &["cs1001"]);
    assert_eq!(outcome.not_found[0].suggestion.as_deref(), Some("cs101"));

    let far = lookup(&table, &["history"]);
    assert_eq!(far.not_found[0].suggestion, None);
}

#[test]
fn repeated_codes_are_looked_up_once() {
    let table = sample_table();
    let outcome = lookup(&table, &["CS101", "cs101", " Cs101"]);
    assert_eq!(outcome.requested, vec!["cs101".to_string()]);
    assert_eq!(outcome.matches.len(), 1);
}

#[test]
fn text_output_hides_code_and_formats_dates() {
    let table = sample_table();
    let outcome = lookup(&table, &["cs101", "ma101"]);
    let text = render_outcome_text(&outcome);

    assert!(text.contains("No."));
    assert!(text.contains("Course Name"));
    assert!(text.contains("10-May-2025"));
    assert!(text.contains("12-May-2025"));
    assert!(text.contains("13:00-16:00"));
    assert!(text.contains("Programming Fundamentals"));
    assert!(!text.to_lowercase().contains("cs101"));
    assert!(!text.contains("warning"));
}

#[test]
fn html_output_escapes_names() {
    let table = sample_table();
    let outcome = lookup(&table, &["cs301"]);
    let html = render_outcome_html(&outcome);
    assert!(html.contains("<td>Automata &lt;Theory&gt;</td>"));
    assert!(html.contains("<td>13-May-2025</td>"));
    assert!(html.contains("<td>1</td>"));
}
