//! Hoja cruda → `ScheduleTable` en formato largo.
//!
//! Cada fila de datos tiene una fecha y dos pares (código, nombre), uno por
//! franja. Se emite un `ExamRecord` por cada par con código no vacío.

use std::collections::HashSet;

use crate::error::{Result, ScheduleError};
use crate::excel::dates::{parse_date_cell, DateCell};
use crate::excel::io::{Cell, RawSheet};
use crate::excel::schema::SheetSchema;
use crate::models::{DuplicateAssignment, ExamRecord, LoadReport, ScheduleTable, SkippedRow, TimeSlot};

/// Qué hacer con una fila cuya fecha no se puede leer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateErrorPolicy {
    /// Aborta la carga completa con `DateParseError`
    #[default]
    Abort,
    /// Descarta la fila, la registra en el `LoadReport` y sigue
    Skip,
}

/// Normaliza un código de curso: trim + minúsculas. Idempotente.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_lowercase()
}

pub fn normalize_sheet(sheet: &RawSheet, schema: &SheetSchema, policy: DateErrorPolicy) -> Result<ScheduleTable> {
    let header = schema.locate_header(sheet)?;
    let (morning_label, afternoon_label) = schema.slot_labels(sheet, header)?;
    let morning = TimeSlot::new(&morning_label);
    let afternoon = TimeSlot::afternoon(&afternoon_label, &morning);
    if afternoon < morning {
        log::warn!("afternoon slot '{}' starts before morning slot '{}'", afternoon.label, morning.label);
    }
    log::info!(
        "header at row {}, slots '{}' / '{}'",
        header.row + 1,
        morning.label,
        afternoon.label
    );

    let mut report = LoadReport { header_row: header.row + 1, ..LoadReport::default() };
    let mut records: Vec<ExamRecord> = Vec::new();
    let mut seen = HashSet::new();

    for (row_idx, row) in sheet.iter().enumerate().skip(header.row + 1) {
        let cells = schema.row_cells(row, header);

        let Some(date_cell) = DateCell::from_cell(cells.date) else {
            report.blank_rows += 1;
            continue;
        };

        let date = match parse_date_cell(&date_cell) {
            Some(d) => d,
            None => match policy {
                DateErrorPolicy::Abort => {
                    return Err(ScheduleError::DateParseError { row: row_idx + 1, value: date_cell.raw() });
                }
                DateErrorPolicy::Skip => {
                    log::warn!("skipping row {}: cannot parse date '{}'", row_idx + 1, date_cell.raw());
                    report.skipped_rows.push(SkippedRow { row: row_idx + 1, value: date_cell.raw() });
                    continue;
                }
            },
        };

        let slots = [
            (cells.morning_code, cells.morning_name, &morning),
            (cells.afternoon_code, cells.afternoon_name, &afternoon),
        ];
        for (code_cell, name_cell, slot) in slots {
            let Some(record) = reshape_cell(date, code_cell, name_cell, slot) else {
                continue;
            };
            if !seen.insert((record.date, record.course_code.clone())) {
                log::warn!("course '{}' scheduled more than once on {}", record.course_code, record.date);
                report.duplicates.push(DuplicateAssignment { date: record.date, course_code: record.course_code.clone() });
            }
            records.push(record);
        }
    }

    log::debug!("{} blank rows ignored after the header", report.blank_rows);
    log::info!("normalized {} exam records", records.len());
    Ok(ScheduleTable::new(records, morning, afternoon, report))
}

fn reshape_cell(date: chrono::NaiveDate, code_cell: &Cell, name_cell: &Cell, slot: &TimeSlot) -> Option<ExamRecord> {
    if code_cell.is_blank() {
        return None;
    }
    Some(ExamRecord {
        date,
        time_slot: slot.clone(),
        course_code: normalize_code(&code_cell.as_text()),
        course_name: name_cell.as_text(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_code_is_idempotent() {
        for raw in ["  CS101 ", "cs101", "MaTh-201\t", ""] {
            let once = normalize_code(raw);
            assert_eq!(normalize_code(&once), once);
        }
        assert_eq!(normalize_code("  CS101 "), "cs101");
    }
}
