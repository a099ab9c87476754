//! Presentación de resultados: tabla de texto para la terminal y HTML para el
//! formulario web. Sólo se muestran No., Date, Time y Course Name; el código
//! del curso queda fuera a propósito.

use chrono::NaiveDate;

use crate::lookup::LookupOutcome;
use crate::models::ExamRecord;

pub const NO_EXAMS_MESSAGE: &str = "No exams found for the entered codes.";

const HEADERS: [&str; 4] = ["No.", "Date", "Time", "Course Name"];

/// `16-May-2025`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d-%b-%Y").to_string()
}

/// Filas listas para mostrar: [No., Date, Time, Course Name]
pub fn display_rows(records: &[ExamRecord]) -> Vec<[String; 4]> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| [(i + 1).to_string(), format_date(r.date), r.time_slot.label.clone(), r.course_name.clone()])
        .collect()
}

pub fn not_found_message(outcome: &LookupOutcome) -> Option<String> {
    if outcome.not_found.is_empty() {
        return None;
    }
    let parts: Vec<String> = outcome
        .not_found
        .iter()
        .map(|n| match &n.suggestion {
            Some(s) => format!("{} (did you mean {}?)", n.code, s),
            None => n.code.clone(),
        })
        .collect();
    Some(format!("These codes were not found: {}", parts.join(", ")))
}

/// Tabla alineada en columnas
pub fn render_text_table(records: &[ExamRecord]) -> String {
    let rows = display_rows(records);
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in rows.iter() {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: [&str; 4]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths.iter())
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect();
        padded.join("  ").trim_end().to_string()
    };

    let mut out = String::new();
    out.push_str(&line(HEADERS));
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');
    for row in rows.iter() {
        out.push_str(&line([row[0].as_str(), row[1].as_str(), row[2].as_str(), row[3].as_str()]));
        out.push('\n');
    }
    out
}

/// Salida completa de una consulta para la terminal: aviso de códigos no
/// encontrados, y luego la tabla o el mensaje de "no exams found".
pub fn render_outcome_text(outcome: &LookupOutcome) -> String {
    let mut out = String::new();
    if let Some(msg) = not_found_message(outcome) {
        out.push_str(&format!("warning: {}\n", msg));
    }
    if outcome.is_empty() {
        out.push_str(NO_EXAMS_MESSAGE);
        out.push('\n');
    } else {
        out.push_str("\nYour Exam Schedule\n");
        out.push_str(&render_text_table(&outcome.matches));
    }
    out
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Bloque HTML con el resultado: aviso, mensaje informativo y/o tabla.
pub fn render_outcome_html(outcome: &LookupOutcome) -> String {
    let mut out = String::new();
    if let Some(msg) = not_found_message(outcome) {
        out.push_str(&format!("<p class=\"warning\">{}</p>\n", escape_html(&msg)));
    }
    if outcome.is_empty() {
        out.push_str(&format!("<p class=\"info\">{}</p>\n", NO_EXAMS_MESSAGE));
        return out;
    }

    out.push_str("<h3>Your Exam Schedule</h3>\n<table>\n<thead><tr>");
    for h in HEADERS {
        out.push_str(&format!("<th>{}</th>", h));
    }
    out.push_str("</tr></thead>\n<tbody>\n");
    for row in display_rows(&outcome.matches) {
        out.push_str("<tr>");
        for cell in row.iter() {
            out.push_str(&format!("<td>{}</td>", escape_html(cell)));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
    out
}
