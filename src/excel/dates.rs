//! Parseo de la columna de fechas.
//!
//! La celda de fecha puede venir como serial de planilla (número de días desde
//! 1899-12-30) o como texto libre en formatos variados. Ambos casos se modelan
//! con `DateCell` y se resuelven en `parse_date_cell`.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::excel::io::Cell;

#[derive(Debug, Clone, PartialEq)]
pub enum DateCell {
    Serial(f64),
    Text(String),
}

impl DateCell {
    /// `None` para celdas vacías (filas separadoras).
    pub fn from_cell(cell: &Cell) -> Option<DateCell> {
        match cell {
            Cell::Number(n) => Some(DateCell::Serial(*n)),
            Cell::Text(s) if !s.trim().is_empty() => Some(DateCell::Text(s.trim().to_string())),
            Cell::Bool(b) => Some(DateCell::Text(b.to_string())),
            _ => None,
        }
    }

    /// Valor original, para mensajes de error
    pub fn raw(&self) -> String {
        match self {
            DateCell::Serial(n) => n.to_string(),
            DateCell::Text(s) => s.clone(),
        }
    }
}

/// Epoch de los seriales de planilla (incluye el falso 29-feb-1900 de Lotus)
fn serial_epoch() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1899, 12, 30)
}

// Orden importa: `%Y` acepta años de 1 dígito en adelante, así que los
// formatos con `%y` van primero (con un año de 4 dígitos fallan por sobrante).
// Día-primero antes que ISO.
const DAY_FIRST_FORMATS: &[&str] = &[
    "%d-%m-%y", "%d/%m/%y", "%d.%m.%y",
    "%d-%m-%Y", "%d/%m/%Y", "%d.%m.%Y", "%d %m %Y",
    "%d-%b-%y", "%d %b %y",
    "%d-%b-%Y", "%d %b %Y", "%d %B %Y", "%d-%B-%Y", "%d/%b/%Y",
    "%d %b, %Y", "%d %B, %Y",
    "%B %d %Y", "%B %d, %Y", "%b %d, %Y", "%b %d %Y",
    "%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

const WEEKDAYS: &[&str] = &[
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
    "mon", "tue", "tues", "wed", "thu", "thur", "thurs", "fri", "sat", "sun",
];

/// Resuelve una celda de fecha. `None` si el serial está fuera de rango o el
/// texto no calza con ningún formato conocido.
pub fn parse_date_cell(cell: &DateCell) -> Option<NaiveDate> {
    match cell {
        DateCell::Serial(n) => serial_to_date(*n),
        DateCell::Text(s) => parse_date_text(s),
    }
}

/// Serial → fecha, truncando la fracción (hora del día).
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 0.0 || serial > 2_958_465.0 {
        return None;
    }
    serial_epoch()?.checked_add_signed(Duration::days(serial.trunc() as i64))
}

/// Texto libre → fecha, con preferencia día-primero ("03/04/2025" = 3 de abril).
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let cleaned = clean_date_text(text);
    if cleaned.is_empty() {
        return None;
    }

    for fmt in DAY_FIRST_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(&cleaned, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&cleaned, fmt) {
            return Some(dt.date());
        }
    }
    // Serial guardado como texto (ej: CSV exportado con comillas)
    match cleaned.parse::<f64>() {
        Ok(n) => serial_to_date(n),
        Err(_) => None,
    }
}

/// Quita el día de la semana inicial, sufijos ordinales y espacios repetidos.
fn clean_date_text(text: &str) -> String {
    let mut words: Vec<String> = text
        .split_whitespace()
        .map(|w| w.to_string())
        .collect();

    if let Some(first) = words.first() {
        let bare = first.trim_end_matches([',', '.']).to_lowercase();
        if WEEKDAYS.contains(&bare.as_str()) {
            words.remove(0);
        }
    }

    words
        .iter()
        .map(|w| strip_ordinal(w))
        .collect::<Vec<_>>()
        .join(" ")
}

/// "16th" → "16", "1st," → "1,"
fn strip_ordinal(word: &str) -> String {
    let (core, trailing) = match word.strip_suffix(',') {
        Some(c) => (c, ","),
        None => (word, ""),
    };
    let lower = core.to_lowercase();
    for suffix in ["st", "nd", "rd", "th"] {
        if let Some(num) = lower.strip_suffix(suffix) {
            if !num.is_empty() && num.chars().all(|c| c.is_ascii_digit()) {
                return format!("{}{}", num, trailing);
            }
        }
    }
    word.to_string()
}
