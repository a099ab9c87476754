// Estructuras de datos principales

use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Franja horaria compartida por todos los exámenes de un bloque (mañana/tarde).
///
/// Conserva la etiqueta tal como viene en la fila de encabezado y, si se puede
/// leer, la hora de inicio en minutos desde medianoche. El orden es por hora de
/// inicio; las etiquetas sin hora legible quedan al final, ordenadas por texto.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TimeSlot {
    pub label: String,
    pub start_minutes: Option<u32>,
}

impl TimeSlot {
    pub fn new(label: &str) -> Self {
        let label = label.trim().to_string();
        let start_minutes = slot_start_minutes(&label);
        TimeSlot { label, start_minutes }
    }

    /// Franja de la tarde. Una etiqueta de 12 horas sin AM/PM ("1:00-4:00")
    /// que empieza antes que la mañana se lee como PM.
    pub fn afternoon(label: &str, morning: &TimeSlot) -> Self {
        let label = label.trim().to_string();
        let start_minutes = match (parse_slot_start(&label), morning.start_minutes) {
            (Some((start, false)), Some(morning_start)) if start < morning_start && start < 12 * 60 => {
                Some(start + 12 * 60)
            }
            (parsed, _) => parsed.map(|(minutes, _)| minutes),
        };
        TimeSlot { label, start_minutes }
    }
}

impl Ord for TimeSlot {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.start_minutes, other.start_minutes) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.label.cmp(&other.label)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.label.cmp(&other.label),
        }
    }
}

impl PartialOrd for TimeSlot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}

/// Una sesión de examen: fecha, franja, código normalizado y nombre del curso.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExamRecord {
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
    pub course_code: String,
    pub course_name: String,
}

/// Fila descartada durante la carga (sólo con `DateErrorPolicy::Skip`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// Número de fila 1-based dentro de la hoja
    pub row: usize,
    pub value: String,
}

/// Un mismo código asignado más de una vez en la misma fecha.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateAssignment {
    pub date: NaiveDate,
    pub course_code: String,
}

/// Resumen de la carga: dónde estaba el encabezado y qué se descartó.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Fila 1-based del encabezado
    pub header_row: usize,
    pub blank_rows: usize,
    pub skipped_rows: Vec<SkippedRow>,
    pub duplicates: Vec<DuplicateAssignment>,
}

/// Tabla larga de exámenes, ordenada por (fecha, franja). Inmutable una vez
/// construida.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleTable {
    records: Vec<ExamRecord>,
    morning_slot: TimeSlot,
    afternoon_slot: TimeSlot,
    #[serde(skip)]
    codes: BTreeSet<String>,
    source: Option<PathBuf>,
    report: LoadReport,
}

impl ScheduleTable {
    pub fn new(
        mut records: Vec<ExamRecord>,
        morning_slot: TimeSlot,
        afternoon_slot: TimeSlot,
        report: LoadReport,
    ) -> Self {
        // sort_by es estable: dentro de (fecha, franja) se conserva el orden de la hoja
        records.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.time_slot.cmp(&b.time_slot)));
        let codes = records.iter().map(|r| r.course_code.clone()).collect();
        ScheduleTable { records, morning_slot, afternoon_slot, codes, source: None, report }
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn records(&self) -> &[ExamRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn slots(&self) -> (&TimeSlot, &TimeSlot) {
        (&self.morning_slot, &self.afternoon_slot)
    }

    /// `code` debe venir ya normalizado.
    pub fn contains_code(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    pub fn source(&self) -> Option<&PathBuf> {
        self.source.as_ref()
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.first()?.date;
        let last = self.records.last()?.date;
        Some((first, last))
    }
}

/// Extrae la hora de inicio de una etiqueta como "09:00–12:00", "9.30 - 12.30",
/// "2:00 - 5:00 PM" o "Morning (9 AM - 12 PM)". Devuelve minutos desde medianoche.
pub fn slot_start_minutes(label: &str) -> Option<u32> {
    parse_slot_start(label).map(|(minutes, _)| minutes)
}

/// (minutos desde medianoche, la etiqueta trae AM/PM)
fn parse_slot_start(label: &str) -> Option<(u32, bool)> {
    let first_digit = label.find(|c: char| c.is_ascii_digit())?;
    let body = &label[first_digit..];
    let mut parts = body
        .split(['–', '—', '-'])
        .flat_map(|p| p.split(" to "))
        .map(str::trim)
        .filter(|p| !p.is_empty());

    let (start_h, start_m, start_meridiem) = parse_clock(parts.next()?)?;
    let end = parts.next().and_then(parse_clock);
    let has_meridiem = start_meridiem.is_some() || matches!(end, Some((_, _, Some(_))));

    let hour = match start_meridiem {
        Some(pm) => to_24h(start_h, pm)?,
        None => match end {
            // "2:00 - 5:00 PM": el inicio hereda PM si así queda antes del fin
            Some((end_h, _, Some(true))) if start_h < 12 => {
                let end_24 = to_24h(end_h, true)?;
                if start_h + 12 <= end_24 { start_h + 12 } else { start_h }
            }
            _ => start_h,
        },
    };

    if hour > 23 || start_m > 59 {
        return None;
    }
    Some((hour * 60 + start_m, has_meridiem))
}

/// (hora, minutos, Some(true)=PM / Some(false)=AM / None)
fn parse_clock(s: &str) -> Option<(u32, u32, Option<bool>)> {
    let compact: String = s.to_lowercase().chars().filter(|c| !c.is_whitespace() && *c != ')').collect();
    let (digits, meridiem) = if let Some(rest) = compact.strip_suffix("pm").or_else(|| compact.strip_suffix("p.m.")) {
        (rest.to_string(), Some(true))
    } else if let Some(rest) = compact.strip_suffix("am").or_else(|| compact.strip_suffix("a.m.")) {
        (rest.to_string(), Some(false))
    } else {
        (compact, None)
    };

    let mut pieces = digits.split([':', '.']);
    let hh = pieces.next()?.parse::<u32>().ok()?;
    let mm = match pieces.next() {
        Some(m) if !m.is_empty() => m.parse::<u32>().ok()?,
        _ => 0,
    };
    if pieces.next().is_some() {
        return None;
    }
    Some((hh, mm, meridiem))
}

fn to_24h(hour: u32, pm: bool) -> Option<u32> {
    match (hour, pm) {
        (h, _) if h == 0 || h > 12 => None,
        (12, false) => Some(0),
        (12, true) => Some(12),
        (h, true) => Some(h + 12),
        (h, false) => Some(h),
    }
}
