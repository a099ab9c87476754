use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::path::Path;

use crate::error::{Result, ScheduleError};

/// Celda cruda, sin interpretar. Las fechas nativas de la planilla llegan como
/// `Number` con su valor serial.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

/// Hoja cruda: filas × columnas (las filas pueden tener largo distinto)
pub type RawSheet = Vec<Vec<Cell>>;

impl Cell {
    /// Vacía o sólo espacios
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Texto de la celda. Los números enteros se muestran sin ".0" para que
    /// un código numérico (ej: 101) no termine como "101.0".
    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(f) => {
                if (f.floor() - f).abs() < f64::EPSILON && f.abs() < 1e15 {
                    format!("{}", *f as i64)
                } else {
                    format!("{}", f)
                }
            }
            Cell::Bool(b) => format!("{}", b),
        }
    }
}

/// Convierte un `Data` de calamine a `Cell`
pub fn cell_from_data(d: &Data) -> Cell {
    match d {
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) => Cell::Text(s.clone()),
        Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(_) | Data::Empty => Cell::Empty,
    }
}

/// Campo de CSV: vacío o texto tal cual. No se convierte a número para no
/// perder ceros a la izquierda ("0101") ni decimales ("1.10"); un serial de
/// fecha escrito como texto lo resuelve `dates::parse_date_text`.
pub fn cell_from_field(field: &str) -> Cell {
    let t = field.trim();
    if t.is_empty() {
        return Cell::Empty;
    }
    Cell::Text(t.to_string())
}

/// Normaliza encabezados eliminando espacios y pasando a minúsculas.
pub fn normalize_header(s: &str) -> String {
    s.to_lowercase().chars().filter(|c| !c.is_whitespace()).collect()
}

/// Lee una hoja del workbook (xlsx/xlsm/xlsb/xls/ods) como `RawSheet`.
/// Prefiere la hoja con el nombre solicitado; si no existe, toma la primera.
pub fn read_workbook_sheet<P: AsRef<Path>>(path: P, sheet_name: Option<&str>) -> Result<RawSheet> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path).map_err(|e| ScheduleError::read(path, e))?;

    let names = workbook.sheet_names().to_owned();
    let sheet_to_use = match sheet_name {
        Some(wanted) if names.iter().any(|s| s == wanted) => wanted.to_string(),
        Some(wanted) => {
            log::warn!("sheet '{}' not found in {}, using the first sheet", wanted, path.display());
            names.first().cloned().unwrap_or_default()
        }
        None => names.first().cloned().unwrap_or_default(),
    };

    if sheet_to_use.is_empty() {
        return Err(ScheduleError::format(format!("workbook {} has no sheets", path.display())));
    }

    let range = workbook
        .worksheet_range(&sheet_to_use)
        .map_err(|e| ScheduleError::read(path, format!("sheet '{}': {}", sheet_to_use, e)))?;

    // `rows()` arranca en la primera celda usada; rellenamos las filas y
    // columnas vacías previas para que los números de fila coincidan con la hoja
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let mut rows: RawSheet = vec![Vec::new(); start_row as usize];
    for r in range.rows() {
        let mut row_vec = vec![Cell::Empty; start_col as usize];
        row_vec.extend(r.iter().map(cell_from_data));
        rows.push(row_vec);
    }
    log::debug!("read {} rows from sheet '{}' of {}", rows.len(), sheet_to_use, path.display());
    Ok(rows)
}

/// Lee un CSV sin fila de encabezado (el encabezado se busca después).
pub fn read_csv_sheet<P: AsRef<Path>>(path: P) -> Result<RawSheet> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| ScheduleError::read(path, e))?;

    let mut rows: RawSheet = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| ScheduleError::read(path, e))?;
        rows.push(record.iter().map(cell_from_field).collect());
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_numbers_render_without_fraction() {
        assert_eq!(Cell::Number(101.0).as_text(), "101");
        assert_eq!(Cell::Number(2.5).as_text(), "2.5");
        assert_eq!(Cell::Text("  CS101 ".into()).as_text(), "CS101");
    }

    #[test]
    fn csv_fields_are_classified() {
        assert_eq!(cell_from_field("   "), Cell::Empty);
        assert_eq!(cell_from_field("45762"), Cell::Text("45762".into()));
        assert_eq!(cell_from_field(" 0101 "), Cell::Text("0101".into()));
        assert_eq!(cell_from_field("16-May-2025"), Cell::Text("16-May-2025".into()));
        assert_eq!(cell_from_field("NaN"), Cell::Text("NaN".into()));
    }

    #[test]
    fn header_normalization() {
        assert_eq!(normalize_header(" Day "), "day");
        assert_eq!(normalize_header("Course Code"), "coursecode");
    }
}
