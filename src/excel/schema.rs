//! Descripción explícita del layout de la hoja de exámenes.
//!
//! La hoja trae filas de título arriba y, en algún lugar, una fila de
//! encabezado con un marcador (por defecto "Day"). Todas las columnas se leen
//! como desplazamientos relativos a la columna del marcador:
//!
//! ```text
//! | Day | Date | Code | 09:00-12:00 | Code | 13:00-16:00 |
//! | Mon | 45767| CS101| Programming | MA201| Calculus    |
//! ```

use crate::error::{Result, ScheduleError};
use crate::excel::io::{normalize_header, Cell, RawSheet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSchema {
    /// Tokens que identifican la fila de encabezado (se comparan normalizados)
    pub markers: Vec<String>,
    pub date: usize,
    pub morning_code: usize,
    /// En la fila de encabezado esta celda es la etiqueta de la franja de la mañana
    pub morning_name: usize,
    pub afternoon_code: usize,
    /// En la fila de encabezado esta celda es la etiqueta de la franja de la tarde
    pub afternoon_name: usize,
}

impl Default for SheetSchema {
    fn default() -> Self {
        SheetSchema {
            markers: vec!["day".to_string()],
            date: 1,
            morning_code: 2,
            morning_name: 3,
            afternoon_code: 4,
            afternoon_name: 5,
        }
    }
}

/// Posición del encabezado dentro de la hoja (índices 0-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLocation {
    pub row: usize,
    pub anchor_col: usize,
}

/// Celdas de una fila de datos, ya resueltas según el schema
#[derive(Debug, Clone, Copy)]
pub struct RowCells<'a> {
    pub date: &'a Cell,
    pub morning_code: &'a Cell,
    pub morning_name: &'a Cell,
    pub afternoon_code: &'a Cell,
    pub afternoon_name: &'a Cell,
}

static EMPTY: Cell = Cell::Empty;

impl SheetSchema {
    pub fn with_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.markers = markers.into_iter().map(|m| normalize_header(m.as_ref())).collect();
        self
    }

    fn is_marker(&self, cell: &Cell) -> bool {
        match cell {
            Cell::Text(s) => {
                let norm = normalize_header(s);
                self.markers.iter().any(|m| *m == norm)
            }
            _ => false,
        }
    }

    /// Primera fila (desde arriba) que contiene un marcador.
    pub fn locate_header(&self, sheet: &RawSheet) -> Result<HeaderLocation> {
        for (row_idx, row) in sheet.iter().enumerate() {
            if let Some(col) = row.iter().position(|c| self.is_marker(c)) {
                return Ok(HeaderLocation { row: row_idx, anchor_col: col });
            }
        }
        Err(ScheduleError::format(format!(
            "no header row containing {:?} found in {} rows",
            self.markers,
            sheet.len()
        )))
    }

    /// Etiquetas (mañana, tarde) leídas de la fila de encabezado.
    pub fn slot_labels(&self, sheet: &RawSheet, header: HeaderLocation) -> Result<(String, String)> {
        let row = sheet.get(header.row).map(Vec::as_slice).unwrap_or(&[]);
        let read_label = |offset: usize, which: &str| -> Result<String> {
            let col = header.anchor_col + offset;
            let label = row.get(col).map(Cell::as_text).unwrap_or_default();
            if label.is_empty() {
                return Err(ScheduleError::format(format!(
                    "{} time-slot label missing in header row {} column {}",
                    which,
                    header.row + 1,
                    col + 1
                )));
            }
            Ok(label)
        };
        Ok((read_label(self.morning_name, "morning")?, read_label(self.afternoon_name, "afternoon")?))
    }

    /// Acceso con bounds-check: una celda inexistente cuenta como vacía.
    pub fn row_cells<'a>(&self, row: &'a [Cell], header: HeaderLocation) -> RowCells<'a> {
        let at = |offset: usize| row.get(header.anchor_col + offset).unwrap_or(&EMPTY);
        RowCells {
            date: at(self.date),
            morning_code: at(self.morning_code),
            morning_name: at(self.morning_name),
            afternoon_code: at(self.afternoon_code),
            afternoon_name: at(self.afternoon_name),
        }
    }
}
