#![allow(dead_code)]

use datesheet::excel::io::{Cell, RawSheet};
use std::path::PathBuf;

/// Hoja de ejemplo: dos filas de título, encabezado, una fila separadora,
/// una fila sin códigos y una fecha anterior al final (para probar el orden).
pub const SAMPLE_CSV: &str = "\
FAST School of Computing,,,,,
Final Date Sheet Spring 2025,,,,,
Day,Date,Code,09:00-12:00,Code,13:00-16:00
Saturday,45787,CS101,Programming Fundamentals,MA201,Calculus II
,,,,,
Monday,12/05/2025,CS201,Data Structures,,
Tuesday,\"Tuesday, 13 May 2025\",,,  ee101 ,Circuits
Wednesday,14/05/2025,,,,
Thursday,15-May-2025,SS150,Islamic Studies,CS301,Theory of Automata
Friday,09/05/2025,HS100,English,,
";

/// Escribe un fixture en el directorio temporal con un nombre único por test.
pub fn write_fixture(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("datesheet-{}-{}", std::process::id(), name));
    std::fs::write(&path, contents).expect("write fixture");
    path
}

pub fn text(s: &str) -> Cell {
    Cell::Text(s.to_string())
}

pub fn num(n: f64) -> Cell {
    Cell::Number(n)
}

/// Encabezado estándar en la columna 0 con las etiquetas dadas
pub fn header(morning: &str, afternoon: &str) -> Vec<Cell> {
    vec![text("Day"), text("Date"), text("Code"), text(morning), text("Code"), text(afternoon)]
}

pub fn sheet_with_rows(rows: Vec<Vec<Cell>>) -> RawSheet {
    let mut sheet: RawSheet = vec![vec![text("Final Date Sheet")], header("09:00-12:00", "13:00-16:00")];
    sheet.extend(rows);
    sheet
}
