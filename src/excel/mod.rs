//! Módulo `excel`: lectura y normalización de la hoja de exámenes (date sheet).
//!
//! Submódulos:
//! - `io`: lectura de workbooks (calamine) y CSV a una hoja cruda de `Cell`
//! - `schema`: layout de la hoja (marcador de encabezado y columnas)
//! - `dates`: parseo de fechas (serial de planilla o texto día-primero)
//! - `normalizer`: hoja cruda → `ScheduleTable` en formato largo
//! - `cache`: caché global de tablas ya cargadas (servidor web)

pub mod io;
pub mod schema;
pub mod dates;
pub mod normalizer;
pub mod cache;

pub use cache::get_schedule_cached;
pub use normalizer::{normalize_code, normalize_sheet, DateErrorPolicy};
pub use schema::SheetSchema;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ScheduleError};
use crate::models::ScheduleTable;

/// Directorio por defecto con los archivos de datos (relativo al CWD)
pub const DATAFILES_DIR: &str = "datafiles";

/// Palabras clave para reconocer la hoja de exámenes dentro del directorio de datos
pub const DATESHEET_KEYWORDS: &[&str] = &["date sheet", "datesheet", "date_sheet", "date-sheet", "exam"];

/// Formatos aceptados según extensión
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Workbook,
    Csv,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<SourceFormat> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(SourceFormat::Workbook),
            "csv" => Ok(SourceFormat::Csv),
            _ => Err(ScheduleError::UnsupportedFormat { path: path.to_path_buf(), extension: ext }),
        }
    }
}

/// Opciones de carga: hoja a leer, layout esperado y política ante fechas inválidas
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub sheet: Option<String>,
    pub schema: SheetSchema,
    pub date_policy: DateErrorPolicy,
}

/// Lee el archivo (workbook o CSV) como hoja cruda.
pub fn load_raw_sheet(path: &Path, sheet: Option<&str>) -> Result<io::RawSheet> {
    let format = SourceFormat::from_path(path)?;
    if !path.is_file() {
        return Err(ScheduleError::FileNotFound(path.to_path_buf()));
    }
    match format {
        SourceFormat::Workbook => io::read_workbook_sheet(path, sheet),
        SourceFormat::Csv => io::read_csv_sheet(path),
    }
}

/// Carga y normaliza la hoja de exámenes en un solo paso.
pub fn load_schedule(path: &Path, options: &LoadOptions) -> Result<ScheduleTable> {
    log::info!("loading exam schedule from {}", path.display());
    let raw = load_raw_sheet(path, options.sheet.as_deref())?;
    let table = normalize_sheet(&raw, &options.schema, options.date_policy)?;
    Ok(table.with_source(path))
}

/// Resuelve la ruta de la hoja de exámenes:
/// 1. `explicit` (argumento de línea de comandos o `DATESHEET_PATH`)
/// 2. el archivo más reciente del directorio de datos cuyo nombre contenga
///    alguna de `DATESHEET_KEYWORDS`
///
/// Una ruta explícita inexistente es `FileNotFound` (no se cae al directorio).
pub fn resolve_schedule_path(explicit: Option<&Path>, data_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = explicit {
        if p.is_file() {
            return Ok(p.to_path_buf());
        }
        // nombre suelto: buscarlo dentro del directorio de datos
        if p.components().count() == 1 {
            let candidate = get_datafiles_dir(data_dir).join(p);
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
        return Err(ScheduleError::FileNotFound(p.to_path_buf()));
    }

    let dir = get_datafiles_dir(data_dir);
    latest_file_matching(&dir, DATESHEET_KEYWORDS).ok_or_else(|| ScheduleError::FileNotFound(dir.join("<date sheet>")))
}

/// Directorio de datos: el indicado, o el primero que exista entre
/// `./datafiles` y `./src/datafiles`.
pub fn get_datafiles_dir(preferred: Option<&Path>) -> PathBuf {
    if let Some(p) = preferred {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let candidates = [cwd.join(DATAFILES_DIR), cwd.join("src").join(DATAFILES_DIR)];
    for candidate in candidates.iter() {
        if candidate.is_dir() {
            log::debug!("datafiles found at {}", candidate.display());
            return candidate.clone();
        }
    }
    cwd.join(DATAFILES_DIR)
}

/// Archivo más reciente del directorio cuyo nombre contenga alguna keyword y
/// tenga una extensión soportada. Ignora ocultos, temporales y `*_TEST`.
pub fn latest_file_matching(dir: &Path, keywords: &[&str]) -> Option<PathBuf> {
    let read = fs::read_dir(dir).ok()?;

    let mut best: Option<(std::time::SystemTime, PathBuf)> = None;
    for entry in read.flatten() {
        let p = entry.path();
        if !p.is_file() { continue; }
        let name_raw = match p.file_name().and_then(|s| s.to_str()) { Some(s) => s.to_string(), None => continue };
        // ignore hidden or temporary files (editor temp like ~$sheet.xlsx, backup files ending with ~, etc.)
        if name_raw.starts_with('.') || name_raw.starts_with('~') || name_raw.ends_with('~') { continue; }
        if name_raw.to_uppercase().contains("_TEST") { continue; }
        if SourceFormat::from_path(&p).is_err() { continue; }

        let name = name_raw.to_lowercase();
        if !keywords.iter().any(|kw| name.contains(&kw.to_lowercase())) { continue; }

        let modified = match entry.metadata().and_then(|m| m.modified()) {
            Ok(m) => m,
            Err(_) => continue,
        };
        match &best {
            Some((best_time, _)) if *best_time >= modified => (),
            _ => best = Some((modified, p.clone())),
        }
    }

    best.map(|(_, p)| p)
}
