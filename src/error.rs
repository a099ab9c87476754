//! Errores de carga del calendario de exámenes.
//!
//! Todos los errores aquí son fatales para la carga en curso. Un código de
//! curso no encontrado NO es un error: se reporta como dato en
//! `lookup::LookupOutcome::not_found`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("schedule file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("unsupported file format '{extension}' for {} (expected xlsx, xlsm, xlsb, xls, ods or csv)", .path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("failed to read {}: {message}", .path.display())]
    Read { path: PathBuf, message: String },

    #[error("sheet does not match the expected date-sheet layout: {0}")]
    FormatError(String),

    #[error("row {row}: cannot parse date '{value}'")]
    DateParseError { row: usize, value: String },
}

impl ScheduleError {
    pub fn read(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        ScheduleError::Read { path: path.into(), message: message.to_string() }
    }

    pub fn format(message: impl Into<String>) -> Self {
        ScheduleError::FormatError(message.into())
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
