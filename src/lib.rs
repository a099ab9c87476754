// Biblioteca raíz del crate `datesheet`.
// Carga la hoja de exámenes finales (dos franjas por día), la normaliza a una
// tabla larga y permite consultarla por código de curso desde la terminal
// (`cli`) o desde un formulario web (`server`).
pub mod error;
pub mod models;
pub mod excel;
pub mod lookup;
pub mod config;
pub mod logging;
pub mod cli;
pub mod server;
mod server_handlers;

pub use error::{Result, ScheduleError};
pub use excel::{load_schedule, normalize_code, resolve_schedule_path, DateErrorPolicy, LoadOptions, SheetSchema};
pub use lookup::{lookup, LookupOutcome};
pub use models::{ExamRecord, ScheduleTable, TimeSlot};
/// Ejecuta el servidor HTTP (reexport para facilitar uso desde el binario web)
pub use server::run_server;

use config::AppConfig;

/// Resuelve la ruta según la configuración y carga la tabla. Es el paso común
/// de ambos binarios antes de empezar a atender consultas.
pub fn load_from_config(cfg: &AppConfig) -> Result<(std::path::PathBuf, ScheduleTable)> {
    let path = resolve_schedule_path(cfg.schedule_path.as_deref(), cfg.data_dir.as_deref())?;
    let table = load_schedule(&path, &cfg.load_options())?;
    Ok((path, table))
}
