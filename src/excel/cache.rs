//! Caché en memoria de la tabla de exámenes ya parseada.
//!
//! La usa el servidor web: la primera petición construye la tabla y las
//! siguientes reciben el mismo `Arc`.
//!
//! Key notes:
//! - la clave es la ruta del archivo tal como la resolvió `resolve_schedule_path`.
//! - el Mutex se mantiene tomado durante toda la construcción, así que nunca
//!   hay dos cargas simultáneas del mismo (ni de otro) archivo.
//! - una carga fallida no se guarda; la siguiente petición lo reintenta.
//! - la carga hace I/O bloqueante con el lock tomado: desde código async se
//!   llama vía `server::schedule_table` (`web::block`).
//! - las entradas no se modifican nunca después de insertarse.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use crate::error::Result;
use crate::excel::{load_schedule, LoadOptions};
use crate::models::ScheduleTable;

static SCHEDULE_CACHE: OnceLock<Mutex<HashMap<PathBuf, Arc<ScheduleTable>>>> = OnceLock::new();

/// Devuelve la tabla del archivo indicado, cargándola sólo la primera vez.
pub fn get_schedule_cached(path: &Path, options: &LoadOptions) -> Result<Arc<ScheduleTable>> {
    let cache = SCHEDULE_CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    // un panic durante una carga previa no deja datos a medio escribir
    let mut guard = cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    if let Some(existing) = guard.get(path) {
        log::debug!("schedule cache hit for {}", path.display());
        return Ok(Arc::clone(existing));
    }

    let table = Arc::new(load_schedule(path, options)?);
    guard.insert(path.to_path_buf(), Arc::clone(&table));
    Ok(table)
}

/// Indica si la ruta ya tiene una tabla en caché.
pub fn is_cached(path: &Path) -> bool {
    SCHEDULE_CACHE
        .get()
        .map(|c| c.lock().unwrap_or_else(|p| p.into_inner()).contains_key(path))
        .unwrap_or(false)
}
