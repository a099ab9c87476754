use actix_web::{web, App, HttpServer};
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::Result;
use crate::excel::{get_schedule_cached, LoadOptions};
use crate::models::ScheduleTable;
use crate::server_handlers::{api_lookup_handler, form_page_handler, form_submit_handler, help_handler, schedule_summary_handler};

/// Estado compartido por los handlers: qué archivo cargar y cómo. La tabla en
/// sí vive en el caché global de `excel::cache`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub schedule_path: PathBuf,
    pub options: LoadOptions,
}

impl AppState {
    pub fn new(schedule_path: PathBuf, options: LoadOptions) -> Self {
        AppState { schedule_path, options }
    }

    /// Tabla cacheada; se construye en la primera llamada.
    pub fn schedule(&self) -> Result<Arc<ScheduleTable>> {
        get_schedule_cached(&self.schedule_path, &self.options)
    }
}

/// `schedule()` desde un handler. La primera carga (o el reintento tras una
/// carga fallida) lee el archivo con el Mutex del caché tomado, así que corre
/// en el pool de `web::block` y no en un worker del executor.
pub async fn schedule_table(state: web::Data<AppState>) -> std::result::Result<Arc<ScheduleTable>, String> {
    match web::block(move || state.schedule()).await {
        Ok(Ok(table)) => Ok(table),
        Ok(Err(e)) => Err(e.to_string()),
        Err(e) => Err(format!("blocking task failed: {}", e)),
    }
}

/// Rutas de la aplicación (se reutiliza en los tests con `actix_web::test`)
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(form_page_handler))
        .route("/lookup", web::post().to(form_submit_handler))
        .route("/api/lookup", web::post().to(api_lookup_handler))
        .route("/api/schedule", web::get().to(schedule_summary_handler))
        .route("/help", web::get().to(help_handler));
}

pub async fn run_server(state: AppState, bind_addr: &str) -> std::io::Result<()> {
    let data = web::Data::new(state);
    log::info!("listening on http://{}", bind_addr);
    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .configure(configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}
