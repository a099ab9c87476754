// --- Consulta de exámenes finales - formulario web ---
//
// Uso: datesheet-web [RUTA_HOJA]

use std::process::ExitCode;

use datesheet::config::AppConfig;
use datesheet::logging::init_logging;
use datesheet::resolve_schedule_path;
use datesheet::server::{run_server, AppState};

#[tokio::main]
async fn main() -> ExitCode {
    let cfg = AppConfig::from_env().with_cli_path(std::env::args().nth(1));
    init_logging(cfg.log_level);
    cfg.log_warnings();

    let path = match resolve_schedule_path(cfg.schedule_path.as_deref(), cfg.data_dir.as_deref()) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Primera carga antes de escuchar: una hoja inválida no debe levantar el servidor
    let state = AppState::new(path, cfg.load_options());
    match state.schedule() {
        Ok(table) => log::info!("{} exams ready", table.len()),
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    }

    println!("=== Final-Exam Lookup (web) ===");
    println!("Iniciando servidor en http://{}", cfg.bind);
    match run_server(state, &cfg.bind).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
