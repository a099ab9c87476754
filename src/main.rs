// --- Consulta de exámenes finales - CLI interactiva ---
//
// Uso: datesheet [RUTA_HOJA]

use std::io;
use std::process::ExitCode;

use datesheet::cli::run_session;
use datesheet::config::AppConfig;
use datesheet::load_from_config;
use datesheet::logging::init_logging;

fn main() -> ExitCode {
    let cfg = AppConfig::from_env().with_cli_path(std::env::args().nth(1));
    init_logging(cfg.log_level);
    cfg.log_warnings();

    let (path, table) = match load_from_config(&cfg) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("=== Final-Exam Lookup ===");
    println!("{} exams loaded from {}", table.len(), path.display());

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    match run_session(&table, &mut input, &mut output) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
