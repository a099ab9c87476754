use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Logger a stderr para los binarios. Llamarlo más de una vez no falla.
pub fn init_logging(level: LevelFilter) {
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    if TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto).is_err() {
        log::debug!("logger already initialized");
    }
}
