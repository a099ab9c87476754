//! Configuración desde variables de entorno (con `.env` opcional).
//!
//! | variable                   | uso                                         |
//! |----------------------------|---------------------------------------------|
//! | `DATESHEET_PATH`           | archivo de la hoja de exámenes              |
//! | `DATESHEET_DATA_DIR`       | directorio donde buscar la hoja             |
//! | `DATESHEET_SHEET`          | hoja interna del workbook                   |
//! | `DATESHEET_SKIP_BAD_DATES` | `1`/`true`/`yes` descarta filas con fecha inválida |
//! | `DATESHEET_BIND`           | dirección del servidor web                  |
//! | `DATESHEET_LOG`            | nivel de log (`error`..`trace`)             |

use log::LevelFilter;
use std::env;
use std::path::PathBuf;

use crate::excel::{DateErrorPolicy, LoadOptions};

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub schedule_path: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub sheet: Option<String>,
    pub date_policy: DateErrorPolicy,
    pub bind: String,
    pub log_level: LevelFilter,
    /// Valores inválidos encontrados al leer el entorno (se loguean después de
    /// inicializar el logger)
    pub warnings: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            schedule_path: None,
            data_dir: None,
            sheet: None,
            date_policy: DateErrorPolicy::Abort,
            bind: DEFAULT_BIND.to_string(),
            log_level: LevelFilter::Info,
            warnings: Vec::new(),
        }
    }
}

// load .env if present
fn load_dotenv() {
    let _ = dotenv::dotenv();
}

impl AppConfig {
    /// Lee la configuración del entorno del proceso.
    pub fn from_env() -> Self {
        load_dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables arbitraria.
    pub fn from_lookup<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut cfg = AppConfig::default();

        cfg.schedule_path = non_empty("DATESHEET_PATH").map(PathBuf::from);
        cfg.data_dir = non_empty("DATESHEET_DATA_DIR").map(PathBuf::from);
        cfg.sheet = non_empty("DATESHEET_SHEET");

        if let Some(v) = non_empty("DATESHEET_SKIP_BAD_DATES") {
            match parse_bool(&v) {
                Some(true) => cfg.date_policy = DateErrorPolicy::Skip,
                Some(false) => cfg.date_policy = DateErrorPolicy::Abort,
                None => cfg.warnings.push(format!("DATESHEET_SKIP_BAD_DATES='{}' is not a boolean, keeping abort policy", v)),
            }
        }

        if let Some(v) = non_empty("DATESHEET_BIND") {
            cfg.bind = v;
        }

        if let Some(v) = non_empty("DATESHEET_LOG") {
            match v.parse::<LevelFilter>() {
                Ok(level) => cfg.log_level = level,
                Err(_) => cfg.warnings.push(format!("DATESHEET_LOG='{}' is not a log level, using info", v)),
            }
        }

        cfg
    }

    /// Un argumento de línea de comandos tiene prioridad sobre `DATESHEET_PATH`.
    pub fn with_cli_path(mut self, path: Option<String>) -> Self {
        if let Some(p) = path.filter(|p| !p.trim().is_empty()) {
            self.schedule_path = Some(PathBuf::from(p));
        }
        self
    }

    pub fn log_warnings(&self) {
        for w in self.warnings.iter() {
            log::warn!("{}", w);
        }
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            sheet: self.sheet.clone(),
            date_policy: self.date_policy,
            ..LoadOptions::default()
        }
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn cfg_from(pairs: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = cfg_from(&[]);
        assert_eq!(cfg.bind, DEFAULT_BIND);
        assert_eq!(cfg.date_policy, DateErrorPolicy::Abort);
        assert_eq!(cfg.log_level, LevelFilter::Info);
        assert!(cfg.schedule_path.is_none());
    }

    #[test]
    fn reads_overrides_and_ignores_bad_values() {
        let cfg = cfg_from(&[
            ("DATESHEET_PATH", "sheet.xlsx"),
            ("DATESHEET_SKIP_BAD_DATES", "yes"),
            ("DATESHEET_LOG", "loud"),
            ("DATESHEET_BIND", "0.0.0.0:9000"),
        ]);
        assert_eq!(cfg.schedule_path, Some(PathBuf::from("sheet.xlsx")));
        assert_eq!(cfg.date_policy, DateErrorPolicy::Skip);
        assert_eq!(cfg.log_level, LevelFilter::Info);
        assert_eq!(cfg.bind, "0.0.0.0:9000");
        assert_eq!(cfg.warnings.len(), 1);
    }

    #[test]
    fn cli_path_wins() {
        let cfg = cfg_from(&[("DATESHEET_PATH", "env.xlsx")]).with_cli_path(Some("cli.csv".into()));
        assert_eq!(cfg.schedule_path, Some(PathBuf::from("cli.csv")));
    }
}
