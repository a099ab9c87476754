//! Consulta por código de curso sobre una `ScheduleTable`.
//!
//! Los códigos que no existen en la tabla no son un error: se devuelven en
//! `not_found` (con una sugerencia si hay un código parecido) y la consulta
//! sigue con los códigos válidos.

pub mod format;

use serde::Serialize;
use std::collections::BTreeSet;
use strsim::jaro_winkler;

use crate::excel::normalize_code;
use crate::models::{ExamRecord, ScheduleTable};

/// Similitud mínima (Jaro-Winkler) para sugerir un código conocido
pub const SUGGESTION_THRESHOLD: f64 = 0.85;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotFound {
    /// Código normalizado tal como se buscó
    pub code: String,
    pub suggestion: Option<String>,
}

/// Resultado de una consulta
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupOutcome {
    /// Códigos normalizados pedidos, sin vacíos ni repetidos, en orden de entrada
    pub requested: Vec<String>,
    pub matches: Vec<ExamRecord>,
    pub not_found: Vec<NotFound>,
}

impl LookupOutcome {
    /// Ningún código pedido tiene exámenes ("no exams found")
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn has_missing(&self) -> bool {
        !self.not_found.is_empty()
    }
}

/// Filtra la tabla por los códigos pedidos (sin distinguir mayúsculas ni
/// espacios). El orden de los resultados es el de la tabla (fecha, franja).
pub fn lookup<S: AsRef<str>>(table: &ScheduleTable, codes: &[S]) -> LookupOutcome {
    let mut requested: Vec<String> = Vec::new();
    for code in codes {
        let norm = normalize_code(code.as_ref());
        if !norm.is_empty() && !requested.contains(&norm) {
            requested.push(norm);
        }
    }

    let not_found: Vec<NotFound> = requested
        .iter()
        .filter(|c| !table.contains_code(c))
        .map(|c| NotFound { code: c.clone(), suggestion: suggest_code(table, c) })
        .collect();

    let wanted: BTreeSet<&str> = requested.iter().map(String::as_str).filter(|c| table.contains_code(c)).collect();
    let matches: Vec<ExamRecord> = table
        .records()
        .iter()
        .filter(|r| wanted.contains(r.course_code.as_str()))
        .cloned()
        .collect();

    if !not_found.is_empty() {
        log::debug!("codes not found: {:?}", not_found.iter().map(|n| &n.code).collect::<Vec<_>>());
    }

    LookupOutcome { requested, matches, not_found }
}

/// Código conocido más parecido a `code`, si supera `SUGGESTION_THRESHOLD`.
pub fn suggest_code(table: &ScheduleTable, code: &str) -> Option<String> {
    let mut best: Option<(f64, &str)> = None;
    for known in table.codes() {
        let score = jaro_winkler(code, known);
        match best {
            Some((best_score, _)) if best_score >= score => (),
            _ => best = Some((score, known)),
        }
    }
    best.filter(|(score, _)| *score >= SUGGESTION_THRESHOLD).map(|(_, c)| c.to_string())
}
