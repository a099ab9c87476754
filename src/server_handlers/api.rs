use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use crate::lookup::format::format_date;
use crate::lookup::lookup;
use crate::server::{schedule_table, AppState};

#[derive(Debug, Deserialize)]
pub struct LookupRequest {
    #[serde(default)]
    pub codes: Vec<String>,
}

/// POST /api/lookup  `{"codes": ["CS101", "ma201"]}`
pub async fn api_lookup_handler(state: web::Data<AppState>, body: web::Json<LookupRequest>) -> impl Responder {
    let table = match schedule_table(state).await {
        Ok(t) => t,
        Err(e) => return HttpResponse::InternalServerError().json(json!({"error": format!("failed to load schedule: {}", e)})),
    };

    let outcome = lookup(&table, &body.codes);
    let exams: Vec<serde_json::Value> = outcome
        .matches
        .iter()
        .enumerate()
        .map(|(i, r)| json!({
            "no": i + 1,
            "date": format_date(r.date),
            "time": r.time_slot.label,
            "course_name": r.course_name,
        }))
        .collect();

    HttpResponse::Ok().json(json!({
        "status": if outcome.is_empty() { "no_exams_found" } else { "ok" },
        "exams": exams,
        "not_found": outcome.not_found,
    }))
}

/// GET /api/schedule
/// Resumen de la tabla cargada: franjas, cantidad de exámenes, rango de fechas
/// y filas descartadas.
pub async fn schedule_summary_handler(state: web::Data<AppState>) -> impl Responder {
    let table = match schedule_table(state).await {
        Ok(t) => t,
        Err(e) => return HttpResponse::InternalServerError().json(json!({"error": format!("failed to load schedule: {}", e)})),
    };

    let (morning, afternoon) = table.slots();
    let range = table.date_range().map(|(first, last)| json!({"first": format_date(first), "last": format_date(last)}));
    HttpResponse::Ok().json(json!({
        "source": table.source().map(|p| p.to_string_lossy().to_string()),
        "slots": [morning.label, afternoon.label],
        "records": table.len(),
        "courses": table.codes().count(),
        "date_range": range,
        "report": table.report(),
    }))
}
