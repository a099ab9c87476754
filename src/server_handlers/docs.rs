use actix_web::{HttpResponse, Responder};
use serde_json::json;

pub async fn help_handler() -> impl Responder {
    let help = json!({
        "description": "Consulta del calendario de exámenes finales por código de curso. GET / muestra el formulario; POST /lookup lo procesa. POST /api/lookup acepta JSON.",
        "post_example": {"codes": ["CS101", "MA201"]},
        "form_example": "/?n=3",
        "endpoints": {
            "GET /": "formulario (parámetro opcional n = cantidad de cursos, 1-20)",
            "POST /lookup": "formulario enviado (campos 'code' repetidos)",
            "POST /api/lookup": "consulta JSON",
            "GET /api/schedule": "resumen de la hoja cargada",
            "GET /help": "esta ayuda"
        },
        "note": "Los códigos se comparan sin distinguir mayúsculas ni espacios. Los códigos inexistentes se reportan en 'not_found' con una sugerencia si hay uno parecido."
    });

    HttpResponse::Ok().json(help)
}
