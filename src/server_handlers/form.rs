use actix_web::{http::header::ContentType, web, HttpResponse, Responder};
use std::collections::HashMap;

use crate::lookup::format::{escape_html, render_outcome_html};
use crate::lookup::lookup;
use crate::server::{schedule_table, AppState};

/// Máximo de campos de código en el formulario
pub const MAX_FORM_CODES: usize = 20;

fn parse_count(raw: Option<&String>) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .map(|n| n.clamp(1, MAX_FORM_CODES))
        .unwrap_or(1)
}

/// Página completa: selector de cantidad, N campos de código y, si hay, el
/// bloque de resultado.
pub fn render_page(n: usize, codes: &[String], result_html: Option<&str>) -> String {
    let mut fields = String::new();
    for i in 0..n {
        let value = codes.get(i).map(|c| escape_html(c)).unwrap_or_default();
        fields.push_str(&format!(
            "<label>Course code #{} <input type=\"text\" name=\"code\" value=\"{}\"></label><br>\n",
            i + 1,
            value
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Final-Exam Lookup</title></head>
<body>
<h1>Final-Exam Lookup</h1>
<form method="get" action="/">
<label>How many courses to look up? <input type="number" name="n" min="1" max="{max}" value="{n}"></label>
<button type="submit">Update</button>
</form>
<form method="post" action="/lookup">
<input type="hidden" name="n" value="{n}">
{fields}<button type="submit">Show My Schedule</button>
</form>
{result}
</body>
</html>
"#,
        max = MAX_FORM_CODES,
        n = n,
        fields = fields,
        result = result_html.unwrap_or(""),
    )
}

fn html(status: actix_web::http::StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status).content_type(ContentType::html()).body(body)
}

/// GET /?n=3
pub async fn form_page_handler(query: web::Query<HashMap<String, String>>) -> impl Responder {
    let n = parse_count(query.get("n"));
    html(actix_web::http::StatusCode::OK, render_page(n, &[], None))
}

/// POST /lookup (form-urlencoded, campos `code` repetidos)
pub async fn form_submit_handler(state: web::Data<AppState>, form: web::Form<Vec<(String, String)>>) -> impl Responder {
    let pairs = form.into_inner();
    let codes: Vec<String> = pairs.iter().filter(|(k, _)| k == "code").map(|(_, v)| v.clone()).collect();
    let n_field = pairs.iter().find(|(k, _)| k == "n").map(|(_, v)| v.clone());
    let n = parse_count(n_field.as_ref()).max(codes.len().min(MAX_FORM_CODES));

    let table = match schedule_table(state).await {
        Ok(t) => t,
        Err(e) => {
            log::error!("failed to load schedule: {}", e);
            let msg = format!("<p class=\"error\">Cannot load the exam schedule: {}</p>", escape_html(&e));
            return html(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR, render_page(n, &codes, Some(msg.as_str())));
        }
    };

    let outcome = lookup(&table, &codes);
    let result = render_outcome_html(&outcome);
    html(actix_web::http::StatusCode::OK, render_page(n, &codes, Some(result.as_str())))
}
