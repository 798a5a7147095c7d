use std::env;

use actix_cors::Cors;
use actix_web::http::header;

const DEV_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// CORS for the browser front end. Origins come from the comma-separated
/// `CORS_ALLOWED_ORIGINS`; without any valid entry only the local dev
/// server is allowed.
pub fn cors_middleware() -> Cors {
    let origins = allowed_origins(&env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers(vec![
            header::HeaderName::from_static("x-trace-id"),
            header::HeaderName::from_static("x-request-id"),
        ])
        .max_age(3600);

    for origin in origins {
        cors = cors.allowed_origin(&origin);
    }
    cors
}

fn allowed_origins(raw: &str) -> Vec<String> {
    let parsed: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(|s| s.trim_end_matches('/').to_string())
        .collect();

    if parsed.is_empty() {
        DEV_ORIGINS.iter().map(|s| s.to_string()).collect()
    } else {
        parsed
    }
}
