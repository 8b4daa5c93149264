//! Landing page and embedded static assets.
//!
//! The assets are compiled into the binary with `include_str!`, so the
//! deployable artifact is a single self-contained executable.

use actix_web::http::header::ContentType;
use actix_web::{get, web, HttpResponse};

const INDEX_HTML: &str = include_str!("../../static/index.html");
const APP_JS: &str = include_str!("../../static/app.js");
const STYLE_CSS: &str = include_str!("../../static/style.css");

/// Home page with the subscription form.
#[get("/")]
pub async fn home() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(INDEX_HTML)
}

/// Serve one of the embedded static assets.
#[get("/static/{asset}")]
pub async fn static_asset(asset: web::Path<String>) -> HttpResponse {
    match asset.as_str() {
        "index.html" => HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(INDEX_HTML),
        "app.js" => HttpResponse::Ok()
            .content_type("application/javascript; charset=utf-8")
            .body(APP_JS),
        "style.css" => HttpResponse::Ok()
            .content_type("text/css; charset=utf-8")
            .body(STYLE_CSS),
        _ => HttpResponse::NotFound().finish(),
    }
}
