use crate::routes::ApiResponse;
use actix_web::{get, HttpResponse, Responder};

/// Root endpoint of the JSON API.
#[get("/api/")]
pub async fn api_root() -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::message(
        "Welcome to the newsletter subscription API",
    ))
}
