//! Module that includes the subscription confirmation endpoint.

use crate::routes::ApiResponse;
use crate::subscription::{ConfirmError, SubscriptionWorkflow};
use actix_web::{get, web, HttpResponse};
use serde::Deserialize;

#[derive(Deserialize)]
struct Parameters {
    token: String,
}

/// Get endpoint to confirm a pending subscription.
///
/// # Description
///
/// The token is consumed on the first successful confirmation; presenting
/// it a second time answers 404 exactly like a token that never existed or
/// expired. A missing `token` parameter is rejected by the extractor with
/// a 400.
#[tracing::instrument(name = "Confirming a pending subscription", skip(parameters, workflow))]
#[get("/api/confirm")]
pub async fn confirm(
    parameters: web::Query<Parameters>,
    workflow: web::Data<SubscriptionWorkflow>,
) -> HttpResponse {
    match workflow.confirm(&parameters.token).await {
        Ok(email) => {
            HttpResponse::Ok().json(ApiResponse::message(format!("{} is now subscribed", email)))
        }
        Err(ConfirmError::UnknownToken) => HttpResponse::NotFound().json(ApiResponse::message(
            "The confirmation token is unknown or expired",
        )),
        Err(ConfirmError::Store(e)) => {
            tracing::error!("Failed to resolve the confirmation token: {:?}", e);
            HttpResponse::InternalServerError()
                .json(ApiResponse::message("Something unexpected happened"))
        }
    }
}
