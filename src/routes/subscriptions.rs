//! Module that includes the subscription endpoint.
//!
//! # Description
//!
//! This module adds the endpoint that allows new clients to request a
//! subscription to the newsletter. A request only creates a pending
//! confirmation; the subscription becomes effective once the emitted token
//! is presented back on the confirmation endpoint.

use crate::routes::ApiResponse;
use crate::subscription::{SubscribeError, SubscriptionWorkflow};
use actix_web::{post, web, HttpResponse};
use serde::Deserialize;

/// Payload of the subscription request.
#[derive(Deserialize)]
struct SubscriptionRequest {
    email: String,
}

/// Post endpoint to request a newsletter subscription.
///
/// # Description
///
/// On success the submitted address is echoed back and a pending
/// confirmation now exists server-side; the confirmation token itself never
/// travels in the response. Error answers carry a generic message only, the
/// detailed cause goes to the log.
///
/// The body is decoded by hand: a payload that is not valid JSON answers
/// with a 500, keeping the behaviour of the service this one replaces.
#[tracing::instrument(name = "Adding a new subscriber", skip(body, workflow))]
#[post("/api/create")]
pub async fn create_subscription(
    body: web::Bytes,
    workflow: web::Data<SubscriptionWorkflow>,
) -> HttpResponse {
    let request: SubscriptionRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::error!("Failed to parse the request body: {:?}", e);
            return HttpResponse::InternalServerError()
                .json(ApiResponse::message("Unable to parse the request"));
        }
    };

    match workflow.start_subscription(request.email).await {
        Ok(email) => HttpResponse::Ok().json(ApiResponse::message(email.as_ref())),
        Err(SubscribeError::InvalidEmail(cause)) => {
            tracing::warn!("Rejected subscription request: {}", cause);
            HttpResponse::BadRequest().json(ApiResponse::message(cause))
        }
        Err(SubscribeError::TokenGeneration(e)) => {
            tracing::error!("Failed to generate a confirmation token: {:?}", e);
            HttpResponse::InternalServerError()
                .json(ApiResponse::message("Unable to generate token"))
        }
        Err(SubscribeError::Store(e)) => {
            tracing::error!("Failed to store the pending confirmation: {:?}", e);
            HttpResponse::InternalServerError()
                .json(ApiResponse::message("Unable to store token in cache"))
        }
        Err(SubscribeError::Delivery(e)) => {
            tracing::error!("Failed to deliver the confirmation token: {:?}", e);
            HttpResponse::InternalServerError()
                .json(ApiResponse::message("Unable to deliver the token"))
        }
    }
}
