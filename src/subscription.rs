//! Module that includes the subscription workflow.
//!
//! # Description
//!
//! A subscription request moves through a short pipeline: the candidate
//! address is validated, a confirmation token is generated and stored with a
//! TTL, and the token is handed to the delivery hook. Confirmation is the
//! mirror image: the presented token is atomically resolved back to its
//! email and consumed, so each token works exactly once. Expired tokens are
//! removed by the cache backend itself and become indistinguishable from
//! tokens that never existed.

use crate::delivery::{DeliveryError, TokenDelivery};
use crate::domain::{ConfirmationToken, SubscriberEmail, TokenGenerationError};
use crate::store::{ConfirmationStore, StoreError};
use std::sync::Arc;
use std::time::Duration;

/// Errors raised while accepting a new subscription request.
#[derive(thiserror::Error, Debug)]
pub enum SubscribeError {
    /// The submitted address failed the syntactic checks. User-correctable.
    #[error("{0}")]
    InvalidEmail(String),
    #[error(transparent)]
    TokenGeneration(#[from] TokenGenerationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// Errors raised while confirming a subscription.
#[derive(thiserror::Error, Debug)]
pub enum ConfirmError {
    /// Unknown, expired, or already-consumed token. One uniform answer for
    /// all three, so callers cannot tell a stale token from a fabricated one.
    #[error("confirmation token is unknown, expired, or already used")]
    UnknownToken,
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for ConfirmError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => ConfirmError::UnknownToken,
            other => ConfirmError::Store(other),
        }
    }
}

/// Orchestrates validation, token issuance and confirmation.
///
/// Built once at startup and shared by every handler; all mutable state
/// lives in the cache backend, never in this struct.
pub struct SubscriptionWorkflow {
    store: Arc<dyn ConfirmationStore>,
    delivery: Arc<dyn TokenDelivery>,
    confirmation_ttl: Duration,
}

impl SubscriptionWorkflow {
    pub fn new(
        store: Arc<dyn ConfirmationStore>,
        delivery: Arc<dyn TokenDelivery>,
        confirmation_ttl: Duration,
    ) -> Self {
        Self {
            store,
            delivery,
            confirmation_ttl,
        }
    }

    /// Accept a subscription request for `email`.
    ///
    /// On success a pending confirmation exists in the store and the token
    /// has been handed to the delivery hook. A storage or delivery failure
    /// means no token was issued as far as the caller is concerned: the
    /// request can simply be resubmitted and will draw a fresh token.
    /// Repeated requests for the same address issue independent tokens,
    /// each one separately consumable.
    #[tracing::instrument(name = "Starting a new subscription", skip(self, email))]
    pub async fn start_subscription(
        &self,
        email: String,
    ) -> Result<SubscriberEmail, SubscribeError> {
        let email = SubscriberEmail::parse(email).map_err(SubscribeError::InvalidEmail)?;
        let token = ConfirmationToken::generate(ConfirmationToken::STANDARD_LENGTH)?;

        self.store
            .put(&token, &email, self.confirmation_ttl)
            .await?;
        self.delivery.deliver(&email, &token).await?;

        tracing::info!(subscriber_email = %email, "pending confirmation stored");

        Ok(email)
    }

    /// Confirm a subscription with a previously issued token.
    ///
    /// Exactly one confirmation attempt per token can succeed; the returned
    /// email is the input for whatever records the subscriber permanently.
    #[tracing::instrument(name = "Confirming a subscription", skip(self, token))]
    pub async fn confirm(&self, token: &str) -> Result<SubscriberEmail, ConfirmError> {
        let email = self.store.resolve_and_consume(token).await?;

        // The stored value was validated on the way in; reparse defensively
        // rather than trusting cache contents.
        let email = SubscriberEmail::parse(email).map_err(|_| ConfirmError::UnknownToken)?;

        tracing::info!(subscriber_email = %email, "subscription confirmed");

        Ok(email)
    }
}
