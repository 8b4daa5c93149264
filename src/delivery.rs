//! Token delivery hook.
//!
//! The workflow never returns the confirmation token to the HTTP caller:
//! how the token reaches the subscriber is a separate concern, hidden
//! behind [TokenDelivery]. No email integration is wired up yet, so the
//! default implementation only records the issuance in the log; an email
//! client (or any out-of-band channel) can be plugged in later without
//! touching the workflow.

use crate::domain::{ConfirmationToken, SubscriberEmail};

/// Raised when a delivery channel fails to hand over the token.
#[derive(thiserror::Error, Debug)]
#[error("failed to deliver the confirmation token")]
pub struct DeliveryError(#[source] pub anyhow::Error);

/// Channel through which an issued confirmation token leaves the workflow.
#[async_trait::async_trait]
pub trait TokenDelivery: Send + Sync {
    async fn deliver(
        &self,
        recipient: &SubscriberEmail,
        token: &ConfirmationToken,
    ) -> Result<(), DeliveryError>;
}

/// Delivery that goes nowhere: the issuance is logged and that is all.
pub struct LogDelivery;

#[async_trait::async_trait]
impl TokenDelivery for LogDelivery {
    async fn deliver(
        &self,
        recipient: &SubscriberEmail,
        token: &ConfirmationToken,
    ) -> Result<(), DeliveryError> {
        // The raw token is a credential; keep it out of production log levels.
        tracing::debug!(
            recipient = %recipient,
            token = %token.as_ref(),
            "confirmation token issued; no delivery channel is configured"
        );
        Ok(())
    }
}
