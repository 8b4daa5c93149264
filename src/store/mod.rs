//! Pending-confirmation storage.
//!
//! A subscription that has been requested but not yet confirmed lives as a
//! single token-to-email entry in a TTL-capable key/value cache. The
//! [ConfirmationStore] trait is the contract the rest of the application
//! codes against; two implementations are provided: [RedisStore] for
//! production and [InMemoryStore] for tests and single-process deployments.

use crate::domain::{ConfirmationToken, SubscriberEmail};
use std::time::Duration;

mod memory;
mod redis;

pub use self::redis::RedisStore;
pub use memory::InMemoryStore;

/// Namespace prefix for all keys of this application.
const KEY_NAMESPACE: &str = "newsletter";

/// Build the cache key for a confirmation token.
///
/// Keys are scoped under `newsletter:confirm:` so they never collide with
/// unrelated usage of a shared cache instance.
pub fn confirmation_key(token: &str) -> String {
    format!("{}:confirm:{}", KEY_NAMESPACE, token)
}

/// Errors raised by a [ConfirmationStore] backend.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// The token does not exist, expired, or has already been consumed.
    /// The three causes are deliberately indistinguishable so a caller
    /// cannot probe whether a fabricated token was ever valid.
    #[error("confirmation token is unknown, expired, or already used")]
    NotFound,
    /// The backend could not be reached or a command timed out.
    #[error("cache backend is unavailable")]
    Unavailable(#[source] anyhow::Error),
    /// The backend answered but the operation failed.
    #[error("cache backend operation failed")]
    WriteFailed(#[source] anyhow::Error),
}

/// Contract over an external TTL-capable key/value cache.
#[async_trait::async_trait]
pub trait ConfirmationStore: Send + Sync {
    /// Store the token-to-email mapping with the given time to live.
    ///
    /// After `ttl` elapses the backend removes the entry on its own; no
    /// sweeping is performed by this application.
    async fn put(
        &self,
        token: &ConfirmationToken,
        email: &SubscriberEmail,
        ttl: Duration,
    ) -> Result<(), StoreError>;

    /// Atomically resolve a token to its email and delete the entry.
    ///
    /// The read and the delete happen as one logical operation: when several
    /// confirmation attempts race on the same token, exactly one succeeds
    /// and all others observe [StoreError::NotFound].
    async fn resolve_and_consume(&self, token: &str) -> Result<String, StoreError>;
}
