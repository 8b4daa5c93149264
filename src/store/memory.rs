use crate::domain::{ConfirmationToken, SubscriberEmail};
use crate::store::{confirmation_key, ConfirmationStore, StoreError};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

struct PendingEntry {
    email: String,
    expires_at: Instant,
}

/// In-process [ConfirmationStore] with lazy per-entry expiry.
///
/// Entries past their deadline are treated as absent and dropped whenever
/// they are touched; nothing sweeps in the background. Consumption removes
/// the entry under the write lock, so concurrent confirmations of the same
/// token cannot both succeed.
#[derive(Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, PendingEntry>>,
}

impl InMemoryStore {
    /// Keys of all live (non-expired) pending confirmations.
    pub async fn pending_keys(&self) -> Vec<String> {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .iter()
            .filter(|(_, entry)| entry.expires_at > now)
            .map(|(key, _)| key.clone())
            .collect()
    }
}

#[async_trait::async_trait]
impl ConfirmationStore for InMemoryStore {
    async fn put(
        &self,
        token: &ConfirmationToken,
        email: &SubscriberEmail,
        ttl: Duration,
    ) -> Result<(), StoreError> {
        let entry = PendingEntry {
            email: email.as_ref().to_string(),
            expires_at: Instant::now() + ttl,
        };
        self.entries
            .write()
            .await
            .insert(confirmation_key(token.as_ref()), entry);

        Ok(())
    }

    async fn resolve_and_consume(&self, token: &str) -> Result<String, StoreError> {
        let removed = self
            .entries
            .write()
            .await
            .remove(&confirmation_key(token));

        match removed {
            Some(entry) if entry.expires_at > Instant::now() => Ok(entry.email),
            // An expired entry answers exactly like a missing one.
            _ => Err(StoreError::NotFound),
        }
    }
}
