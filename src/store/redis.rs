use crate::domain::{ConfirmationToken, SubscriberEmail};
use crate::store::{confirmation_key, ConfirmationStore, StoreError};
use redis::aio::ConnectionManager;
use std::time::Duration;

/// [ConfirmationStore] backed by a Redis server.
///
/// # Description
///
/// Expiry is delegated to the server through `SET ... EX`, and consumption
/// maps to `GETDEL`, whose read-and-delete is atomic on the server side.
/// Every command runs under a bounded timeout so a stuck backend surfaces
/// as [StoreError::Unavailable] instead of hanging the request.
#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
    command_timeout: Duration,
}

impl RedisStore {
    /// Connect to the Redis server at `uri` and verify it answers a `PING`.
    pub async fn connect(uri: &str, command_timeout: Duration) -> Result<Self, anyhow::Error> {
        let client = redis::Client::open(uri)?;
        let mut connection = ConnectionManager::new(client).await?;

        redis::cmd("PING")
            .query_async::<_, String>(&mut connection)
            .await?;

        Ok(Self {
            connection,
            command_timeout,
        })
    }

    async fn run<T: redis::FromRedisValue>(
        &self,
        cmd: redis::Cmd,
    ) -> Result<T, StoreError> {
        let mut connection = self.connection.clone();
        tokio::time::timeout(self.command_timeout, cmd.query_async(&mut connection))
            .await
            .map_err(|_| {
                StoreError::Unavailable(anyhow::anyhow!(
                    "cache command timed out after {:?}",
                    self.command_timeout
                ))
            })?
            .map_err(classify)
    }
}

/// Connectivity problems are retryable and reported as such; anything else
/// is a plain failed operation.
fn classify(error: redis::RedisError) -> StoreError {
    if error.is_io_error() || error.is_connection_refusal() || error.is_connection_dropped() {
        StoreError::Unavailable(error.into())
    } else {
        StoreError::WriteFailed(error.into())
    }
}

#[async_trait::async_trait]
impl ConfirmationStore for RedisStore {
    async fn put(
        &self,
        token: &ConfirmationToken,
        email: &SubscriberEmail,
        ttl: Duration,
    ) -> Result<(), StoreError> {
        let mut cmd = redis::cmd("SET");
        cmd.arg(confirmation_key(token.as_ref()))
            .arg(email.as_ref())
            .arg("EX")
            // Redis rejects a zero expiry.
            .arg(ttl.as_secs().max(1));

        self.run::<()>(cmd).await
    }

    async fn resolve_and_consume(&self, token: &str) -> Result<String, StoreError> {
        let mut cmd = redis::cmd("GETDEL");
        cmd.arg(confirmation_key(token));

        match self.run::<Option<String>>(cmd).await? {
            Some(email) => Ok(email),
            None => Err(StoreError::NotFound),
        }
    }
}
