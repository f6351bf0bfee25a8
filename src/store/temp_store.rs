use crate::domain::booking::BookingRecord;
use crate::error::PipelineError;
use std::time::Duration;

#[async_trait::async_trait]
pub trait TempStore: Send + Sync {
    async fn put(
        &self,
        session_key: &str,
        record: &BookingRecord,
        ttl: Duration,
    ) -> Result<(), PipelineError>;

    /// Atomic read-and-delete: a key is retrievable at most once.
    async fn take(&self, session_key: &str) -> Result<Option<BookingRecord>, PipelineError>;

    async fn del(&self, session_key: &str) -> Result<(), PipelineError>;
}

#[derive(Clone)]
pub struct RedisTempStore {
    pub client: redis::Client,
}

impl RedisTempStore {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }

    fn entry_key(session_key: &str) -> String {
        format!("booking:temp:{}", session_key)
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, PipelineError> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| PipelineError::StoreUnavailable(e.to_string()))
    }
}

#[async_trait::async_trait]
impl TempStore for RedisTempStore {
    async fn put(
        &self,
        session_key: &str,
        record: &BookingRecord,
        ttl: Duration,
    ) -> Result<(), PipelineError> {
        let payload = serde_json::to_string(record)
            .map_err(|e| PipelineError::StoreUnavailable(e.to_string()))?;
        let mut conn = self.connection().await?;
        let _: () = redis::cmd("SET")
            .arg(Self::entry_key(session_key))
            .arg(payload)
            .arg("EX")
            .arg(ttl.as_secs())
            .query_async(&mut conn)
            .await
            .map_err(|e| PipelineError::StoreUnavailable(e.to_string()))?;
        Ok(())
    }

    async fn take(&self, session_key: &str) -> Result<Option<BookingRecord>, PipelineError> {
        let mut conn = self.connection().await?;
        // GETDEL keeps the read-and-consume a single operation, so two
        // racing resolutions cannot both observe the entry.
        let payload: Option<String> = redis::cmd("GETDEL")
            .arg(Self::entry_key(session_key))
            .query_async(&mut conn)
            .await
            .map_err(|e| PipelineError::StoreUnavailable(e.to_string()))?;

        match payload {
            Some(payload) => serde_json::from_str(&payload)
                .map(Some)
                .map_err(|e| PipelineError::StoreUnavailable(e.to_string())),
            None => Ok(None),
        }
    }

    async fn del(&self, session_key: &str) -> Result<(), PipelineError> {
        let mut conn = self.connection().await?;
        let _: usize = redis::cmd("DEL")
            .arg(Self::entry_key(session_key))
            .query_async(&mut conn)
            .await
            .map_err(|e| PipelineError::StoreUnavailable(e.to_string()))?;
        Ok(())
    }
}
