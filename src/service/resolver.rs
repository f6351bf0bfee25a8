use crate::domain::booking::BookingRecord;
use crate::domain::event::PaymentEvent;
use crate::error::PipelineError;
use crate::store::temp_store::TempStore;
use std::sync::Arc;
use std::time::Duration;

/// Two-tier recovery: full record from the temp store when the entry is
/// still there, degraded metadata reconstruction otherwise. Store trouble
/// of any kind is soft; only missing mandatory metadata is fatal.
#[derive(Clone)]
pub struct RecordResolver {
    pub store: Arc<dyn TempStore>,
    pub store_timeout: Duration,
}

impl RecordResolver {
    pub async fn resolve(&self, event: &PaymentEvent) -> Result<BookingRecord, PipelineError> {
        if let Some(key) = event.metadata.get("temp_session_id") {
            match tokio::time::timeout(self.store_timeout, self.store.take(key)).await {
                Ok(Ok(Some(record))) => {
                    tracing::info!(
                        session = %event.session_id,
                        documents = record.documents.len(),
                        "booking recovered from temp store"
                    );
                    return Ok(record);
                }
                Ok(Ok(None)) => {
                    tracing::warn!(
                        session = %event.session_id,
                        "temp entry consumed or expired, rebuilding from metadata"
                    );
                }
                Ok(Err(e)) => {
                    tracing::warn!(
                        session = %event.session_id,
                        "temp store failed ({}), rebuilding from metadata", e
                    );
                }
                Err(_) => {
                    tracing::warn!(
                        session = %event.session_id,
                        "temp store read timed out, rebuilding from metadata"
                    );
                }
            }
        }

        BookingRecord::from_metadata(event)
    }
}
