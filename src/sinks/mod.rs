use crate::domain::booking::BookingRecord;
use crate::domain::event::PaymentEvent;
use anyhow::Result;

pub mod ledger;
pub mod mailer;

/// The durable audit sink: one row per guest. The only sink whose failure
/// aborts a dispatch.
#[async_trait::async_trait]
pub trait LedgerSink: Send + Sync {
    async fn append(&self, event: &PaymentEvent, record: &BookingRecord) -> Result<()>;
}

#[async_trait::async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html_body: String) -> Result<()>;
}
