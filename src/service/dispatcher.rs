use crate::domain::booking::BookingRecord;
use crate::domain::event::PaymentEvent;
use crate::domain::report::{FanOutReport, SinkStatus};
use crate::error::PipelineError;
use crate::sinks::mailer::{guest_confirmation_html, owner_summary_html};
use crate::sinks::{LedgerSink, Mailer};
use std::sync::Arc;
use std::time::Duration;

/// Ordered fan-out: ledger first (fatal), then owner and guest emails
/// (best-effort, each bounded by its own timeout). The ledger runs first
/// because losing the audit rows is the least acceptable outcome.
#[derive(Clone)]
pub struct FanOutDispatcher {
    pub ledger: Arc<dyn LedgerSink>,
    pub mailer: Arc<dyn Mailer>,
    pub owner_email: String,
    pub ledger_timeout: Duration,
    pub notify_timeout: Duration,
}

impl FanOutDispatcher {
    pub async fn dispatch(
        &self,
        event: &PaymentEvent,
        record: &BookingRecord,
    ) -> Result<FanOutReport, PipelineError> {
        // A hung ledger write counts as failure, so the provider
        // redelivers instead of the invocation hanging.
        match tokio::time::timeout(self.ledger_timeout, self.ledger.append(event, record)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(PipelineError::Ledger(e.to_string())),
            Err(_) => return Err(PipelineError::Ledger("timed out".to_string())),
        }

        let owner_notification = self.send_owner(event, record).await;
        let guest_notification = self.send_guest(event, record).await;

        Ok(FanOutReport {
            ledger: SinkStatus::Success,
            owner_notification,
            guest_notification,
        })
    }

    /// Notification-only dispatch for the manual replay path. The ledger
    /// is never touched, so a replay cannot duplicate audit rows.
    pub async fn dispatch_notifications(
        &self,
        event: &PaymentEvent,
        record: &BookingRecord,
    ) -> FanOutReport {
        FanOutReport {
            ledger: SinkStatus::Skipped("retry path".to_string()),
            owner_notification: self.send_owner(event, record).await,
            guest_notification: self.send_guest(event, record).await,
        }
    }

    async fn send_owner(&self, event: &PaymentEvent, record: &BookingRecord) -> SinkStatus {
        let subject = format!("Booking confirmed: {} {}", record.apartment, record.checkin_date);
        let send = async {
            let body = owner_summary_html(record);
            self.mailer.send(&self.owner_email, &subject, body).await
        };
        self.run_sink("owner", &event.session_id, send).await
    }

    async fn send_guest(&self, event: &PaymentEvent, record: &BookingRecord) -> SinkStatus {
        let Some(recipient) = event.customer_email.as_deref().filter(|e| !e.is_empty()) else {
            return SinkStatus::Skipped("no recipient".to_string());
        };
        let subject = format!("Your booking for {} is confirmed", record.checkin_date);
        let send = async {
            let body = guest_confirmation_html(record);
            self.mailer.send(recipient, &subject, body).await
        };
        self.run_sink("guest", &event.session_id, send).await
    }

    async fn run_sink<F>(&self, sink: &str, session_id: &str, send: F) -> SinkStatus
    where
        F: std::future::Future<Output = anyhow::Result<()>>,
    {
        match tokio::time::timeout(self.notify_timeout, send).await {
            Ok(Ok(())) => SinkStatus::Success,
            Ok(Err(e)) => {
                tracing::warn!(sink, session = %session_id, "notification failed: {}", e);
                SinkStatus::Failed(e.to_string())
            }
            Err(_) => {
                tracing::warn!(sink, session = %session_id, "notification timed out");
                SinkStatus::Failed("timed out".to_string())
            }
        }
    }
}
