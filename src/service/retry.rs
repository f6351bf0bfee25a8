use crate::domain::event::PaymentEvent;
use crate::domain::report::FanOutReport;
use crate::error::PipelineError;
use crate::provider::ProviderClient;
use crate::service::dispatcher::FanOutDispatcher;
use crate::service::resolver::RecordResolver;
use std::sync::Arc;

/// Manual re-entry point. Authenticates by looking the session up at the
/// provider instead of checking a signature, then re-runs only the
/// notification half of the fan-out.
#[derive(Clone)]
pub struct RetryCoordinator {
    pub provider: Arc<dyn ProviderClient>,
    pub resolver: RecordResolver,
    pub dispatcher: FanOutDispatcher,
}

impl RetryCoordinator {
    pub async fn retry(&self, provider_session_id: &str) -> Result<FanOutReport, PipelineError> {
        let session = self
            .provider
            .fetch_session(provider_session_id)
            .await?
            .ok_or_else(|| PipelineError::SessionNotFound(provider_session_id.to_string()))?;

        if session.payment_status != "paid" {
            return Err(PipelineError::PaymentNotCompleted(session.payment_status));
        }

        let event = PaymentEvent::from_session(session);
        let record = self.resolver.resolve(&event).await?;

        tracing::info!(session = %event.session_id, "manual notification replay");
        Ok(self.dispatcher.dispatch_notifications(&event, &record).await)
    }
}
