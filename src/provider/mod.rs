use crate::error::PipelineError;
use serde::Deserialize;
use std::collections::HashMap;

pub mod http;

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    #[serde(default)]
    pub payment_status: String,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub amount_total: i64,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// Direct session lookup against the payment provider, used by the manual
/// retry path in place of signature verification.
#[async_trait::async_trait]
pub trait ProviderClient: Send + Sync {
    async fn fetch_session(&self, session_id: &str)
        -> Result<Option<CheckoutSession>, PipelineError>;
}
