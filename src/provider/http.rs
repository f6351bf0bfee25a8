use crate::error::PipelineError;
use crate::provider::{CheckoutSession, ProviderClient};
use reqwest::StatusCode;

pub struct HttpProviderClient {
    pub base_url: String,
    pub secret_key: String,
    pub timeout_ms: u64,
    pub client: reqwest::Client,
}

#[async_trait::async_trait]
impl ProviderClient for HttpProviderClient {
    async fn fetch_session(
        &self,
        session_id: &str,
    ) -> Result<Option<CheckoutSession>, PipelineError> {
        let url = format!("{}/v1/checkout/sessions/{}", self.base_url, session_id);
        let resp = self
            .client
            .get(url)
            .bearer_auth(&self.secret_key)
            .timeout(std::time::Duration::from_millis(self.timeout_ms))
            .send()
            .await
            .map_err(|e| PipelineError::Provider(e.to_string()))?;

        match resp.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => resp
                .json::<CheckoutSession>()
                .await
                .map(Some)
                .map_err(|e| PipelineError::Provider(e.to_string())),
            status => Err(PipelineError::Provider(format!(
                "session lookup returned HTTP {}",
                status.as_u16()
            ))),
        }
    }
}
