use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid signature")]
    InvalidSignature,

    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),

    #[error("malformed event payload: {0}")]
    MalformedEvent(String),

    #[error("temp store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("record incomplete: missing {0}")]
    RecordIncomplete(&'static str),

    #[error("ledger write failed: {0}")]
    Ledger(String),

    #[error("payment not completed: status is {0}")]
    PaymentNotCompleted(String),

    #[error("provider session not found: {0}")]
    SessionNotFound(String),

    #[error("provider request failed: {0}")]
    Provider(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorPayload,
}

#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

impl PipelineError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidSignature => "INVALID_SIGNATURE",
            Self::MissingConfig(_) => "MISSING_CONFIG",
            Self::MalformedEvent(_) => "MALFORMED_EVENT",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::RecordIncomplete(_) => "RECORD_INCOMPLETE",
            Self::Ledger(_) => "LEDGER_WRITE_FAILED",
            Self::PaymentNotCompleted(_) => "PAYMENT_NOT_COMPLETED",
            Self::SessionNotFound(_) => "SESSION_NOT_FOUND",
            Self::Provider(_) => "PROVIDER_ERROR",
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            error: ErrorPayload {
                code: self.code().to_string(),
                message: self.to_string(),
                details: None,
            },
        }
    }
}
