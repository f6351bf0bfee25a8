use crate::domain::event::PaymentEvent;
use crate::error::PipelineError;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Validates inbound callbacks against the shared secret. Operates on the
/// exact raw body bytes; any reserialization upstream breaks the check.
#[derive(Clone)]
pub struct SignatureVerifier {
    pub secret: String,
    pub tolerance_secs: i64,
}

impl SignatureVerifier {
    pub fn verify(
        &self,
        raw_body: &[u8],
        signature_header: &str,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<PaymentEvent, PipelineError> {
        let (timestamp, provided) =
            parse_header(signature_header).ok_or(PipelineError::InvalidSignature)?;

        if self.tolerance_secs > 0 {
            let ts: i64 = timestamp.parse().map_err(|_| PipelineError::InvalidSignature)?;
            if (now.timestamp() - ts).abs() > self.tolerance_secs {
                return Err(PipelineError::InvalidSignature);
            }
        }

        let expected = sign_payload(&self.secret, &timestamp, raw_body);
        if !constant_time_eq(provided.as_bytes(), expected.as_bytes()) {
            return Err(PipelineError::InvalidSignature);
        }

        PaymentEvent::from_raw(raw_body)
    }
}

/// Hex HMAC-SHA256 over `{timestamp}.{body}`. Also used by tests to forge
/// valid headers.
pub fn sign_payload(secret: &str, timestamp: &str, body: &[u8]) -> String {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(secret.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

pub fn signature_header(secret: &str, timestamp: i64, body: &[u8]) -> String {
    let ts = timestamp.to_string();
    format!("t={},v1={}", ts, sign_payload(secret, &ts, body))
}

fn parse_header(header: &str) -> Option<(String, String)> {
    let mut timestamp = None;
    let mut signature = None;
    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", v)) => timestamp = Some(v.to_string()),
            Some(("v1", v)) => signature = Some(v.to_string()),
            _ => {}
        }
    }
    Some((timestamp?, signature?))
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
