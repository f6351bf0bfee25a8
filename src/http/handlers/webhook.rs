use crate::domain::event::EventType;
use crate::error::PipelineError;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

pub const SIGNATURE_HEADER: &str = "x-provider-signature";

/// Inbound provider callback. 200 acknowledges; 400 tells the provider the
/// delivery is permanently rejected; 500 asks for a redelivery.
pub async fn receive(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let Some(verifier) = &state.verifier else {
        let e = PipelineError::MissingConfig("webhook shared secret");
        tracing::error!("{}", e);
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(e.envelope())).into_response();
    };

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");

    let event = match verifier.verify(&body, signature, chrono::Utc::now()) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("callback rejected: {}", e);
            return (status_for(&e), Json(e.envelope())).into_response();
        }
    };

    if event.event_type != EventType::CheckoutSessionCompleted {
        tracing::debug!(event = %event.id, "ignoring event type");
        return received();
    }

    let record = match state.resolver.resolve(&event).await {
        Ok(record) => record,
        Err(e) => {
            tracing::error!(session = %event.session_id, "resolution failed: {}", e);
            return (status_for(&e), Json(e.envelope())).into_response();
        }
    };

    match state.dispatcher.dispatch(&event, &record).await {
        Ok(report) => {
            tracing::info!(
                session = %event.session_id,
                owner = ?report.owner_notification,
                guest = ?report.guest_notification,
                "fan-out complete"
            );
            received()
        }
        Err(e) => {
            tracing::error!(session = %event.session_id, "{}", e);
            (status_for(&e), Json(e.envelope())).into_response()
        }
    }
}

fn received() -> axum::response::Response {
    (StatusCode::OK, Json(serde_json::json!({"received": true}))).into_response()
}

fn status_for(e: &PipelineError) -> StatusCode {
    match e {
        PipelineError::InvalidSignature | PipelineError::MalformedEvent(_) => {
            StatusCode::BAD_REQUEST
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
