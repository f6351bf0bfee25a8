use crate::error::{ErrorEnvelope, ErrorPayload, PipelineError};
use crate::AppState;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct RetryRequest {
    pub session_id: Option<String>,
}

/// Operator-triggered notification replay. The session identifier comes
/// from the `session_id` query parameter or a JSON body. Returns the
/// fan-out report as JSON; the ledger entry in it is always skipped.
pub async fn replay_notifications(
    State(state): State<AppState>,
    Query(query): Query<RetryRequest>,
    body: Bytes,
) -> impl IntoResponse {
    let session_id = query.session_id.or_else(|| {
        serde_json::from_slice::<RetryRequest>(&body)
            .ok()
            .and_then(|req| req.session_id)
    });

    let Some(session_id) = session_id.filter(|id| !id.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorEnvelope {
                error: ErrorPayload {
                    code: "MISSING_SESSION_ID".to_string(),
                    message: "session_id query parameter or body field is required".to_string(),
                    details: None,
                },
            }),
        )
            .into_response();
    };

    match state.retry.retry(&session_id).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => {
            tracing::warn!(session = %session_id, "retry failed: {}", e);
            (status_for(&e), Json(e.envelope())).into_response()
        }
    }
}

fn status_for(e: &PipelineError) -> StatusCode {
    match e {
        PipelineError::PaymentNotCompleted(_) | PipelineError::RecordIncomplete(_) => {
            StatusCode::BAD_REQUEST
        }
        PipelineError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        PipelineError::Provider(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
