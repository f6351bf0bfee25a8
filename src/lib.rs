pub mod codec;
pub mod config;
pub mod domain {
    pub mod booking;
    pub mod event;
    pub mod report;
}
pub mod error;
pub mod http {
    pub mod handlers {
        pub mod ops;
        pub mod retry;
        pub mod webhook;
    }
}
pub mod provider;
pub mod service {
    pub mod dispatcher;
    pub mod resolver;
    pub mod retry;
}
pub mod signature;
pub mod sinks;
pub mod store {
    pub mod temp_store;
}

use axum::routing::{get, post};
use axum::Router;

#[derive(Clone)]
pub struct AppState {
    pub verifier: Option<signature::SignatureVerifier>,
    pub resolver: service::resolver::RecordResolver,
    pub dispatcher: service::dispatcher::FanOutDispatcher,
    pub retry: service::retry::RetryCoordinator,
    pub pool: sqlx::PgPool,
    pub redis_client: redis::Client,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(http::handlers::ops::health))
        .route("/webhooks/payment", post(http::handlers::webhook::receive))
        .route("/retry", post(http::handlers::retry::replay_notifications))
        .route("/ops/readiness", get(http::handlers::ops::readiness))
        .route("/ops/liveness", get(http::handlers::ops::liveness))
        .with_state(state)
}
