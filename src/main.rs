use booking_fanout::config::AppConfig;
use booking_fanout::provider::http::HttpProviderClient;
use booking_fanout::service::dispatcher::FanOutDispatcher;
use booking_fanout::service::resolver::RecordResolver;
use booking_fanout::service::retry::RetryCoordinator;
use booking_fanout::signature::SignatureVerifier;
use booking_fanout::sinks::ledger::PgLedger;
use booking_fanout::sinks::mailer::SmtpMailer;
use booking_fanout::store::temp_store::RedisTempStore;
use booking_fanout::AppState;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&cfg.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let redis_client = redis::Client::open(cfg.redis_url.clone())?;

    let verifier = cfg.webhook_secret.clone().map(|secret| SignatureVerifier {
        secret,
        tolerance_secs: cfg.signature_tolerance_secs,
    });
    if verifier.is_none() {
        tracing::warn!("WEBHOOK_SECRET not set, callbacks will be rejected");
    }

    let resolver = RecordResolver {
        store: Arc::new(RedisTempStore::new(redis_client.clone())),
        store_timeout: Duration::from_secs(cfg.store_timeout_secs),
    };

    let dispatcher = FanOutDispatcher {
        ledger: Arc::new(PgLedger { pool: pool.clone() }),
        mailer: Arc::new(SmtpMailer::from_config(&cfg)?),
        owner_email: cfg.owner_email.clone(),
        ledger_timeout: Duration::from_secs(cfg.ledger_timeout_secs),
        notify_timeout: Duration::from_secs(cfg.notify_timeout_secs),
    };

    let retry = RetryCoordinator {
        provider: Arc::new(HttpProviderClient {
            base_url: cfg.provider_base_url.clone(),
            secret_key: cfg.provider_secret_key.clone(),
            timeout_ms: 10_000,
            client: reqwest::Client::new(),
        }),
        resolver: resolver.clone(),
        dispatcher: dispatcher.clone(),
    };

    let state = AppState {
        verifier,
        resolver,
        dispatcher,
        retry,
        pool,
        redis_client,
    };

    let app = booking_fanout::build_router(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
