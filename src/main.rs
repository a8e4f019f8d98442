use mailgate::api::{create_router, AppState};
use mailgate::config::Settings;
use mailgate::idempotency::{CleanupJob, IdempotencyStore};
use mailgate::observability::{init_logging, LogConfig, LogFormat};
use mailgate::sender::SmtpSender;
use mailgate::services::SendService;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::new()?;

    init_logging(&LogConfig {
        level: settings.application.log_level.clone(),
        format: LogFormat::from(settings.application.log_format.as_str()),
        ..LogConfig::default()
    });
    info!("Configuration loaded");

    let store = Arc::new(IdempotencyStore::new(settings.idempotency.ttl_seconds));
    info!(
        ttl_seconds = store.ttl_seconds(),
        "Idempotency store initialized"
    );

    let send_service = if settings.smtp.is_configured() {
        let sender = SmtpSender::new(&settings.smtp)?;
        info!(host = %settings.smtp.host, port = settings.smtp.port, "SMTP sender configured");
        Some(Arc::new(SendService::new(Arc::new(sender), store.clone())))
    } else {
        warn!("SMTP not configured; /v1/send will return 503");
        None
    };

    if settings.idempotency.sweep_interval_seconds > 0 {
        CleanupJob::new(store.clone(), settings.idempotency.sweep_interval_seconds).start();
    }

    let state = AppState::new(settings.auth.api_key.clone(), send_service);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.application.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("Failed to install shutdown handler: {}", err);
        return;
    }
    info!("Shutdown signal received");
}
