mod config;
mod handler;
mod logging;
mod upload;

use anyhow::Context;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;

/// ルーティングを構築する
///
/// アップロードを受け付けるルートにのみボディサイズ上限を設定する
pub fn router(config: &AppConfig) -> Router {
    let uploads = Router::new()
        .route("/api/image/resize", post(handler::resize_image))
        .route("/api/audio/compress", post(handler::compress_audio))
        .route("/api/audio/convert", post(handler::convert_audio))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes));

    Router::new()
        .route("/", get(handler::index))
        .route("/health", get(handler::health))
        .route("/api/options", get(handler::options))
        .merge(uploads)
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("failed to load configuration")?;
    logging::init_logging(&config.log_level);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(
        addr = %addr,
        max_upload_bytes = config.max_upload_bytes,
        "media processor listening"
    );

    axum::serve(listener, router(&config))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("media processor stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
