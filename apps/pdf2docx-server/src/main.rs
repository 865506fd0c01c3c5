//! PDF2DOCX Server
//!
//! Accepts PDF uploads over HTTP, converts them with the pdf2docx CLI and
//! streams the resulting DOCX back to the caller.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pdf2docx_server::config::Config;
use pdf2docx_server::convert::{InterpreterResolver, Pdf2DocxRunner};
use pdf2docx_server::routes;
use pdf2docx_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "pdf2docx_server=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();

    let config = Config::from_env().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config from env: {}, using defaults", e);
        Config::default()
    });

    tracing::info!("Starting PDF2DOCX Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Scratch root: {}", config.conversion.scratch_root.display());

    // Probe interpreters once; the winner is fixed for the process lifetime
    let resolver = InterpreterResolver::new(
        config.conversion.python_override.as_deref(),
        &config.conversion.module,
    );
    let interpreter = tokio::task::spawn_blocking(move || resolver.resolve())
        .await
        .context("interpreter probe panicked")?;
    tracing::info!("Using Python interpreter: {}", interpreter);

    let runner = Pdf2DocxRunner::new(interpreter, config.conversion.module.clone());
    let (host, port) = (config.server.host.clone(), config.server.port);
    let app = routes::app(AppState::new(config, Arc::new(runner)));

    // Start server with graceful shutdown
    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("failed to bind {}:{}", host, port))?;
    let addr: SocketAddr = listener.local_addr()?;
    tracing::info!("PDF2DOCX Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
