//! HTTP server for the eventboard backend.
//!
//! Thin layer over `eventboard_core`: the router maps REST verbs onto
//! core services, the error module maps service errors onto status codes
//! and nothing in here touches SQL directly.

use std::time::Duration;

use anyhow::Context;
use axum::http::{header::CONTENT_TYPE, Method};
use eventboard_core::db::open_db;
use log::info;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use config::Config;
use routes::build_router;
use state::AppState;

pub async fn start_server(config: Config) -> anyhow::Result<()> {
    info!(
        "event=server_start module=server status=start port={} db={}",
        config.port, config.db_path
    );

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open database `{}`", config.db_path))?;
    let state = AppState::new(conn);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let app = build_router(state).layer(cors);

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!("event=server_start module=server status=ok address={address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated abnormally")?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("event=server_shutdown module=server status=start signal=ctrl_c");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("event=server_shutdown module=server status=start signal=terminate");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
