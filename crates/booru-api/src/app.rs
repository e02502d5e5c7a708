//! Application builder: wires router, middleware and state into an Axum
//! app, then binds and serves it.

use std::io;

use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use booru_core::config::AppConfig;
use booru_core::error::{AppError, ErrorKind};
use booru_core::result::AppResult;

use crate::middleware::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    build_router(state)
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Binds `host:port`. With `probe` on, an occupied port moves the attempt
/// to the next one, up to 65535.
pub async fn bind_with_probe(host: &str, port: u16, probe: bool) -> AppResult<TcpListener> {
    let last = if probe { u16::MAX } else { port };

    for candidate in port..=last {
        match TcpListener::bind((host, candidate)).await {
            Ok(listener) => {
                if candidate != port {
                    warn!(requested = port, bound = candidate, "Requested port busy, using next free port");
                }
                return Ok(listener);
            }
            Err(e) if e.kind() == io::ErrorKind::AddrInUse && candidate < last => {
                debug!(port = candidate, "Port in use");
            }
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Internal,
                    format!("Failed to bind {host}:{candidate}"),
                    e,
                ));
            }
        }
    }

    Err(AppError::internal(format!("No free port on {host} from {port}")))
}

/// Runs the booru server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> AppResult<()> {
    let server = config.server.clone();
    let state = AppState::new(config, db_pool);

    let settings = state.settings_service.load().await?;
    if !settings.admin_created {
        info!("No admin yet, POST /api/v1/user/init-admin-create to bootstrap one");
    }

    let listener = bind_with_probe(&server.host, server.port, server.probe_ports).await?;
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to read bound address", e))?;
    info!(%addr, "booru server listening");

    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))?;

    info!("booru server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "Failed to install Ctrl+C handler, running until killed");
            std::future::pending::<()>().await;
        }
    }
}
