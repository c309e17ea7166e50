//! Room Lobby API
//!
//! Lists rooms, shows who is in them, and lets accounts join and leave.
//! Every request checks a connection out of the Postgres pool, runs its
//! queries in order, and answers with a `{ status, data | message }` envelope.

mod config;
mod db;
mod error;
mod models;
mod routes;
mod state;

use crate::config::Settings;
use crate::db::PgRoomStore;
use crate::routes::create_router;
use crate::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting Room Lobby API...");

    let settings = Settings::load()?;
    info!(
        "Configuration loaded (database {}@{}:{}/{})",
        settings.database.user,
        settings.database.host,
        settings.database.port,
        settings.database.database
    );

    let pool = db::create_pool(&settings.database)?;

    // The pool connects lazily; a down database only fails requests
    if let Err(e) = db::verify_connection(&pool).await {
        warn!("Database not reachable at startup: {}", e);
    } else if settings.database.bootstrap_schema {
        db::bootstrap_schema(&pool).await?;
    }

    let state = Arc::new(AppState::new(Arc::new(PgRoomStore::new(pool))));
    let app = create_router(state, &settings);

    let addr = SocketAddr::from((settings.server.host, settings.server.port));
    info!("Server listening on http://{}", addr);
    info!("   GET    /rooms              - List rooms");
    info!("   GET    /roomsDetail/{{id}}   - Room with participants");
    info!("   POST   /rooms/{{id}}         - Join a room");
    info!("   DELETE /rooms/{{id}}         - Leave a room");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing with structured logging
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,room_lobby=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .init();
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
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
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        },
    }
}
