//! Serve command - starts the HTTP server.

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::{Config, RECENT_REGISTRATIONS_LIMIT};
use crate::errors::{AppError, AppResult};
use crate::events::{EventBus, FeedHandle};
use crate::infra::Database;
use crate::services::{ServiceContainer, Services};

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    let db = Arc::new(Database::connect(&config).await);
    tracing::info!("Database connected");

    let bus = Arc::new(EventBus::default());
    let container = Services::from_connection(db.get_connection(), &config, bus.clone());
    let dashboard = container.dashboard();

    // Seed the activity feed from persisted registrations so the
    // dashboard is populated before the first live event
    let initial = dashboard.recent(RECENT_REGISTRATIONS_LIMIT).await?;
    let feed = Arc::new(FeedHandle::spawn(&bus, initial));

    let app_state = AppState::new(container.talents(), dashboard, bus, feed, db);

    let app = create_router(app_state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
