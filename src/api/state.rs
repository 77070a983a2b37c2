//! Application state - dependency injection container.

use std::sync::Arc;

use crate::events::{EventBus, FeedHandle};
use crate::infra::Database;
use crate::services::{DashboardService, TalentService};

/// Application state shared with every handler.
#[derive(Clone)]
pub struct AppState {
    /// Talent record service
    pub talent_service: Arc<dyn TalentService>,
    /// Dashboard aggregate service
    pub dashboard_service: Arc<dyn DashboardService>,
    /// Realtime event bus (SSE subscriptions)
    pub bus: Arc<EventBus>,
    /// Live activity feed projection
    pub feed: Arc<FeedHandle>,
    /// Database connection (health checks)
    pub database: Arc<Database>,
}

impl AppState {
    pub fn new(
        talent_service: Arc<dyn TalentService>,
        dashboard_service: Arc<dyn DashboardService>,
        bus: Arc<EventBus>,
        feed: Arc<FeedHandle>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            talent_service,
            dashboard_service,
            bus,
            feed,
            database,
        }
    }
}
