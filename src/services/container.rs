//! Service container - centralized service access.

use std::sync::Arc;

use crate::config::Config;
use crate::events::EventBus;
use crate::infra::{LocalPhotoStore, TalentStore};

use super::{DashboardManager, DashboardService, TalentManager, TalentService};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get talent record service
    fn talents(&self) -> Arc<dyn TalentService>;

    /// Get dashboard aggregate service
    fn dashboard(&self) -> Arc<dyn DashboardService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    talent_service: Arc<dyn TalentService>,
    dashboard_service: Arc<dyn DashboardService>,
}

impl Services {
    pub fn new(
        talent_service: Arc<dyn TalentService>,
        dashboard_service: Arc<dyn DashboardService>,
    ) -> Self {
        Self {
            talent_service,
            dashboard_service,
        }
    }

    /// Wire the default production services from a database connection,
    /// the filesystem photo store, and a shared event bus.
    pub fn from_connection(
        db: sea_orm::DatabaseConnection,
        config: &Config,
        bus: Arc<EventBus>,
    ) -> Self {
        let repo = Arc::new(TalentStore::new(db));
        let storage = Arc::new(LocalPhotoStore::from_config(config));

        let talent_service = Arc::new(TalentManager::new(repo.clone(), storage, bus));
        let dashboard_service = Arc::new(DashboardManager::new(repo));

        Self {
            talent_service,
            dashboard_service,
        }
    }
}

impl ServiceContainer for Services {
    fn talents(&self) -> Arc<dyn TalentService> {
        self.talent_service.clone()
    }

    fn dashboard(&self) -> Arc<dyn DashboardService> {
        self.dashboard_service.clone()
    }
}
