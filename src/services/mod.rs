//! Application services layer - use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod container;
mod dashboard_service;
mod talent_service;

pub use container::{ServiceContainer, Services};
pub use dashboard_service::{DashboardManager, DashboardService, DashboardStats, StatsPeriod};
pub use talent_service::{TalentManager, TalentService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
