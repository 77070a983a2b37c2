//! Dashboard aggregates: headline stats and recent registrations.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::ELITE_RATING_THRESHOLD;
use crate::domain::TalentActivity;
use crate::errors::AppResult;
use crate::infra::TalentRepository;

/// Time window for the "new registrations" stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatsPeriod {
    Today,
    #[default]
    Week,
    Month,
}

impl StatsPeriod {
    /// Window start relative to `now`. Rolling windows, not calendar
    /// boundaries: "today" is the last 24 hours.
    pub fn start(self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            StatsPeriod::Today => now - Duration::days(1),
            StatsPeriod::Week => now - Duration::weeks(1),
            StatsPeriod::Month => now - Duration::days(30),
        }
    }
}

/// Headline numbers for the dashboard cards.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_talents: u64,
    pub active_talents: u64,
    /// Records with rating >= 4.5
    pub elite_talents: u64,
    pub new_registrations: u64,
    pub period: StatsPeriod,
}

/// Dashboard aggregate service trait for dependency injection.
#[async_trait]
pub trait DashboardService: Send + Sync {
    async fn stats(&self, period: StatsPeriod) -> AppResult<DashboardStats>;
    async fn recent(&self, limit: u64) -> AppResult<Vec<TalentActivity>>;
}

/// Concrete implementation of [`DashboardService`].
pub struct DashboardManager {
    repo: Arc<dyn TalentRepository>,
}

impl DashboardManager {
    pub fn new(repo: Arc<dyn TalentRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl DashboardService for DashboardManager {
    async fn stats(&self, period: StatsPeriod) -> AppResult<DashboardStats> {
        let since = period.start(Utc::now());

        let (total, active, elite, recent) = tokio::try_join!(
            self.repo.count_all(),
            self.repo.count_active(),
            self.repo.count_rated_at_least(ELITE_RATING_THRESHOLD),
            self.repo.count_created_since(since),
        )?;

        Ok(DashboardStats {
            total_talents: total,
            active_talents: active,
            elite_talents: elite,
            new_registrations: recent,
            period,
        })
    }

    async fn recent(&self, limit: u64) -> AppResult<Vec<TalentActivity>> {
        self.repo.recent(limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_windows_are_rolling() {
        let now = Utc::now();
        assert_eq!(now - StatsPeriod::Today.start(now), Duration::days(1));
        assert_eq!(now - StatsPeriod::Week.start(now), Duration::weeks(1));
        assert_eq!(now - StatsPeriod::Month.start(now), Duration::days(30));
    }

    #[test]
    fn period_parses_lowercase() {
        let p: StatsPeriod = serde_json::from_str("\"month\"").unwrap();
        assert_eq!(p, StatsPeriod::Month);
    }
}
