//! Dashboard activity feed: an append-and-trim reducer over the
//! registration event stream.
//!
//! The feed is seeded from the record store (newest first) and then
//! updated by bus events: new entries are prepended and the sequence is
//! trimmed to capacity. A background task owns the bus subscription for
//! the lifetime of the shared feed; aborting it tears the subscription
//! down.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::config::ACTIVITY_FEED_CAPACITY;
use crate::domain::TalentActivity;
use crate::events::bus::{EventBus, TalentEvent};

/// Ordered, bounded sequence of recent catalog activity (newest first).
#[derive(Debug)]
pub struct ActivityFeed {
    entries: Vec<TalentActivity>,
    capacity: usize,
}

impl ActivityFeed {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Seed the feed with entries already ordered newest-first.
    pub fn seeded(initial: Vec<TalentActivity>, capacity: usize) -> Self {
        let mut feed = Self::new(capacity);
        for entry in initial.into_iter().rev() {
            feed.push(entry);
        }
        feed
    }

    /// Prepend one entry and trim to capacity.
    pub fn push(&mut self, entry: TalentActivity) {
        self.entries.insert(0, entry);
        self.entries.truncate(self.capacity);
    }

    /// Reduce a bus event into the feed.
    pub fn apply(&mut self, event: TalentEvent) {
        match event {
            TalentEvent::Registered(activity) => self.push(activity),
        }
    }

    /// Current snapshot, newest first.
    pub fn entries(&self) -> &[TalentActivity] {
        &self.entries
    }
}

impl Default for ActivityFeed {
    fn default() -> Self {
        Self::new(ACTIVITY_FEED_CAPACITY)
    }
}

/// Shared feed handle: the reducer behind a lock plus the task that
/// feeds it from the bus.
pub struct FeedHandle {
    feed: Arc<RwLock<ActivityFeed>>,
    worker: JoinHandle<()>,
}

impl FeedHandle {
    /// Subscribe to the bus and keep the shared feed updated until the
    /// handle is dropped.
    pub fn spawn(bus: &EventBus, initial: Vec<TalentActivity>) -> Self {
        let feed = Arc::new(RwLock::new(ActivityFeed::seeded(
            initial,
            ACTIVITY_FEED_CAPACITY,
        )));
        let mut rx = bus.subscribe();
        let worker_feed = feed.clone();
        let worker = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => worker_feed.write().await.apply(event),
                    // Slow consumer: skipped events are already visible
                    // via the record store, keep going
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!("activity feed lagged, skipped {} events", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        Self { feed, worker }
    }

    /// Snapshot of the feed, newest first.
    pub async fn snapshot(&self) -> Vec<TalentActivity> {
        self.feed.read().await.entries().to_vec()
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn activity(nombre: &str) -> TalentActivity {
        TalentActivity {
            id: Uuid::new_v4(),
            nombre: nombre.to_string(),
            created_at: Utc::now(),
            active: true,
        }
    }

    #[test]
    fn feed_prepends_and_trims() {
        let mut feed = ActivityFeed::new(3);
        for name in ["a", "b", "c", "d"] {
            feed.push(activity(name));
        }

        let names: Vec<_> = feed.entries().iter().map(|e| e.nombre.as_str()).collect();
        assert_eq!(names, vec!["d", "c", "b"]);
    }

    #[test]
    fn seeded_feed_keeps_newest_first_order() {
        let feed = ActivityFeed::seeded(vec![activity("newest"), activity("older")], 5);
        let names: Vec<_> = feed.entries().iter().map(|e| e.nombre.as_str()).collect();
        assert_eq!(names, vec!["newest", "older"]);
    }

    #[tokio::test]
    async fn handle_applies_bus_events() {
        let bus = EventBus::default();
        let handle = FeedHandle::spawn(&bus, vec![activity("seed")]);

        bus.publish(TalentEvent::Registered(activity("live")));

        // Give the worker a turn to observe the event
        for _ in 0..50 {
            if handle.snapshot().await.len() == 2 {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        let snapshot = handle.snapshot().await;
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].nombre, "live");
    }
}
