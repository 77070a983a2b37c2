//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! The bus is the publish/subscribe seam between the talent record
//! service and dashboard consumers (activity feed, live notification
//! stream). Subscribers hold an independent receiver; dropping it is
//! the unsubscribe.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use utoipa::ToSchema;

use crate::config::EVENT_BUS_CAPACITY;
use crate::domain::TalentActivity;

/// A change to the talent catalog worth announcing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TalentEvent {
    /// A new talent record was inserted
    Registered(TalentActivity),
}

/// In-process fan-out bus for [`TalentEvent`]s.
///
/// Shared via `Arc<EventBus>`. Publishing with no subscribers is fine;
/// the event is simply dropped.
pub struct EventBus {
    sender: broadcast::Sender<TalentEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: TalentEvent) {
        // receiver_count == 0 is not an error, just nobody listening
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<TalentEvent> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(EVENT_BUS_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn registered(nombre: &str) -> TalentEvent {
        TalentEvent::Registered(TalentActivity {
            id: Uuid::new_v4(),
            nombre: nombre.to_string(),
            created_at: Utc::now(),
            active: true,
        })
    }

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(registered("Ana Gómez"));

        let TalentEvent::Registered(activity) = rx.recv().await.unwrap();
        assert_eq!(activity.nombre, "Ana Gómez");
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_silent() {
        let bus = EventBus::default();
        assert_eq!(bus.receiver_count(), 0);
        bus.publish(registered("Nadie Escucha"));
    }
}
