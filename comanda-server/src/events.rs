//! Best-effort event fan-out
//!
//! Kitchen displays and dashboards subscribe to a broadcast channel.
//! Delivery is at-most-once: a send with no active receivers is not an
//! error, and lagging receivers lose old events. Correctness of the
//! core never depends on a publish succeeding.

use shared::event::DomainEvent;
use tokio::sync::broadcast;

/// Event broadcast channel capacity
const EVENT_CHANNEL_CAPACITY: usize = 4096;

/// Shared publisher handle for domain events
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Publish an event; dropped silently when nobody is listening
    pub fn publish(&self, event: DomainEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("Event dropped: no active subscribers");
        }
    }

    /// Subscribe to event broadcasts
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
