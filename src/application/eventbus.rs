use crate::domain::event::DomainEvent;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Event channel unavailable: {0}")]
    Unavailable(String),
}

/// Outbound notification capability handed to the workflow service.
///
/// Publishing is best-effort: callers log failures and carry on.
pub trait EventPublisher: Send + Sync {
    fn publish(&self, event: DomainEvent) -> Result<(), PublishError>;
}

/// Event bus for publishing and subscribing to domain events
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }
}

impl EventPublisher for EventBus {
    /// Publish an event to all subscribers
    fn publish(&self, event: DomainEvent) -> Result<(), PublishError> {
        if let Err(e) = self.sender.send(event) {
            // Nobody listening is not a failure
            tracing::trace!("No subscribers for event: {}", e);
        }
        Ok(())
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

/// Shared event bus wrapped in Arc for thread-safe sharing
pub type SharedEventBus = Arc<EventBus>;

pub fn create_event_bus(capacity: usize) -> SharedEventBus {
    Arc::new(EventBus::new(capacity))
}
