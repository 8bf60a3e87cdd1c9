//! Two-phase domain-event dispatch.
//!
//! Mutators enqueue events on the aggregate instance; nothing is
//! delivered until the surrounding use case persists and calls
//! [`EventDispatcher::flush`]. The dispatcher is passed around
//! explicitly - there is no global registry.

use uuid::Uuid;

use super::DomainEvent;

/// Anything that queues domain events under an aggregate identity
pub trait EventSource {
    /// Identity the queued events are keyed on.
    fn aggregate_id(&self) -> Uuid;

    /// Drain the queued events, leaving the queue empty.
    fn take_events(&mut self) -> Vec<DomainEvent>;
}

type Handler = Box<dyn Fn(&DomainEvent) + Send + Sync>;

/// Delivers queued events to subscribed handlers after commit
#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<Handler>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler invoked for every flushed event.
    pub fn subscribe(&mut self, handler: impl Fn(&DomainEvent) + Send + Sync + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Drain the source's queue and deliver each event to every handler.
    /// Returns how many events were delivered.
    pub fn flush(&self, source: &mut dyn EventSource) -> usize {
        let aggregate_id = source.aggregate_id();
        let events = source.take_events();
        for event in &events {
            debug_assert_eq!(event.aggregate_id(), aggregate_id);
            for handler in &self.handlers {
                handler(event);
            }
        }
        events.len()
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::PowerId;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FakeSource {
        id: PowerId,
        events: Vec<DomainEvent>,
    }

    impl EventSource for FakeSource {
        fn aggregate_id(&self) -> Uuid {
            self.id.to_uuid()
        }

        fn take_events(&mut self) -> Vec<DomainEvent> {
            std::mem::take(&mut self.events)
        }
    }

    #[test]
    fn flush_delivers_and_clears() {
        let power_id = PowerId::new();
        let mut source = FakeSource {
            id: power_id,
            events: vec![
                DomainEvent::PowerCreated {
                    power_id,
                    name: "Voo".to_string(),
                },
                DomainEvent::PowerUpdated { power_id },
            ],
        };

        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let mut dispatcher = EventDispatcher::new();
        dispatcher.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(dispatcher.flush(&mut source), 2);
        assert_eq!(seen.load(Ordering::SeqCst), 2);

        // second flush finds an empty queue
        assert_eq!(dispatcher.flush(&mut source), 0);
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }
}
