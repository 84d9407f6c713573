// Copyright (c) 2025 - Cowboy AI, Inc.
//! Domain Events
//!
//! Domain objects record what happened to them as events and hand them to
//! the application layer once the operation has completed.
//!
//! Pending events belong to the instance that recorded them. They are not
//! part of the entity's state: a copy starts without pending events (declare
//! the collector as a `transient` slot of the entity structure).

use serde::{Deserialize, Serialize};

use crate::copy::Transient;

/// Fact with a type discriminator and a payload
pub trait Event {
    type Type;
    type Payload;

    fn event_type(&self) -> &Self::Type;

    fn payload(&self) -> &Self::Payload;
}

/// Generic event pairing a type discriminator with its payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainEvent<T, P> {
    event_type: T,
    payload: P,
}

impl<T, P> DomainEvent<T, P> {
    pub fn new(event_type: T, payload: P) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    pub fn into_parts(self) -> (T, P) {
        (self.event_type, self.payload)
    }
}

impl<T, P> Event for DomainEvent<T, P> {
    type Type = T;
    type Payload = P;

    fn event_type(&self) -> &T {
        &self.event_type
    }

    fn payload(&self) -> &P {
        &self.payload
    }
}

/// Ordered buffer of pending events
pub trait EventCollector<M> {
    fn add(&mut self, event: M);

    fn events(&self) -> &[M];

    fn clear(&mut self);

    /// Drain all pending events in recording order
    fn take(&mut self) -> Vec<M>;

    fn is_empty(&self) -> bool {
        self.events().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DomainEventCollector<M> {
    events: Vec<M>,
}

impl<M> Default for DomainEventCollector<M> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<M> DomainEventCollector<M> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M> EventCollector<M> for DomainEventCollector<M> {
    fn add(&mut self, event: M) {
        self.events.push(event);
    }

    fn events(&self) -> &[M] {
        &self.events
    }

    fn clear(&mut self) {
        self.events.clear();
    }

    fn take(&mut self) -> Vec<M> {
        std::mem::take(&mut self.events)
    }
}

impl<M> Transient for DomainEventCollector<M> {
    fn reset(&mut self) {
        self.events.clear();
    }
}

/// Domain object recording domain events
pub trait EventSource {
    type Message;

    fn collector(&self) -> &DomainEventCollector<Self::Message>;

    fn collector_mut(&mut self) -> &mut DomainEventCollector<Self::Message>;

    fn add_domain_event(&mut self, message: Self::Message) {
        self.collector_mut().add(message);
    }

    fn domain_events(&self) -> &[Self::Message] {
        self.collector().events()
    }

    fn clear_domain_events(&mut self) {
        self.collector_mut().clear();
    }

    fn take_domain_events(&mut self) -> Vec<Self::Message> {
        self.collector_mut().take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    enum CartEventType {
        ItemAdded,
        CheckedOut,
    }

    type CartEvent = DomainEvent<CartEventType, String>;

    #[derive(Default)]
    struct Cart {
        events: DomainEventCollector<CartEvent>,
    }

    impl EventSource for Cart {
        type Message = CartEvent;

        fn collector(&self) -> &DomainEventCollector<CartEvent> {
            &self.events
        }

        fn collector_mut(&mut self) -> &mut DomainEventCollector<CartEvent> {
            &mut self.events
        }
    }

    #[test]
    fn test_events_are_recorded_in_order() {
        let mut cart = Cart::default();
        cart.add_domain_event(DomainEvent::new(CartEventType::ItemAdded, "sku-1".into()));
        cart.add_domain_event(DomainEvent::new(CartEventType::CheckedOut, String::new()));

        let types: Vec<_> = cart.domain_events().iter().map(|e| *e.event_type()).collect();
        assert_eq!(types, vec![CartEventType::ItemAdded, CartEventType::CheckedOut]);
        assert_eq!(cart.domain_events()[0].payload(), "sku-1");
    }

    #[test]
    fn test_take_drains_pending_events() {
        let mut cart = Cart::default();
        cart.add_domain_event(DomainEvent::new(CartEventType::ItemAdded, "sku-1".into()));

        let taken = cart.take_domain_events();
        assert_eq!(taken.len(), 1);
        assert!(cart.domain_events().is_empty());

        cart.add_domain_event(DomainEvent::new(CartEventType::ItemAdded, "sku-2".into()));
        cart.clear_domain_events();
        assert!(cart.collector().is_empty());
    }

    #[test]
    fn test_reset_discards_events() {
        let mut collector = DomainEventCollector::new();
        collector.add(1);
        collector.reset();
        assert!(collector.events().is_empty());
    }

    #[test]
    fn test_domain_event_serialization() {
        let event = DomainEvent::new(CartEventType::CheckedOut, 42);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event_type"], "checked_out");

        let back: DomainEvent<CartEventType, i32> = serde_json::from_value(json).unwrap();
        assert_eq!(back.into_parts(), (CartEventType::CheckedOut, 42));
    }
}
