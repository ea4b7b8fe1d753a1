//! Core entity and domain event traits.

use common::EntityId;
use serde::{Serialize, de::DeserializeOwned};

/// Trait for domain events.
///
/// Domain events represent facts that have happened in the marketplace.
/// They are immutable and should be named in past tense.
pub trait DomainEvent: Serialize + DeserializeOwned + Send + Sync + Clone {
    /// Returns the event type name.
    ///
    /// Used for notification rendering and transition metrics.
    fn event_type(&self) -> &'static str;
}

/// Trait for lifecycle-driven marketplace entities.
///
/// An entity owns a status field governed by a one-directional state
/// machine. Command methods on the concrete type validate against the
/// current state and return events; `apply` folds events back into state.
///
/// Entities:
/// - Generate events from commands (which may be rejected)
/// - Apply events to update state (pure, deterministic)
/// - Never reach a new state except through an event
pub trait Entity: Default + Send + Sync + Sized {
    /// The type of events this entity produces and consumes.
    type Event: DomainEvent;

    /// The type of errors this entity can produce.
    type Error: std::error::Error + Send + Sync;

    /// Returns the entity type name.
    fn entity_type() -> &'static str;

    /// Returns the entity's unique identifier.
    ///
    /// Returns None for a new, uninitialized entity.
    fn id(&self) -> Option<EntityId>;

    /// Applies an event to the entity, updating its state.
    ///
    /// This method must be pure and deterministic:
    /// - Given the same state and event, it must always produce the same new state
    /// - It must not have side effects
    /// - It must not fail (events represent facts that have happened)
    fn apply(&mut self, event: Self::Event);

    /// Applies multiple events in sequence.
    fn apply_events(&mut self, events: impl IntoIterator<Item = Self::Event>) {
        for event in events {
            self.apply(event);
        }
    }
}
