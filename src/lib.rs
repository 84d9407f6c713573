// Copyright (c) 2025 - Cowboy AI, Inc.
//! Tactical DDD building blocks for the Composable Information Machine
//!
//! This crate provides the base abstractions domain models are written with:
//! typed identities, entities and aggregates, identity-unique entity
//! collections, value-object sets, domain events and a small constraint
//! validation DSL.
//!
//! Its centrepiece is the [`copy`] engine: given any entity it produces an
//! independent deep copy in which the entity and every nested entity receive
//! fresh identities, while the original is left untouched.
//!
//! # Example
//!
//! ```rust
//! use cim_domain_model::{
//!     entity_structure, impl_entity_equality, CopyableEntity, Entity, EntityHeader, EntityId,
//!     OrderedEntities,
//! };
//!
//! #[derive(Debug, Clone)]
//! struct Line {
//!     header: EntityHeader<EntityId<Line>>,
//!     sku: String,
//! }
//!
//! impl Entity for Line {
//!     type Id = EntityId<Line>;
//!     fn header(&self) -> &EntityHeader<Self::Id> { &self.header }
//!     fn header_mut(&mut self) -> &mut EntityHeader<Self::Id> { &mut self.header }
//! }
//! impl_entity_equality!(Line);
//! entity_structure!(Line {});
//!
//! #[derive(Debug, Clone)]
//! struct Order {
//!     header: EntityHeader<EntityId<Order>>,
//!     lines: OrderedEntities<Line>,
//! }
//!
//! impl Entity for Order {
//!     type Id = EntityId<Order>;
//!     fn header(&self) -> &EntityHeader<Self::Id> { &self.header }
//!     fn header_mut(&mut self) -> &mut EntityHeader<Self::Id> { &mut self.header }
//! }
//! impl_entity_equality!(Order);
//! entity_structure!(Order { collection lines });
//!
//! let mut lines = OrderedEntities::new();
//! lines.add(Line { header: EntityHeader::new(EntityId::new()), sku: "A-1".into() }).unwrap();
//! let order = Order { header: EntityHeader::new(EntityId::new()), lines };
//!
//! let copy = order.copied().unwrap();
//! assert_ne!(copy.id(), order.id());
//! assert_eq!(copy.original_id(), Some(order.id()));
//! assert_eq!(copy.lines.len(), 1);
//! ```

pub mod collections;
pub mod copy;
pub mod entity;
pub mod errors;
pub mod events;
pub mod identity;
pub mod validation;
pub mod value_objects;

// Re-export commonly used types
pub use collections::{Entities, EntityCollection, EntityIds, OrderedEntities, OrderedEntityIds};
pub use copy::{
    copy, copy_all, discover, CopyConfig, CopyError, CopyResult, CopyableEntity, Discovery,
    EntityCopier, EntityMark, IdStrategy, IdentityFactory, Location, SlotKind, SlotValue,
    Structure, StructureSnapshot, StructureVisitor, StructureVisitorMut, Transient, UuidFactory,
};
pub use entity::{AggregateRoot, Entity, EntityHeader};
pub use errors::{DomainError, DomainResult, ErrorCode, Parameter};
pub use events::{DomainEvent, DomainEventCollector, Event, EventCollector, EventSource};
pub use identity::{AggregateId, EntityId, Identity};
pub use validation::{constraint, ensure, ensure_service, Constraint, Validation};
pub use value_objects::{ValueObject, ValueObjects};

/// Unqualified name of a type, without module path or generic arguments.
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
