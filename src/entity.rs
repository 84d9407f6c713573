// Copyright (c) 2025 - Cowboy AI, Inc.
//! Entities and Aggregate Roots
//!
//! An entity is an object defined by its identity rather than its attributes.
//! Every entity embeds an [`EntityHeader`] holding its identity together with
//! its copy bookkeeping: whether it was produced by the copy engine and, if
//! so, the identity of the entity it was copied from.
//!
//! The header exposes no public mutators. Identity is assigned once at
//! construction and only the copy engine may replace it on a copy.
//!
//! # Equality
//!
//! Two entities are equal iff their identities are equal. Use
//! [`impl_entity_equality!`](crate::impl_entity_equality) to derive
//! `PartialEq`, `Eq` and `Hash` accordingly.

use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, ErrorCode, Parameter};
use crate::identity::Identity;
use crate::short_type_name;

/// Identity and copy bookkeeping of one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityHeader<I> {
    id: I,
    #[serde(default)]
    copied: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    original_id: Option<I>,
}

impl<I: Identity> EntityHeader<I> {
    /// Header of a freshly created entity
    pub fn new(id: I) -> Self {
        Self {
            id,
            copied: false,
            original_id: None,
        }
    }

    /// Rehydrate a header, e.g. when loading a previously copied entity
    pub fn rehydrate(id: I, copied: bool, original_id: Option<I>) -> Self {
        Self {
            id,
            copied,
            original_id,
        }
    }

    pub fn id(&self) -> &I {
        &self.id
    }

    pub fn is_copied(&self) -> bool {
        self.copied
    }

    pub fn original_id(&self) -> Option<&I> {
        self.original_id.as_ref()
    }

    /// Replace the identity, returning the previous one
    pub(crate) fn reassign(&mut self, id: I) -> I {
        std::mem::replace(&mut self.id, id)
    }

    pub(crate) fn mark_copied_from(&mut self, original_id: I) {
        self.copied = true;
        self.original_id = Some(original_id);
    }
}

/// Object uniquely identified by an [`Identity`]
pub trait Entity: Clone {
    type Id: Identity;

    fn header(&self) -> &EntityHeader<Self::Id>;

    fn header_mut(&mut self) -> &mut EntityHeader<Self::Id>;

    fn id(&self) -> &Self::Id {
        self.header().id()
    }

    /// Whether this entity was produced by the copy engine
    fn is_copied(&self) -> bool {
        self.header().is_copied()
    }

    /// Identity of the entity this one was copied from
    fn original_id(&self) -> Option<&Self::Id> {
        self.header().original_id()
    }

    fn same_identity_as(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

/// Entity forming the consistency boundary for its nested entities
///
/// The version counter backs optimistic concurrency in persistence layers and
/// only ever grows. The copy engine clones it verbatim.
pub trait AggregateRoot: Entity {
    fn version(&self) -> u64;

    fn set_version(&mut self, version: u64);

    /// Bump the version by one and return the new value
    fn increment_version(&mut self) -> u64 {
        let next = self.version().saturating_add(1);
        self.set_version(next);
        next
    }
}

/// `EntityNotFound` error for an entity of type `E`
pub fn entity_not_found<E: Entity>(id: &E::Id) -> DomainError {
    ErrorCode::EntityNotFound.with([
        Parameter::of("class", short_type_name::<E>()),
        Parameter::of("id", id.to_string()),
    ])
}

/// `EntityNotFoundBy` error for an entity of type `E` looked up by `name`
pub fn entity_not_found_by<E: Entity>(name: &str, value: impl Serialize) -> DomainError {
    ErrorCode::EntityNotFoundBy.with([
        Parameter::of("class", short_type_name::<E>()),
        Parameter::of("name", name),
        Parameter::of("id", value),
    ])
}

/// `AggregateNotFound` error for an aggregate of type `A`
pub fn aggregate_not_found<A: AggregateRoot>(id: &A::Id) -> DomainError {
    ErrorCode::AggregateNotFound.with([
        Parameter::of("class", short_type_name::<A>()),
        Parameter::of("id", id.to_string()),
    ])
}

/// `AggregateNotFoundBy` error for an aggregate of type `A` looked up by `name`
pub fn aggregate_not_found_by<A: AggregateRoot>(name: &str, value: impl Serialize) -> DomainError {
    ErrorCode::AggregateNotFoundBy.with([
        Parameter::of("class", short_type_name::<A>()),
        Parameter::of("name", name),
        Parameter::of("id", value),
    ])
}

/// Implement `PartialEq`, `Eq` and `Hash` by entity identity
#[macro_export]
macro_rules! impl_entity_equality {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ::core::cmp::PartialEq for $ty {
                fn eq(&self, other: &Self) -> bool {
                    $crate::Entity::id(self) == $crate::Entity::id(other)
                }
            }

            impl ::core::cmp::Eq for $ty {}

            impl ::core::hash::Hash for $ty {
                fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                    ::core::hash::Hash::hash($crate::Entity::id(self), state);
                }
            }
        )+
    };
}
