// Copyright (c) 2025 - Cowboy AI, Inc.
//! Identity-Unique Collections
//!
//! Containers owned by an entity that enforce uniqueness by identity:
//!
//! - [`Entities`] / [`OrderedEntities`] hold nested entities and are copied
//!   member by member by the copy engine
//! - [`EntityIds`] / [`OrderedEntityIds`] hold references to other entities
//!   by identity and are cloned verbatim
//!
//! The unordered variants iterate in identity order so that iteration is
//! deterministic; the ordered variants keep insertion or explicit order.

pub mod entities;
pub mod entity_ids;

pub use entities::{Entities, OrderedEntities};
pub use entity_ids::{EntityIds, OrderedEntityIds};

use crate::copy::CopyableEntity;
use crate::errors::DomainResult;

/// Contract the copy engine relies on to rebuild a collection slot
///
/// A copy drains the members of the cloned collection, re-identifies each one
/// and inserts it into an empty collection of the same kind, so `insert_member`
/// must keep enforcing the collection's uniqueness rules.
pub trait EntityCollection: Clone {
    type Member: CopyableEntity;

    /// Empty collection of the same concrete kind and configuration
    fn empty_like(&self) -> Self;

    /// Members in the collection's iteration order
    fn members(&self) -> impl Iterator<Item = &Self::Member> + '_;

    /// Remove and return all members in iteration order
    fn take_members(&mut self) -> Vec<Self::Member>;

    fn insert_member(&mut self, member: Self::Member) -> DomainResult<()>;

    fn member_count(&self) -> usize;
}
