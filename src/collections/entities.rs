// Copyright (c) 2025 - Cowboy AI, Inc.
//! Entity Collections
//!
//! [`Entities`] is an unordered set of entities keyed by identity;
//! [`OrderedEntities`] keeps its members in insertion or explicit order.
//! Both reject a second member with an identity already present.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::EntityCollection;
use crate::copy::CopyableEntity;
use crate::entity::{entity_not_found, Entity};
use crate::errors::{DomainError, DomainResult, ErrorCode, Parameter};
use crate::short_type_name;
use crate::validation::{checks, constraint, Validation};

fn already_exists<E: Entity>(id: &E::Id) -> DomainError {
    ErrorCode::EntityAlreadyExists.with([
        Parameter::of("name", short_type_name::<E>()),
        Parameter::of("id", id.to_string()),
    ])
}

// ============================================================================
// Entities
// ============================================================================

/// Unordered, identity-unique set of entities
///
/// Iteration follows identity order.
#[derive(Debug, Clone)]
pub struct Entities<E: Entity> {
    members: BTreeMap<E::Id, E>,
}

impl<E: Entity> Default for Entities<E> {
    fn default() -> Self {
        Self {
            members: BTreeMap::new(),
        }
    }
}

impl<E: Entity> Entities<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect members, failing on the first duplicate identity
    pub fn from_members(members: impl IntoIterator<Item = E>) -> DomainResult<Self> {
        let mut entities = Self::new();
        entities.add_all(members)?;
        Ok(entities)
    }

    pub fn add(&mut self, entity: E) -> DomainResult<()> {
        if self.members.contains_key(entity.id()) {
            return Err(already_exists::<E>(entity.id()));
        }
        self.members.insert(entity.id().clone(), entity);
        Ok(())
    }

    pub fn add_all(&mut self, entities: impl IntoIterator<Item = E>) -> DomainResult<()> {
        entities.into_iter().try_for_each(|entity| self.add(entity))
    }

    pub fn remove(&mut self, entity: &E) -> DomainResult<E> {
        self.remove_by_id(entity.id())
    }

    pub fn remove_by_id(&mut self, id: &E::Id) -> DomainResult<E> {
        self.members
            .remove(id)
            .ok_or_else(|| entity_not_found::<E>(id))
    }

    pub fn contains(&self, entity: &E) -> bool {
        self.contains_id(entity.id())
    }

    pub fn contains_id(&self, id: &E::Id) -> bool {
        self.members.contains_key(id)
    }

    pub fn contains_by(&self, predicate: impl Fn(&E) -> bool) -> bool {
        self.iter().any(predicate)
    }

    pub fn find(&self, id: &E::Id) -> Option<&E> {
        self.members.get(id)
    }

    pub fn find_mut(&mut self, id: &E::Id) -> Option<&mut E> {
        self.members.get_mut(id)
    }

    pub fn find_by(&self, predicate: impl Fn(&E) -> bool) -> Option<&E> {
        self.iter().find(|entity| predicate(entity))
    }

    pub fn ids(&self) -> Vec<E::Id> {
        self.members.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> + '_ {
        self.members.values()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Whether both collections hold the same identities
    pub fn same_members(&self, other: &Self) -> bool {
        self.len() == other.len() && other.iter().all(|entity| self.contains(entity))
    }
}

impl<E: CopyableEntity> EntityCollection for Entities<E> {
    type Member = E;

    fn empty_like(&self) -> Self {
        Self::new()
    }

    fn members(&self) -> impl Iterator<Item = &E> + '_ {
        self.iter()
    }

    fn take_members(&mut self) -> Vec<E> {
        std::mem::take(&mut self.members).into_values().collect()
    }

    fn insert_member(&mut self, member: E) -> DomainResult<()> {
        self.add(member)
    }

    fn member_count(&self) -> usize {
        self.len()
    }
}

impl<E: Entity> IntoIterator for Entities<E> {
    type Item = E;
    type IntoIter = std::collections::btree_map::IntoValues<E::Id, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_values()
    }
}

impl<'a, E: Entity> IntoIterator for &'a Entities<E> {
    type Item = &'a E;
    type IntoIter = std::collections::btree_map::Values<'a, E::Id, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.values()
    }
}

impl<E: Entity + Serialize> Serialize for Entities<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, E: Entity + Deserialize<'de>> Deserialize<'de> for Entities<E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let members = Vec::<E>::deserialize(deserializer)?;
        Self::from_members(members).map_err(D::Error::custom)
    }
}

// ============================================================================
// OrderedEntities
// ============================================================================

/// Identity-unique list of entities preserving insertion or explicit order
#[derive(Debug, Clone)]
pub struct OrderedEntities<E: Entity> {
    members: Vec<E>,
}

impl<E: Entity> Default for OrderedEntities<E> {
    fn default() -> Self {
        Self {
            members: Vec::new(),
        }
    }
}

impl<E: Entity> OrderedEntities<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect members in order, failing on the first duplicate identity
    pub fn from_members(members: impl IntoIterator<Item = E>) -> DomainResult<Self> {
        let mut entities = Self::new();
        entities.add_all(members)?;
        Ok(entities)
    }

    pub fn add(&mut self, entity: E) -> DomainResult<()> {
        if self.contains_id(entity.id()) {
            return Err(already_exists::<E>(entity.id()));
        }
        self.members.push(entity);
        Ok(())
    }

    pub fn add_all(&mut self, entities: impl IntoIterator<Item = E>) -> DomainResult<()> {
        entities.into_iter().try_for_each(|entity| self.add(entity))
    }

    /// Replace all members; on a duplicate the collection is left unchanged
    pub fn replace_all(&mut self, entities: impl IntoIterator<Item = E>) -> DomainResult<()> {
        *self = Self::from_members(entities)?;
        Ok(())
    }

    pub fn remove(&mut self, entity: &E) -> DomainResult<E> {
        self.remove_by_id(entity.id())
    }

    pub fn remove_by_id(&mut self, id: &E::Id) -> DomainResult<E> {
        let position = self
            .position(id)
            .ok_or_else(|| entity_not_found::<E>(id))?;
        Ok(self.members.remove(position))
    }

    pub fn contains(&self, entity: &E) -> bool {
        self.contains_id(entity.id())
    }

    pub fn contains_id(&self, id: &E::Id) -> bool {
        self.position(id).is_some()
    }

    pub fn contains_by(&self, predicate: impl Fn(&E) -> bool) -> bool {
        self.members.iter().any(predicate)
    }

    pub fn position(&self, id: &E::Id) -> Option<usize> {
        self.members.iter().position(|entity| entity.id() == id)
    }

    pub fn find(&self, id: &E::Id) -> Option<&E> {
        self.members.iter().find(|entity| entity.id() == id)
    }

    pub fn find_mut(&mut self, id: &E::Id) -> Option<&mut E> {
        self.members.iter_mut().find(|entity| entity.id() == id)
    }

    pub fn find_by(&self, predicate: impl Fn(&E) -> bool) -> Option<&E> {
        self.members.iter().find(|entity| predicate(entity))
    }

    pub fn get(&self, index: usize) -> Option<&E> {
        self.members.get(index)
    }

    pub fn first(&self) -> Option<&E> {
        self.members.first()
    }

    pub fn last(&self) -> Option<&E> {
        self.members.last()
    }

    pub fn ids(&self) -> Vec<E::Id> {
        self.members.iter().map(|entity| entity.id().clone()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.members.iter()
    }

    pub fn as_slice(&self) -> &[E] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Reorder members to follow `ids`
    ///
    /// `ids` must name every member. Identities without a member are ignored,
    /// as are repeated identities after their first occurrence.
    pub fn order_by_ids(&mut self, ids: &[E::Id]) -> DomainResult<()> {
        Validation::for_type::<Self>()
            .check(constraint("entity_ids", ids, checks::not_empty()))
            .raise()?;

        if self.members.iter().any(|entity| !ids.contains(entity.id())) {
            return Err(ErrorCode::OrderNeedsToSpecifyAllIds.with([
                Parameter::of("name", "entity_ids"),
                Parameter::of("value", ids),
            ]));
        }

        let mut remaining: Vec<Option<E>> =
            std::mem::take(&mut self.members).into_iter().map(Some).collect();

        for id in ids {
            let next = remaining.iter_mut().find_map(|slot| {
                if slot.as_ref().is_some_and(|entity| entity.id() == id) {
                    slot.take()
                } else {
                    None
                }
            });
            if let Some(entity) = next {
                self.members.push(entity);
            }
        }

        Ok(())
    }

    /// Stable sort of the members
    pub fn sort_by(&mut self, compare: impl FnMut(&E, &E) -> Ordering) {
        self.members.sort_by(compare);
    }

    /// Whether both collections hold the same identities, regardless of order
    pub fn same_members(&self, other: &Self) -> bool {
        self.len() == other.len() && other.iter().all(|entity| self.contains(entity))
    }
}

impl<E: CopyableEntity> EntityCollection for OrderedEntities<E> {
    type Member = E;

    fn empty_like(&self) -> Self {
        Self {
            members: Vec::with_capacity(self.members.len()),
        }
    }

    fn members(&self) -> impl Iterator<Item = &E> + '_ {
        self.iter()
    }

    fn take_members(&mut self) -> Vec<E> {
        std::mem::take(&mut self.members)
    }

    fn insert_member(&mut self, member: E) -> DomainResult<()> {
        self.add(member)
    }

    fn member_count(&self) -> usize {
        self.len()
    }
}

impl<E: Entity> IntoIterator for OrderedEntities<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

impl<'a, E: Entity> IntoIterator for &'a OrderedEntities<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl<E: Entity + Serialize> Serialize for OrderedEntities<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, E: Entity + Deserialize<'de>> Deserialize<'de> for OrderedEntities<E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let members = Vec::<E>::deserialize(deserializer)?;
        Self::from_members(members).map_err(D::Error::custom)
    }
}
