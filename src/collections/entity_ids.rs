// Copyright (c) 2025 - Cowboy AI, Inc.
//! Identity Reference Collections
//!
//! References to other entities held by identity only. The copy engine never
//! descends into these; a copy keeps pointing at the same referenced entities.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;

use crate::errors::{DomainError, DomainResult, ErrorCode, Parameter};
use crate::identity::Identity;

fn id_already_exists<I: Identity>(id: &I) -> DomainError {
    ErrorCode::EntityIdAlreadyExists.with([
        Parameter::of("name", I::kind()),
        Parameter::of("id", id.to_string()),
    ])
}

fn id_not_found<I: Identity>(id: &I) -> DomainError {
    ErrorCode::EntityIdNotFound.with([
        Parameter::of("name", I::kind()),
        Parameter::of("id", id.to_string()),
    ])
}

/// Unordered set of identities, iterated in identity order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityIds<I: Identity> {
    ids: BTreeSet<I>,
}

impl<I: Identity> Default for EntityIds<I> {
    fn default() -> Self {
        Self {
            ids: BTreeSet::new(),
        }
    }
}

impl<I: Identity> EntityIds<I> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, id: I) -> DomainResult<()> {
        if self.ids.contains(&id) {
            return Err(id_already_exists(&id));
        }
        self.ids.insert(id);
        Ok(())
    }

    pub fn add_all(&mut self, ids: impl IntoIterator<Item = I>) -> DomainResult<()> {
        ids.into_iter().try_for_each(|id| self.add(id))
    }

    pub fn remove(&mut self, id: &I) -> DomainResult<()> {
        if self.ids.remove(id) {
            Ok(())
        } else {
            Err(id_not_found(id))
        }
    }

    pub fn contains(&self, id: &I) -> bool {
        self.ids.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &I> + '_ {
        self.ids.iter()
    }

    pub fn to_vec(&self) -> Vec<I> {
        self.ids.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

impl<I: Identity> Serialize for EntityIds<I> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.ids.iter())
    }
}

impl<'de, I: Identity> Deserialize<'de> for EntityIds<I> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut ids = Self::new();
        ids.add_all(Vec::<I>::deserialize(deserializer)?)
            .map_err(D::Error::custom)?;
        Ok(ids)
    }
}

/// Identities kept in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedEntityIds<I: Identity> {
    ids: Vec<I>,
}

impl<I: Identity> Default for OrderedEntityIds<I> {
    fn default() -> Self {
        Self { ids: Vec::new() }
    }
}

impl<I: Identity> OrderedEntityIds<I> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, id: I) -> DomainResult<()> {
        if self.ids.contains(&id) {
            return Err(id_already_exists(&id));
        }
        self.ids.push(id);
        Ok(())
    }

    pub fn add_all(&mut self, ids: impl IntoIterator<Item = I>) -> DomainResult<()> {
        ids.into_iter().try_for_each(|id| self.add(id))
    }

    pub fn remove(&mut self, id: &I) -> DomainResult<()> {
        let position = self
            .ids
            .iter()
            .position(|candidate| candidate == id)
            .ok_or_else(|| id_not_found(id))?;
        self.ids.remove(position);
        Ok(())
    }

    pub fn contains(&self, id: &I) -> bool {
        self.ids.contains(id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, I> {
        self.ids.iter()
    }

    pub fn as_slice(&self) -> &[I] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

impl<I: Identity> Serialize for OrderedEntityIds<I> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.ids.iter())
    }
}

impl<'de, I: Identity> Deserialize<'de> for OrderedEntityIds<I> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut ids = Self::new();
        ids.add_all(Vec::<I>::deserialize(deserializer)?)
            .map_err(D::Error::custom)?;
        Ok(ids)
    }
}
