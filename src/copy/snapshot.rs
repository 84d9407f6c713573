// Copyright (c) 2025 - Cowboy AI, Inc.
//! Identity layout snapshots
//!
//! A [`StructureSnapshot`] records, for every entity reachable from a root,
//! its identity and copy bookkeeping keyed by [`Location`], and for every
//! collection slot the identities of its members in iteration order. Two
//! snapshots compare equal iff the identity layouts are identical.

use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

use super::structure::{CopyableEntity, Location, StructureVisitor};
use crate::collections::EntityCollection;
use crate::entity::Entity;
use crate::identity::Identity;

/// Identity and copy bookkeeping of one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityMark {
    pub id: Uuid,
    pub copied: bool,
    pub original_id: Option<Uuid>,
}

impl EntityMark {
    fn of<E: CopyableEntity>(entity: &E) -> Self {
        Self {
            id: entity.id().as_uuid(),
            copied: entity.is_copied(),
            original_id: entity.original_id().map(Identity::as_uuid),
        }
    }
}

/// Value held at one location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SlotValue {
    Absent,
    Entity(EntityMark),
    Collection(Vec<Uuid>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructureSnapshot {
    slots: BTreeMap<Location, SlotValue>,
}

impl StructureSnapshot {
    /// Capture the identity layout of `entity` and everything it contains
    pub fn capture<E: CopyableEntity>(entity: &E) -> Self {
        let mut capture = Capture {
            slots: BTreeMap::new(),
        };
        capture.record(Location::root(), entity);
        Self {
            slots: capture.slots,
        }
    }

    pub fn get(&self, at: &Location) -> Option<&SlotValue> {
        self.slots.get(at)
    }

    /// Mark of the entity at `at`, if one is present there
    pub fn entity(&self, at: &Location) -> Option<&EntityMark> {
        match self.slots.get(at) {
            Some(SlotValue::Entity(mark)) => Some(mark),
            _ => None,
        }
    }

    pub fn root(&self) -> Option<&EntityMark> {
        self.entity(&Location::root())
    }

    pub fn locations(&self) -> impl Iterator<Item = &Location> + '_ {
        self.slots.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Location, &SlotValue)> + '_ {
        self.slots.iter()
    }

    /// Identities of all captured entities
    pub fn identities(&self) -> Vec<Uuid> {
        self.slots
            .values()
            .filter_map(|value| match value {
                SlotValue::Entity(mark) => Some(mark.id),
                _ => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

struct Capture {
    slots: BTreeMap<Location, SlotValue>,
}

impl Capture {
    fn record<E: CopyableEntity>(&mut self, at: Location, entity: &E) {
        self.slots.insert(at.clone(), SlotValue::Entity(EntityMark::of(entity)));
        entity.walk(&at, self);
    }
}

impl StructureVisitor for Capture {
    fn entity<E: CopyableEntity>(&mut self, at: Location, entity: Option<&E>) {
        match entity {
            Some(entity) => self.record(at, entity),
            None => {
                self.slots.insert(at, SlotValue::Absent);
            }
        }
    }

    fn collection<C: EntityCollection>(&mut self, at: Location, collection: Option<&C>) {
        let Some(collection) = collection else {
            self.slots.insert(at, SlotValue::Absent);
            return;
        };

        let ids = collection
            .members()
            .map(|member| member.id().as_uuid())
            .collect();
        self.slots.insert(at.clone(), SlotValue::Collection(ids));

        for (index, member) in collection.members().enumerate() {
            self.record(at.member(index), member);
        }
    }
}
