// Copyright (c) 2025 - Cowboy AI, Inc.
//! Structure Discovery
//!
//! Lists the identity-bearing slots an entity declares, including the slots
//! of its embedded parts. Discovery does not descend into nested entities or
//! collection members; each of those reports its own slots when visited.

use serde::Serialize;

use super::structure::{CopyableEntity, Location, SlotKind, StructureVisitor};
use super::{CopyError, CopyResult};
use crate::collections::EntityCollection;
use crate::identity::Identity;
use crate::short_type_name;

/// Identity-bearing slots of one entity, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Discovery {
    slots: Vec<(Location, SlotKind)>,
}

impl Discovery {
    pub fn slots(&self) -> &[(Location, SlotKind)] {
        &self.slots
    }

    /// Locations of single-entity slots
    pub fn entities(&self) -> Vec<&Location> {
        self.of_kind(SlotKind::Entity)
    }

    /// Locations of entity collection slots
    pub fn collections(&self) -> Vec<&Location> {
        self.of_kind(SlotKind::Collection)
    }

    /// Whether the entity declares no identity-bearing slots
    pub fn is_leaf(&self) -> bool {
        self.slots.is_empty()
    }

    fn of_kind(&self, kind: SlotKind) -> Vec<&Location> {
        self.slots
            .iter()
            .filter(|(_, slot)| *slot == kind)
            .map(|(location, _)| location)
            .collect()
    }
}

struct Discoverer {
    slots: Vec<(Location, SlotKind)>,
}

impl StructureVisitor for Discoverer {
    fn entity<E: CopyableEntity>(&mut self, at: Location, _entity: Option<&E>) {
        self.slots.push((at, SlotKind::Entity));
    }

    fn collection<C: EntityCollection>(&mut self, at: Location, _collection: Option<&C>) {
        self.slots.push((at, SlotKind::Collection));
    }
}

/// Discover the declared slots of `entity`
///
/// Absent optional slots are reported as well. Fails with
/// [`CopyError::InvalidArgument`] when the entity has no identity.
pub fn discover<E: CopyableEntity>(entity: &E) -> CopyResult<Discovery> {
    if entity.id().is_absent() {
        return Err(CopyError::InvalidArgument {
            argument: "entity".to_string(),
            reason: format!("{} has no identity", short_type_name::<E>()),
        });
    }

    let mut discoverer = Discoverer { slots: Vec::new() };
    entity.walk(&Location::root(), &mut discoverer);

    Ok(Discovery {
        slots: discoverer.slots,
    })
}
