// Copyright (c) 2025 - Cowboy AI, Inc.
//! Graph Copier
//!
//! # Invariants
//!
//! 1. The original is only borrowed immutably and is never observed in a
//!    partially re-identified state
//! 2. Every entity reachable from the copy carries a fresh identity and
//!    records the identity it was copied from
//! 3. Collections keep their kind, member count and member order
//! 4. State outside declared slots is cloned unchanged; transient slots are
//!    reset
//!
//! On failure the candidate is dropped and the error returned; nothing is
//! retried.

use thiserror::Error;
use tracing::{debug, trace, warn};

use super::config::CopyConfig;
use super::discovery::discover;
use super::factory::{self, IdentityFactory, UuidFactory};
use super::structure::{CopyableEntity, Location, StructureVisitorMut, Transient};
use crate::collections::EntityCollection;
use crate::errors::{DomainError, ErrorCode, Parameter};
use crate::identity::Identity;
use crate::short_type_name;

/// Copy engine failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CopyError {
    /// The entity handed to the engine cannot be copied
    #[error("Invalid argument {argument}: {reason}")]
    InvalidArgument { argument: String, reason: String },

    /// A declared slot could not be read or rebuilt
    #[error("Cannot access {location} of {entity}: {reason}")]
    StructureAccess {
        entity: &'static str,
        location: Location,
        reason: String,
    },

    /// No new identity of the required kind could be produced
    #[error("Cannot create a new {kind}: {reason}")]
    IdentityConstruction { kind: &'static str, reason: String },
}

/// Result type for copy operations
pub type CopyResult<T> = Result<T, CopyError>;

impl From<CopyError> for DomainError {
    fn from(error: CopyError) -> Self {
        match error {
            CopyError::InvalidArgument { argument, reason } => ErrorCode::InvalidArgument.with([
                Parameter::of("name", argument),
                Parameter::of("reason", reason),
            ]),
            CopyError::StructureAccess {
                entity,
                location,
                reason,
            } => ErrorCode::CannotAccessField.with([
                Parameter::of("field", format!("{}.{}", entity, location)),
                Parameter::of("reason", reason),
            ]),
            CopyError::IdentityConstruction { kind, reason } => ErrorCode::InstanceNotCreated
                .with([Parameter::of("class", kind), Parameter::of("reason", reason)]),
        }
    }
}

/// Deep copy engine with identity reassignment
#[derive(Debug, Clone)]
pub struct EntityCopier<F = UuidFactory> {
    factory: F,
}

impl EntityCopier<UuidFactory> {
    pub fn new(config: &CopyConfig) -> Self {
        Self {
            factory: config.factory(),
        }
    }
}

impl Default for EntityCopier<UuidFactory> {
    fn default() -> Self {
        Self::new(&CopyConfig::default())
    }
}

impl<F: IdentityFactory> EntityCopier<F> {
    /// Copier drawing identities from a custom factory
    pub fn with_factory(factory: F) -> Self {
        Self { factory }
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// New identity of the same kind as `existing`
    pub fn new_identity_like<I: Identity>(&self, existing: &I) -> CopyResult<I> {
        factory::new_identity_like(&self.factory, existing)
    }

    /// Deep copy of `entity` in which every entity carries a fresh identity
    pub fn copy<E: CopyableEntity>(&self, entity: &E) -> CopyResult<E> {
        let kind = short_type_name::<E>();
        let discovery = discover(entity).inspect_err(|error| {
            warn!("Refusing to copy {}: {}", kind, error);
        })?;

        debug!(
            "Copying {} {} ({} entity slots, {} collection slots)",
            kind,
            entity.id(),
            discovery.entities().len(),
            discovery.collections().len()
        );

        let mut candidate = entity.clone();
        let mut reidentifier = Reidentifier {
            copier: self,
            owner: kind,
        };

        match reidentifier.reidentify(&mut candidate, &Location::root()) {
            Ok(()) => {
                debug!("Copied {} {} to {}", kind, entity.id(), candidate.id());
                Ok(candidate)
            }
            Err(error) => {
                warn!("Copy of {} {} failed: {}", kind, entity.id(), error);
                Err(error)
            }
        }
    }

    /// Copy every entity of `entities`, failing on the first error
    pub fn copy_all<'a, E>(&self, entities: impl IntoIterator<Item = &'a E>) -> CopyResult<Vec<E>>
    where
        E: CopyableEntity + 'a,
    {
        entities.into_iter().map(|entity| self.copy(entity)).collect()
    }
}

/// Re-identifies a cloned candidate in place
struct Reidentifier<'c, F> {
    copier: &'c EntityCopier<F>,
    owner: &'static str,
}

impl<F: IdentityFactory> Reidentifier<'_, F> {
    fn reidentify<E: CopyableEntity>(&mut self, entity: &mut E, at: &Location) -> CopyResult<()> {
        if entity.id().is_absent() {
            return Err(CopyError::InvalidArgument {
                argument: at.to_string(),
                reason: format!("{} has no identity", short_type_name::<E>()),
            });
        }

        let fresh = self.copier.new_identity_like(entity.id())?;
        let original = entity.header_mut().reassign(fresh);
        entity.header_mut().mark_copied_from(original);

        entity.walk_mut(at, self)
    }
}

impl<F: IdentityFactory> StructureVisitorMut for Reidentifier<'_, F> {
    fn entity<E: CopyableEntity>(&mut self, at: Location, entity: Option<&mut E>) -> CopyResult<()> {
        match entity {
            Some(entity) => {
                trace!("Re-identifying {} at {}", short_type_name::<E>(), at);
                self.reidentify(entity, &at)
            }
            None => Ok(()),
        }
    }

    fn collection<C: EntityCollection>(
        &mut self,
        at: Location,
        collection: Option<&mut C>,
    ) -> CopyResult<()> {
        let Some(collection) = collection else {
            return Ok(());
        };

        let members = collection.take_members();
        let mut rebuilt = collection.empty_like();

        for (index, mut member) in members.into_iter().enumerate() {
            let location = at.member(index);
            self.reidentify(&mut member, &location)?;
            rebuilt
                .insert_member(member)
                .map_err(|error| CopyError::StructureAccess {
                    entity: self.owner,
                    location,
                    reason: error.to_string(),
                })?;
        }

        trace!("Rebuilt {} with {} members", at, rebuilt.member_count());
        *collection = rebuilt;
        Ok(())
    }

    fn transient<T: Transient>(&mut self, at: Location, value: &mut T) -> CopyResult<()> {
        trace!("Resetting {}", at);
        value.reset();
        Ok(())
    }
}
