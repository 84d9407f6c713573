// Copyright (c) 2025 - Cowboy AI, Inc.
//! Deep Copy with Identity Reassignment
//!
//! Produces an independent deep copy of an entity in which the entity itself
//! and every entity nested in it, transitively, receive freshly generated
//! identities of the same kind. Each re-identified entity is flagged as a copy
//! and remembers the identity it was copied from.
//!
//! # How a copy is made
//!
//! ```text
//! copy(&root)
//!   → discover   validate root identity, list declared slots
//!   → clone      owned candidate, original only borrowed
//!   → re-identify candidate root
//!       → entity slots       re-identify recursively
//!       → collection slots   rebuild: drain, re-identify members, re-insert
//!       → transient slots    reset
//!   → candidate
//! ```
//!
//! The copy engine only knows an entity through its [`Structure`]
//! declaration (see [`entity_structure!`](crate::entity_structure)).
//! Identity sets, value objects and any other undeclared state are cloned
//! verbatim, so a copy keeps referencing the same external aggregates.
//!
//! Shared references between slots are not supported: every slot is owned
//! and copied independently.

pub mod config;
pub mod copier;
pub mod discovery;
pub mod factory;
pub mod snapshot;
pub mod structure;

pub use config::CopyConfig;
pub use copier::{CopyError, CopyResult, EntityCopier};
pub use discovery::{discover, Discovery};
pub use factory::{new_identity_like, IdStrategy, IdentityFactory, UuidFactory};
pub use snapshot::{EntityMark, SlotValue, StructureSnapshot};
pub use structure::{
    CopyableEntity, Location, SlotKind, Structure, StructureVisitor, StructureVisitorMut,
    Transient,
};

/// Deep copy of `entity` using the default configuration
pub fn copy<E: CopyableEntity>(entity: &E) -> CopyResult<E> {
    EntityCopier::new(&CopyConfig::default()).copy(entity)
}

/// Deep copy of every entity in `entities` using the default configuration
pub fn copy_all<'a, E>(entities: impl IntoIterator<Item = &'a E>) -> CopyResult<Vec<E>>
where
    E: CopyableEntity + 'a,
{
    EntityCopier::new(&CopyConfig::default()).copy_all(entities)
}
