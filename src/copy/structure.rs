// Copyright (c) 2025 - Cowboy AI, Inc.
//! Entity Structure Registration
//!
//! Each entity type declares which of its fields hold identity-bearing
//! substructures by implementing [`Structure`], normally through
//! [`entity_structure!`](crate::entity_structure). The copy engine and the
//! discovery walk only ever see an entity through this declaration.
//!
//! # Slot kinds
//!
//! | kind                  | field type                      |
//! |-----------------------|---------------------------------|
//! | `entity`              | `E: CopyableEntity`             |
//! | `optional_entity`     | `Option<E>`                     |
//! | `collection`          | `C: EntityCollection`           |
//! | `optional_collection` | `Option<C>`                     |
//! | `embedded`            | non-entity part with `Structure`|
//! | `transient`           | `T: Transient`, reset on copies |
//!
//! Fields not declared are plain state and are cloned verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{CopyResult, EntityCopier, UuidFactory};
use crate::collections::EntityCollection;
use crate::entity::Entity;

/// Dotted path of a slot relative to the root entity
///
/// The root itself is the empty path. Collection members are addressed by
/// index, e.g. `lines[1].parts`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Location(String);

impl Location {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(&self, name: &str) -> Self {
        if self.is_root() {
            Self(name.to_string())
        } else {
            Self(format!("{}.{}", self.0, name))
        }
    }

    pub fn member(&self, index: usize) -> Self {
        Self(format!("{}[{}]", self.0, index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, "<root>")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl From<&str> for Location {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

/// Kind of an identity-bearing slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    Entity,
    Collection,
}

/// Read-only visit of declared slots
///
/// Absent optional slots are visited with `None`.
pub trait StructureVisitor {
    fn entity<E: CopyableEntity>(&mut self, at: Location, entity: Option<&E>);

    fn collection<C: EntityCollection>(&mut self, at: Location, collection: Option<&C>);
}

/// Mutating visit of declared slots
pub trait StructureVisitorMut {
    fn entity<E: CopyableEntity>(&mut self, at: Location, entity: Option<&mut E>) -> CopyResult<()>;

    fn collection<C: EntityCollection>(
        &mut self,
        at: Location,
        collection: Option<&mut C>,
    ) -> CopyResult<()>;

    fn transient<T: Transient>(&mut self, at: Location, value: &mut T) -> CopyResult<()> {
        let _ = (at, value);
        Ok(())
    }
}

/// Declared composition of an entity or of an embedded part
///
/// Both walks default to "no slots", which is the structure of a leaf.
pub trait Structure {
    fn walk<V: StructureVisitor>(&self, at: &Location, visitor: &mut V) {
        let _ = (at, visitor);
    }

    fn walk_mut<V: StructureVisitorMut>(&mut self, at: &Location, visitor: &mut V) -> CopyResult<()> {
        let _ = (at, visitor);
        Ok(())
    }
}

/// State owned by one instance only, reset on copies
pub trait Transient {
    fn reset(&mut self);
}

impl<T> Transient for Vec<T> {
    fn reset(&mut self) {
        self.clear();
    }
}

impl<T> Transient for Option<T> {
    fn reset(&mut self) {
        *self = None;
    }
}

/// Entity that can be deep-copied with fresh identities
pub trait CopyableEntity: Entity + Structure {
    /// Copy with the default engine configuration
    fn copied(&self) -> CopyResult<Self> {
        EntityCopier::<UuidFactory>::default().copy(self)
    }
}

impl<T: Entity + Structure> CopyableEntity for T {}

/// Declare the identity-bearing slots of a type
///
/// ```rust
/// # use cim_domain_model::*;
/// # #[derive(Debug, Clone)]
/// # struct Line { header: EntityHeader<EntityId<Line>> }
/// # impl Entity for Line {
/// #     type Id = EntityId<Line>;
/// #     fn header(&self) -> &EntityHeader<Self::Id> { &self.header }
/// #     fn header_mut(&mut self) -> &mut EntityHeader<Self::Id> { &mut self.header }
/// # }
/// #[derive(Debug, Clone)]
/// struct Order {
///     header: EntityHeader<EntityId<Order>>,
///     lines: OrderedEntities<Line>,
///     preferred: Option<Line>,
///     events: DomainEventCollector<String>,
/// }
/// # impl Entity for Order {
/// #     type Id = EntityId<Order>;
/// #     fn header(&self) -> &EntityHeader<Self::Id> { &self.header }
/// #     fn header_mut(&mut self) -> &mut EntityHeader<Self::Id> { &mut self.header }
/// # }
///
/// entity_structure!(Line {});
/// entity_structure!(Order {
///     collection lines,
///     optional_entity preferred,
///     transient events,
/// });
/// ```
#[macro_export]
macro_rules! entity_structure {
    ($ty:ty { $($kind:ident $field:ident),* $(,)? }) => {
        impl $crate::Structure for $ty {
            fn walk<V: $crate::StructureVisitor>(&self, at: &$crate::Location, visitor: &mut V) {
                let _ = (&at, &visitor);
                $( $crate::__walk_slot!(@read $kind self.$field, at, visitor); )*
            }

            fn walk_mut<V: $crate::StructureVisitorMut>(
                &mut self,
                at: &$crate::Location,
                visitor: &mut V,
            ) -> $crate::CopyResult<()> {
                let _ = (&at, &visitor);
                $( $crate::__walk_slot!(@write $kind self.$field, at, visitor); )*
                ::core::result::Result::Ok(())
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __walk_slot {
    (@read entity $this:ident . $field:ident, $at:ident, $visitor:ident) => {
        $visitor.entity(
            $at.child(::core::stringify!($field)),
            ::core::option::Option::Some(&$this.$field),
        );
    };
    (@read optional_entity $this:ident . $field:ident, $at:ident, $visitor:ident) => {
        $visitor.entity($at.child(::core::stringify!($field)), $this.$field.as_ref());
    };
    (@read collection $this:ident . $field:ident, $at:ident, $visitor:ident) => {
        $visitor.collection(
            $at.child(::core::stringify!($field)),
            ::core::option::Option::Some(&$this.$field),
        );
    };
    (@read optional_collection $this:ident . $field:ident, $at:ident, $visitor:ident) => {
        $visitor.collection($at.child(::core::stringify!($field)), $this.$field.as_ref());
    };
    (@read embedded $this:ident . $field:ident, $at:ident, $visitor:ident) => {
        $crate::Structure::walk(
            &$this.$field,
            &$at.child(::core::stringify!($field)),
            &mut *$visitor,
        );
    };
    (@read transient $this:ident . $field:ident, $at:ident, $visitor:ident) => {};

    (@write entity $this:ident . $field:ident, $at:ident, $visitor:ident) => {
        $visitor.entity(
            $at.child(::core::stringify!($field)),
            ::core::option::Option::Some(&mut $this.$field),
        )?;
    };
    (@write optional_entity $this:ident . $field:ident, $at:ident, $visitor:ident) => {
        $visitor.entity($at.child(::core::stringify!($field)), $this.$field.as_mut())?;
    };
    (@write collection $this:ident . $field:ident, $at:ident, $visitor:ident) => {
        $visitor.collection(
            $at.child(::core::stringify!($field)),
            ::core::option::Option::Some(&mut $this.$field),
        )?;
    };
    (@write optional_collection $this:ident . $field:ident, $at:ident, $visitor:ident) => {
        $visitor.collection($at.child(::core::stringify!($field)), $this.$field.as_mut())?;
    };
    (@write embedded $this:ident . $field:ident, $at:ident, $visitor:ident) => {
        $crate::Structure::walk_mut(
            &mut $this.$field,
            &$at.child(::core::stringify!($field)),
            &mut *$visitor,
        )?;
    };
    (@write transient $this:ident . $field:ident, $at:ident, $visitor:ident) => {
        $visitor.transient($at.child(::core::stringify!($field)), &mut $this.$field)?;
    };
}
