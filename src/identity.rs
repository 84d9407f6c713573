// Copyright (c) 2025 - Cowboy AI, Inc.
//! Identity Value Objects
//!
//! An identity names exactly one entity instance. Identities are immutable,
//! compared by their underlying UUID, and typed by the kind of thing they
//! identify: an `EntityId<Order>` can never be confused with an
//! `EntityId<Customer>` even though both wrap a UUID.
//!
//! The nil UUID is reserved for "no identity" and is rejected wherever an
//! identity is required.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::{DomainResult, ErrorCode, Parameter};
use crate::short_type_name;

/// Contract every identity type fulfils
///
/// Besides value equality, an identity must be constructible from a raw UUID
/// so that a new identity of the same kind can be produced generically.
pub trait Identity:
    Clone
    + Eq
    + Ord
    + Hash
    + fmt::Debug
    + fmt::Display
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// Underlying UUID value
    fn as_uuid(&self) -> Uuid;

    /// Same-kind constructor used when a fresh identity is required
    fn try_from_uuid(uuid: Uuid) -> DomainResult<Self>;

    /// Human readable kind of this identity
    fn kind() -> &'static str {
        short_type_name::<Self>()
    }

    /// Whether this identity is the reserved "absent" value
    fn is_absent(&self) -> bool {
        self.as_uuid().is_nil()
    }
}

/// UUID identity typed by the kind `K` it identifies
///
/// `K` is only a marker and is never stored, usually the entity type itself:
///
/// ```rust
/// use cim_domain_model::EntityId;
///
/// struct Order;
/// type OrderId = EntityId<Order>;
///
/// let a = OrderId::new();
/// let b = OrderId::from_uuid(a.as_uuid());
/// assert_eq!(a, b);
/// assert_ne!(a, OrderId::new());
/// ```
pub struct EntityId<K: ?Sized> {
    uuid: Uuid,
    kind: PhantomData<fn() -> K>,
}

/// Identity of an aggregate root
pub type AggregateId<K> = EntityId<K>;

impl<K: ?Sized> EntityId<K> {
    /// Generate a new random identity
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            uuid,
            kind: PhantomData,
        }
    }

    pub fn as_uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn is_nil(&self) -> bool {
        self.uuid.is_nil()
    }
}

impl<K: ?Sized + 'static> Identity for EntityId<K> {
    fn as_uuid(&self) -> Uuid {
        self.uuid
    }

    fn try_from_uuid(uuid: Uuid) -> DomainResult<Self> {
        if uuid.is_nil() {
            return Err(ErrorCode::NotNull.with([
                Parameter::of("class", short_type_name::<K>()),
                Parameter::of("name", "id"),
            ]));
        }
        Ok(Self::from_uuid(uuid))
    }

    fn kind() -> &'static str {
        short_type_name::<K>()
    }
}

impl<K: ?Sized> Default for EntityId<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ?Sized> Clone for EntityId<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: ?Sized> Copy for EntityId<K> {}

impl<K: ?Sized> PartialEq for EntityId<K> {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl<K: ?Sized> Eq for EntityId<K> {}

impl<K: ?Sized> PartialOrd for EntityId<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: ?Sized> Ord for EntityId<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.uuid.cmp(&other.uuid)
    }
}

impl<K: ?Sized> Hash for EntityId<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}

impl<K: ?Sized> fmt::Debug for EntityId<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId<{}>({})", short_type_name::<K>(), self.uuid)
    }
}

impl<K: ?Sized> fmt::Display for EntityId<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uuid)
    }
}

impl<K: ?Sized> FromStr for EntityId<K> {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self::from_uuid)
    }
}

impl<K: ?Sized> From<EntityId<K>> for Uuid {
    fn from(id: EntityId<K>) -> Self {
        id.uuid
    }
}

impl<K: ?Sized> Serialize for EntityId<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.uuid.serialize(serializer)
    }
}

impl<'de, K: ?Sized> Deserialize<'de> for EntityId<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let uuid = Uuid::deserialize(deserializer)?;
        if uuid.is_nil() {
            return Err(D::Error::custom("entity id must not be nil"));
        }
        Ok(Self::from_uuid(uuid))
    }
}
