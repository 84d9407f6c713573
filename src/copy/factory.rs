// Copyright (c) 2025 - Cowboy AI, Inc.
//! Identity Factory

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CopyError, CopyResult};
use crate::identity::Identity;

/// Source of fresh identity values
///
/// Any `Fn() -> Uuid` is a factory, which makes deterministic factories easy
/// to plug into tests.
pub trait IdentityFactory {
    fn generate(&self) -> Uuid;
}

impl<F> IdentityFactory for F
where
    F: Fn() -> Uuid,
{
    fn generate(&self) -> Uuid {
        self()
    }
}

/// UUID version used for generated identities
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// Random UUID v4
    #[default]
    Random,
    /// Time-ordered UUID v7
    TimeOrdered,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UuidFactory {
    strategy: IdStrategy,
}

impl UuidFactory {
    pub fn new(strategy: IdStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> IdStrategy {
        self.strategy
    }
}

impl IdentityFactory for UuidFactory {
    fn generate(&self) -> Uuid {
        match self.strategy {
            IdStrategy::Random => Uuid::new_v4(),
            IdStrategy::TimeOrdered => Uuid::now_v7(),
        }
    }
}

/// New identity of the same kind as `existing`
///
/// A factory that hands back the identity being replaced is treated as a
/// construction failure; there is no retry.
pub fn new_identity_like<I, F>(factory: &F, existing: &I) -> CopyResult<I>
where
    I: Identity,
    F: IdentityFactory + ?Sized,
{
    let uuid = factory.generate();
    if uuid == existing.as_uuid() {
        return Err(CopyError::IdentityConstruction {
            kind: I::kind(),
            reason: format!("factory returned the identity being replaced ({})", uuid),
        });
    }

    I::try_from_uuid(uuid).map_err(|error| CopyError::IdentityConstruction {
        kind: I::kind(),
        reason: error.to_string(),
    })
}
