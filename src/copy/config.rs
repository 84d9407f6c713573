// Copyright (c) 2025 - Cowboy AI, Inc.
//! Copy engine configuration

use serde::{Deserialize, Serialize};

use super::factory::{IdStrategy, UuidFactory};

/// Copy engine configuration
///
/// Deserializable so it can be embedded in application configuration:
///
/// ```rust
/// use cim_domain_model::{CopyConfig, IdStrategy};
///
/// let config: CopyConfig = serde_json::from_str(r#"{"id_strategy":"time_ordered"}"#).unwrap();
/// assert_eq!(config.id_strategy, IdStrategy::TimeOrdered);
///
/// let config: CopyConfig = serde_json::from_str("{}").unwrap();
/// assert_eq!(config, CopyConfig::default());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyConfig {
    /// UUID version of generated identities (defaults to random v4)
    #[serde(default)]
    pub id_strategy: IdStrategy,
}

impl CopyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the identity generation strategy
    pub fn with_id_strategy(mut self, id_strategy: IdStrategy) -> Self {
        self.id_strategy = id_strategy;
        self
    }

    /// Identity factory described by this configuration
    pub fn factory(&self) -> UuidFactory {
        UuidFactory::new(self.id_strategy)
    }
}
