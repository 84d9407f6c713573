// Copyright (c) 2025 - Cowboy AI, Inc.
//! Value Objects
//!
//! A value object has no identity; it is equal to another value object iff
//! all of its attributes are equal. [`ValueObjects`] is an insertion-ordered
//! set of value objects owned by an entity. The copy engine clones value
//! objects verbatim.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::errors::{DomainResult, ErrorCode, Parameter};

/// Marker for immutable objects compared by value
pub trait ValueObject: Clone + PartialEq + fmt::Debug {}

/// Insertion-ordered set of value objects
#[derive(Debug, Clone, PartialEq)]
pub struct ValueObjects<V: ValueObject> {
    values: Vec<V>,
}

impl<V: ValueObject> Default for ValueObjects<V> {
    fn default() -> Self {
        Self { values: Vec::new() }
    }
}

impl<V: ValueObject> ValueObjects<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: V) -> DomainResult<()> {
        if self.contains(&value) {
            return Err(ErrorCode::CanNotAddExistingEntity
                .with([Parameter::of("entity", format!("{:?}", value))]));
        }
        self.values.push(value);
        Ok(())
    }

    pub fn add_all(&mut self, values: impl IntoIterator<Item = V>) -> DomainResult<()> {
        values.into_iter().try_for_each(|value| self.add(value))
    }

    pub fn remove(&mut self, value: &V) -> DomainResult<V> {
        match self.values.iter().position(|candidate| candidate == value) {
            Some(position) => Ok(self.values.remove(position)),
            None => Err(ErrorCode::CanNotRemoveUnknownEntity
                .with([Parameter::of("entity", format!("{:?}", value))])),
        }
    }

    pub fn contains(&self, value: &V) -> bool {
        self.values.contains(value)
    }

    pub fn contains_by(&self, predicate: impl Fn(&V) -> bool) -> bool {
        self.values.iter().any(predicate)
    }

    pub fn find(&self, value: &V) -> Option<&V> {
        self.find_by(|candidate| candidate == value)
    }

    pub fn find_by(&self, predicate: impl Fn(&V) -> bool) -> Option<&V> {
        self.values.iter().find(|value| predicate(value))
    }

    pub fn first(&self) -> Option<&V> {
        self.values.first()
    }

    pub fn last(&self) -> Option<&V> {
        self.values.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Whether both sets hold equal values, regardless of order
    pub fn same_members(&self, other: &Self) -> bool {
        self.len() == other.len() && other.iter().all(|value| self.contains(value))
    }
}

impl<'a, V: ValueObject> IntoIterator for &'a ValueObjects<V> {
    type Item = &'a V;
    type IntoIter = std::slice::Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl<V: ValueObject + Serialize> Serialize for ValueObjects<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.values.iter())
    }
}

impl<'de, V: ValueObject + Deserialize<'de>> Deserialize<'de> for ValueObjects<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut values = Self::new();
        values
            .add_all(Vec::<V>::deserialize(deserializer)?)
            .map_err(D::Error::custom)?;
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Money {
        amount: i64,
        currency: String,
    }

    impl ValueObject for Money {}

    fn eur(amount: i64) -> Money {
        Money {
            amount,
            currency: "EUR".to_string(),
        }
    }

    #[test]
    fn test_add_rejects_equal_value() {
        let mut values = ValueObjects::new();
        values.add(eur(5)).unwrap();

        let err = values.add(eur(5)).unwrap_err();
        assert_eq!(err.code(), ErrorCode::CanNotAddExistingEntity);
        assert!(err.to_string().starts_with("Cannot add already existing entity Money"));
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn test_remove_unknown_fails() {
        let mut values = ValueObjects::new();
        values.add(eur(1)).unwrap();

        let err = values.remove(&eur(2)).unwrap_err();
        assert_eq!(err.code(), ErrorCode::CanNotRemoveUnknownEntity);

        assert_eq!(values.remove(&eur(1)).unwrap(), eur(1));
        assert!(values.is_empty());
    }

    #[test]
    fn test_lookup_and_order() {
        let mut values = ValueObjects::new();
        values.add_all([eur(3), eur(1), eur(2)]).unwrap();

        assert_eq!(values.first(), Some(&eur(3)));
        assert_eq!(values.last(), Some(&eur(2)));
        assert_eq!(values.find(&eur(1)), Some(&eur(1)));
        assert_eq!(values.find_by(|m| m.amount > 2), Some(&eur(3)));
        assert!(values.contains_by(|m| m.currency == "EUR"));
        assert!(!values.contains(&eur(4)));
    }

    #[test]
    fn test_same_members_ignores_order() {
        let mut left = ValueObjects::new();
        left.add_all([eur(1), eur(2)]).unwrap();
        let mut right = ValueObjects::new();
        right.add_all([eur(2), eur(1)]).unwrap();

        assert!(left.same_members(&right));
        assert_ne!(left, right);

        right.clear();
        assert!(!left.same_members(&right));
    }
}
