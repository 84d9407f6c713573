// Copyright (c) 2025 - Cowboy AI, Inc.
//! Constraint Checks
//!
//! Each function returns a check usable with [`constraint`](super::constraint).
//! A check yields `None` when the value is acceptable, otherwise the
//! violation together with check specific parameters (`min`, `max`, `other`,
//! ...). Optional properties are modelled as `Option<T>`: use [`required`],
//! [`allow_none`] or [`allow_none_if`] to lift a check onto them.
//!
//! Date checks never read the clock. The reference date is passed in.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::Hash;

use crate::collections::{Entities, EntityIds, OrderedEntities, OrderedEntityIds};
use crate::entity::Entity;
use crate::errors::{DomainError, ErrorCode, Parameter};
use crate::identity::Identity;
use crate::value_objects::{ValueObject, ValueObjects};

/// Anything with a number of elements
pub trait HasLength {
    fn length(&self) -> usize;
}

impl HasLength for str {
    fn length(&self) -> usize {
        self.chars().count()
    }
}

impl HasLength for String {
    fn length(&self) -> usize {
        self.as_str().length()
    }
}

impl<T> HasLength for [T] {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T> HasLength for Vec<T> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T> HasLength for VecDeque<T> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T> HasLength for BTreeSet<T> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T, S> HasLength for HashSet<T, S> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<K, V> HasLength for BTreeMap<K, V> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<K, V, S> HasLength for HashMap<K, V, S> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<E: Entity> HasLength for Entities<E> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<E: Entity> HasLength for OrderedEntities<E> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<I: Identity> HasLength for EntityIds<I> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<I: Identity> HasLength for OrderedEntityIds<I> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<V: ValueObject> HasLength for ValueObjects<V> {
    fn length(&self) -> usize {
        self.len()
    }
}

// ============================================================================
// Presence
// ============================================================================

/// Optional property must be set
pub fn required<T>() -> impl Fn(&Option<T>) -> Option<DomainError> {
    |value| value.is_none().then(|| ErrorCode::NotNull.error())
}

/// Optional property must be set and satisfy `check`
pub fn required_and<T>(
    check: impl Fn(&T) -> Option<DomainError>,
) -> impl Fn(&Option<T>) -> Option<DomainError> {
    move |value| match value {
        Some(value) => check(value),
        None => Some(ErrorCode::NotNull.error()),
    }
}

/// Optional property must not be set
pub fn must_be_none<T>() -> impl Fn(&Option<T>) -> Option<DomainError> {
    |value| value.is_some().then(|| ErrorCode::IsNull.error())
}

/// Apply `check` only when the property is set
pub fn allow_none<T>(
    check: impl Fn(&T) -> Option<DomainError>,
) -> impl Fn(&Option<T>) -> Option<DomainError> {
    move |value| value.as_ref().and_then(&check)
}

/// Apply `check` when the property is set; an unset property is accepted only
/// while `condition` holds
pub fn allow_none_if<T>(
    condition: bool,
    check: impl Fn(&T) -> Option<DomainError>,
) -> impl Fn(&Option<T>) -> Option<DomainError> {
    move |value| match value {
        Some(value) => check(value),
        None if condition => None,
        None => Some(ErrorCode::NotNull.error()),
    }
}

/// Accept anything
pub fn nullable<T: ?Sized>() -> impl Fn(&T) -> Option<DomainError> {
    |_| None
}

pub fn is_literal<T>(literal: T) -> impl Fn(&T) -> Option<DomainError>
where
    T: PartialEq + Serialize,
{
    move |value| {
        (*value != literal)
            .then(|| ErrorCode::LiteralViolation.with([Parameter::of("literal", &literal)]))
    }
}

// ============================================================================
// Text and size
// ============================================================================

/// Text must contain at least one non-whitespace character
pub fn not_blank<S>() -> impl Fn(&S) -> Option<DomainError>
where
    S: AsRef<str> + ?Sized,
{
    |value| {
        value
            .as_ref()
            .trim()
            .is_empty()
            .then(|| ErrorCode::NotBlank.error())
    }
}

pub fn not_empty<C>() -> impl Fn(&C) -> Option<DomainError>
where
    C: HasLength + ?Sized,
{
    |value| (value.length() == 0).then(|| ErrorCode::IsEmpty.error())
}

/// Text length, in characters, must lie within `min..=max`
pub fn length_between<S>(min: usize, max: usize) -> impl Fn(&S) -> Option<DomainError>
where
    S: AsRef<str> + ?Sized,
{
    move |value| {
        let length = value.as_ref().chars().count();
        (length < min || length > max).then(|| {
            ErrorCode::StringOutOfBounds.with([
                Parameter::of("min", min),
                Parameter::of("max", max),
                Parameter::of("length", length),
            ])
        })
    }
}

pub fn max_length<S>(max: usize) -> impl Fn(&S) -> Option<DomainError>
where
    S: AsRef<str> + ?Sized,
{
    length_between(0, max)
}

pub fn min_length<S>(min: usize) -> impl Fn(&S) -> Option<DomainError>
where
    S: AsRef<str> + ?Sized,
{
    length_between(min, usize::MAX)
}

// ============================================================================
// Numbers
// ============================================================================

pub fn positive<T: PartialOrd + Default>() -> impl Fn(&T) -> Option<DomainError> {
    |value| (*value <= T::default()).then(|| ErrorCode::NotPositive.error())
}

pub fn zero_or_positive<T: PartialOrd + Default>() -> impl Fn(&T) -> Option<DomainError> {
    |value| (*value < T::default()).then(|| ErrorCode::NotZeroOrPositive.error())
}

pub fn negative<T: PartialOrd + Default>() -> impl Fn(&T) -> Option<DomainError> {
    |value| (*value >= T::default()).then(|| ErrorCode::NotNegative.error())
}

pub fn zero_or_negative<T: PartialOrd + Default>() -> impl Fn(&T) -> Option<DomainError> {
    |value| (*value > T::default()).then(|| ErrorCode::NotZeroOrNegative.error())
}

pub fn less_than_or_equal<T>(other: T) -> impl Fn(&T) -> Option<DomainError>
where
    T: PartialOrd + Serialize,
{
    move |value| {
        (*value > other)
            .then(|| ErrorCode::NotLessThanOrEqual.with([Parameter::of("other", &other)]))
    }
}

/// Value must lie within `min..=max`
pub fn between<T>(min: T, max: T) -> impl Fn(&T) -> Option<DomainError>
where
    T: PartialOrd + Serialize,
{
    move |value| {
        (*value < min || *value > max).then(|| {
            ErrorCode::NumberOutOfBounds
                .with([Parameter::of("min", &min), Parameter::of("max", &max)])
        })
    }
}

// ============================================================================
// Assignment and membership
// ============================================================================

/// Property may only be assigned while `current` is unset
pub fn assignable_once<T>(current: Option<T>) -> impl Fn(&T) -> Option<DomainError>
where
    T: PartialEq + Serialize,
{
    move |value| match &current {
        None => None,
        Some(current) if current == value => Some(ErrorCode::SameAlreadyAssigned.error()),
        Some(current) => Some(
            ErrorCode::AnotherAlreadyAssigned.with([Parameter::of("other", current)]),
        ),
    }
}

/// Value must be one of `allowed`
pub fn in_collection<T: PartialEq>(
    allowed: impl IntoIterator<Item = T>,
) -> impl Fn(&T) -> Option<DomainError> {
    let allowed: Vec<T> = allowed.into_iter().collect();
    move |value| (!allowed.contains(value)).then(|| ErrorCode::ValueNotInCollection.error())
}

/// No element of `existing`, projected through `key`, may equal the value
pub fn not_contains<X, Y>(
    existing: impl IntoIterator<Item = Y>,
    key: impl Fn(&Y) -> X,
) -> impl Fn(&X) -> Option<DomainError>
where
    X: PartialEq,
{
    let keys: Vec<X> = existing.into_iter().map(|element| key(&element)).collect();
    move |value| keys.contains(value).then(|| ErrorCode::CollectionContains.error())
}

/// Elements must be distinct after projection through `key`
pub fn unique_by<C, X, K>(key: impl Fn(&X) -> K) -> impl Fn(&C) -> Option<DomainError>
where
    C: AsRef<[X]> + ?Sized,
    K: Hash + Eq,
{
    move |value| {
        let elements = value.as_ref();
        let distinct: HashSet<K> = elements.iter().map(&key).collect();
        (distinct.len() != elements.len()).then(|| ErrorCode::NotUnique.error())
    }
}

// ============================================================================
// Dates
// ============================================================================

/// Date must not lie before `today`
pub fn future_date(today: NaiveDate) -> impl Fn(&NaiveDate) -> Option<DomainError> {
    move |value| (*value < today).then(|| ErrorCode::NotInFuture.error())
}

/// Date must not lie after `today`
pub fn past_date(today: NaiveDate) -> impl Fn(&NaiveDate) -> Option<DomainError> {
    move |value| (*value > today).then(|| ErrorCode::NotInPast.error())
}

pub fn today_or_future(today: NaiveDate) -> impl Fn(&NaiveDate) -> Option<DomainError> {
    move |value| (*value < today).then(|| ErrorCode::TodayOrInFuture.error())
}

/// Instant must fall on the day of `now` or later
pub fn today_or_future_instant(now: DateTime<Utc>) -> impl Fn(&DateTime<Utc>) -> Option<DomainError> {
    let today = now.date_naive();
    move |value| (value.date_naive() < today).then(|| ErrorCode::TodayOrInFuture.error())
}

/// Date must not lie after `other`; fails when `other` is unknown
pub fn date_before(other: Option<NaiveDate>) -> impl Fn(&NaiveDate) -> Option<DomainError> {
    move |value| match other {
        Some(other) if *value <= other => None,
        _ => Some(ErrorCode::NotBefore.with([Parameter::of("other", other)])),
    }
}

/// Date must not lie before `other`; fails when `other` is unknown
pub fn date_after(other: Option<NaiveDate>) -> impl Fn(&NaiveDate) -> Option<DomainError> {
    move |value| match other {
        Some(other) if *value >= other => None,
        _ => Some(ErrorCode::NotAfter.with([Parameter::of("other", other)])),
    }
}

pub fn date_after_or_equal(other: NaiveDate) -> impl Fn(&NaiveDate) -> Option<DomainError> {
    move |value| {
        (*value < other).then(|| ErrorCode::NotAfter.with([Parameter::of("other", other)]))
    }
}
