// Copyright (c) 2025 - Cowboy AI, Inc.
//! Named property constraints

use serde::Serialize;
use std::fmt;

use crate::errors::{DomainError, ErrorCode, Parameter};

/// Deferred check of one named property
///
/// Evaluated against the owner's type name; a violation carries the
/// parameters `class`, `name` and `value` in addition to whatever the check
/// itself attached.
pub struct Constraint<'a> {
    evaluate: Box<dyn FnOnce(&str) -> Option<DomainError> + 'a>,
}

impl<'a> Constraint<'a> {
    pub fn new(evaluate: impl FnOnce(&str) -> Option<DomainError> + 'a) -> Self {
        Self {
            evaluate: Box::new(evaluate),
        }
    }

    /// Evaluate for `owner`, returning the violation if any
    pub fn evaluate(self, owner: &str) -> Option<DomainError> {
        (self.evaluate)(owner)
    }

    /// Report a violation under `code` instead of the check's own code
    ///
    /// The check's parameters are kept.
    pub fn with_code(self, code: ErrorCode) -> Self {
        Constraint::new(move |owner| {
            self.evaluate(owner)
                .map(|violation| code.with(violation.parameters().iter().cloned()))
        })
    }
}

impl fmt::Debug for Constraint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Constraint")
    }
}

/// Constraint on property `name` holding `value`
///
/// ```rust
/// use cim_domain_model::validation::{checks, constraint, Validation};
///
/// let note = String::from("  ");
/// let result = Validation::new("Order")
///     .check(constraint("note", &note, checks::not_blank()))
///     .raise();
///
/// let err = result.unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "Domain constraints violated in Order:\n\t- Property Order#note must not be blank"
/// );
/// ```
pub fn constraint<'a, T>(
    name: &'a str,
    value: &'a T,
    check: impl FnOnce(&T) -> Option<DomainError> + 'a,
) -> Constraint<'a>
where
    T: Serialize + ?Sized,
{
    Constraint::new(move |owner| {
        check(value).map(|violation| {
            violation.with_parameters([
                Parameter::of("class", owner),
                Parameter::of("name", name),
                Parameter::of("value", value),
            ])
        })
    })
}
