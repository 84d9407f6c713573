// Copyright (c) 2025 - Cowboy AI, Inc.
//! Domain Constraint Validation
//!
//! A small DSL for guarding domain operations:
//!
//! ```rust
//! use cim_domain_model::validation::{checks, constraint, ensure};
//! use cim_domain_model::ErrorCode;
//!
//! fn rename(name: &str, quantity: i32) -> cim_domain_model::DomainResult<()> {
//!     ensure(
//!         "Order",
//!         [
//!             constraint("name", name, checks::not_blank()),
//!             constraint("quantity", &quantity, checks::positive()),
//!         ],
//!     )
//! }
//!
//! let err = rename(" ", 0).unwrap_err();
//! assert_eq!(err.code(), ErrorCode::DomainConstraintsViolated);
//! assert_eq!(err.details().len(), 2);
//! ```
//!
//! All constraints are evaluated; every violation becomes a detail of the
//! raised error.

pub mod checks;
pub mod constraints;

pub use constraints::{constraint, Constraint};

use crate::errors::{DomainError, DomainResult, ErrorCode, Parameter};
use crate::short_type_name;

/// Accumulates constraint violations for one owner
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    owner: String,
    violations: Vec<DomainError>,
}

impl Validation {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            violations: Vec::new(),
        }
    }

    /// Validation owned by the type `T`
    pub fn for_type<T: ?Sized>() -> Self {
        Self::new(short_type_name::<T>())
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn check(mut self, constraint: Constraint<'_>) -> Self {
        if let Some(violation) = constraint.evaluate(&self.owner) {
            self.violations.push(violation);
        }
        self
    }

    pub fn validate<'a>(self, constraints: impl IntoIterator<Item = Constraint<'a>>) -> Self {
        constraints
            .into_iter()
            .fold(self, |validation, constraint| validation.check(constraint))
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[DomainError] {
        &self.violations
    }

    /// Fail with `DomainConstraintsViolated` if any constraint was violated
    pub fn raise(self) -> DomainResult<()> {
        self.raise_with(ErrorCode::DomainConstraintsViolated)
    }

    /// Fail with `code` if any constraint was violated
    pub fn raise_with(self, code: ErrorCode) -> DomainResult<()> {
        if self.violations.is_empty() {
            return Ok(());
        }
        Err(code
            .with([Parameter::of("caller", &self.owner)])
            .with_details(self.violations))
    }
}

/// Evaluate all `constraints` for `owner` and fail on any violation
pub fn ensure<'a>(
    owner: &str,
    constraints: impl IntoIterator<Item = Constraint<'a>>,
) -> DomainResult<()> {
    Validation::new(owner).validate(constraints).raise()
}

/// Like [`ensure`] for stateless domain services
pub fn ensure_service<'a>(constraints: impl IntoIterator<Item = Constraint<'a>>) -> DomainResult<()> {
    Validation::new("DomainService")
        .validate(constraints)
        .raise_with(ErrorCode::DomainServiceConstraintsViolated)
}
