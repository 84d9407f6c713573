// Copyright (c) 2025 - Cowboy AI, Inc.
//! Domain Error Taxonomy
//!
//! Every failure raised by domain code is a [`DomainError`]: an [`ErrorCode`]
//! naming what went wrong, the [`Parameter`]s that fill the code's message
//! template, and optional detail errors (one per violated constraint).
//!
//! Message templates use named placeholders (`{class}`, `{name}`, `{value}`,
//! ...) that are resolved against the error's parameters when rendered.
//!
//! ```rust
//! use cim_domain_model::{ErrorCode, Parameter};
//!
//! let error = ErrorCode::EntityNotFound.with([
//!     Parameter::of("class", "Order"),
//!     Parameter::of("id", "42"),
//! ]);
//! assert_eq!(error.to_string(), "Entity Order not found by id=42");
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Catalogue of domain error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    DomainConstraintsViolated,
    DomainServiceConstraintsViolated,

    // Constraint violations
    NotNull,
    IsNull,
    NotPositive,
    NotZeroOrPositive,
    NotNegative,
    NotZeroOrNegative,
    NotLessThanOrEqual,
    NotBlank,
    IsEmpty,
    StringOutOfBounds,
    NumberOutOfBounds,
    PercentageOutOfBounds,
    IsUnique,
    LiteralViolation,
    NotInPast,
    NotInFuture,
    TodayOrInFuture,
    OrderNeedsToSpecifyAllIds,
    NotUnique,
    CollectionContains,
    InvalidFormat,
    CanNotAssumeAttribute,
    SameAlreadyAssigned,
    AnotherAlreadyAssigned,
    NotBefore,
    NotAfter,
    ValueNotInCollection,
    CanNotAddExistingEntity,
    CanNotRemoveUnknownEntity,

    // Aggregates and entities
    EntityNotFound,
    EntityNotFoundBy,
    EntityIdNotFound,
    RelatedEntityNotFound,
    RelatedEntityNotPresent,
    AggregateNotFound,
    AggregateNotFoundBy,
    EntityAlreadyExists,
    AggregateAlreadyExists,
    EntityIdAlreadyExists,
    ModifiedEntityNotFound,
    AmbiguousEntitiesFound,

    // Structure and construction
    RelationNotSet,
    InvalidArgument,
    InstanceNotCreated,
    CannotAccessField,
}

impl ErrorCode {
    /// Message template of this code
    pub fn template(&self) -> &'static str {
        use ErrorCode::*;

        match self {
            DomainConstraintsViolated => "Domain constraints violated in {caller}",
            DomainServiceConstraintsViolated => "Domain service constraints violated",
            NotNull => "Property {class}#{name} must be set",
            IsNull => "Property {class}#{name} must not be set",
            NotPositive => "Property {class}#{name} must be positive but is {value} instead",
            NotZeroOrPositive => {
                "Property {class}#{name} must be zero or positive but is {value} instead"
            }
            NotNegative => "Property {class}#{name} must be negative but is {value} instead",
            NotZeroOrNegative => {
                "Property {class}#{name} must be zero or negative but is {value} instead"
            }
            NotLessThanOrEqual => {
                "Property {class}#{name} with value {value} must be less than or equal to {other}"
            }
            NotBlank => "Property {class}#{name} must not be blank",
            IsEmpty => "Property {class}#{name} must not be empty",
            StringOutOfBounds => {
                "Property {class}#{name} must be within {min} and {max} characters but has {length} characters"
            }
            NumberOutOfBounds => {
                "Property {class}#{name} must be within {min} and {max} but is {value} instead"
            }
            PercentageOutOfBounds => {
                "Property {class}#{name} must be within {min} and {max} percent but is {value} instead"
            }
            IsUnique => "Property {class}#{name} must be unique",
            LiteralViolation => "Property {class}#{name} must be same as {literal}",
            NotInPast => "Property {class}#{name} must not be in the future",
            NotInFuture => "Property {class}#{name} must not be in the past",
            TodayOrInFuture => "Property {class}#{name} must be either today or a date in the future",
            OrderNeedsToSpecifyAllIds => "Argument {name} must specify all available ids",
            NotUnique => "List {class}#{name} does not contain unique values only",
            CollectionContains => "Collection already contains an element with {name}={value}",
            InvalidFormat => "Value {value} is in invalid format",
            CanNotAssumeAttribute => {
                "Can not assume attribute that was set as an outcome of a transformation"
            }
            SameAlreadyAssigned => "{name} with id={value} is already assigned to {class}",
            AnotherAlreadyAssigned => {
                "Another {name} with id={other} is already assigned to {class}. Cannot assign {name} with id={value}"
            }
            NotBefore => "Property {class}#{name} with value {value} must be before {other}",
            NotAfter => "Property {class}#{name} with value {value} must be after {other}",
            ValueNotInCollection => "Value={value} is not an element in the collection",
            CanNotAddExistingEntity => "Cannot add already existing entity {entity}",
            CanNotRemoveUnknownEntity => "Cannot remove unknown entity {entity}",
            EntityNotFound => "Entity {class} not found by id={id}",
            EntityNotFoundBy => "Entity {class} not found by {name}={id}",
            EntityIdNotFound => "Entity ID {name}={id} not found",
            RelatedEntityNotFound => "Related entity {class} not found by id={id}",
            RelatedEntityNotPresent => "Related entity class {class} is not available",
            AggregateNotFound => "Aggregate {class} not found by id={id}",
            AggregateNotFoundBy => "Aggregate {class} not found by {name}={id}",
            EntityAlreadyExists => "Entity {name} with id={id} already exists",
            AggregateAlreadyExists => "Aggregate {name} with id={id} already exists",
            EntityIdAlreadyExists => "Entity ID {name}={id} already exists",
            ModifiedEntityNotFound => "Modified entity {class} not found by id={id}",
            AmbiguousEntitiesFound => "Multiple entities found for a relation with cardinality 1",
            RelationNotSet => "Relation from {from} to {to} could not be set",
            InvalidArgument => "Argument {name} is invalid: {reason}",
            InstanceNotCreated => "Instance of class {class} cannot be created",
            CannotAccessField => "Field {field} cannot be accessed",
        }
    }

    /// Error with this code and no parameters
    pub fn error(self) -> DomainError {
        DomainError::new(self)
    }

    /// Error with this code and the given parameters
    pub fn with(self, parameters: impl IntoIterator<Item = Parameter>) -> DomainError {
        DomainError::new(self).with_parameters(parameters)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Named value filling a placeholder of an error message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    key: String,
    value: Value,
}

impl Parameter {
    /// Create a parameter from any serializable value
    ///
    /// Values that fail to serialize are recorded as `null`.
    pub fn of(key: impl Into<String>, value: impl Serialize) -> Self {
        Self {
            key: key.into(),
            value: serde_json::to_value(value).unwrap_or(Value::Null),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Value::Null => write!(f, "[null]"),
            Value::String(s) => write!(f, "{}", s),
            other => write!(f, "{}", other),
        }
    }
}

/// Domain error with code, message parameters and detail errors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{}", render_full(.code, .parameters, .details))]
pub struct DomainError {
    code: ErrorCode,
    #[serde(default)]
    parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    details: Vec<DomainError>,
}

impl DomainError {
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            parameters: Vec::new(),
            details: Vec::new(),
        }
    }

    /// Re-raise the details of `cause` under a new code
    pub fn wrap(code: ErrorCode, cause: DomainError) -> Self {
        let mut error = Self::new(code);
        if cause.details.is_empty() {
            error.details.push(cause);
        } else {
            error.details = cause.details;
        }
        error
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Value of the first parameter named `key`
    pub fn parameter(&self, key: &str) -> Option<&Value> {
        self.parameters
            .iter()
            .find(|p| p.key == key)
            .map(Parameter::value)
    }

    pub fn details(&self) -> &[DomainError] {
        &self.details
    }

    /// Whether this error or one of its details carries `code`
    pub fn has_code(&self, code: ErrorCode) -> bool {
        self.code == code || self.details.iter().any(|d| d.has_code(code))
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_parameters(mut self, parameters: impl IntoIterator<Item = Parameter>) -> Self {
        self.parameters.extend(parameters);
        self
    }

    pub fn with_details(mut self, details: impl IntoIterator<Item = DomainError>) -> Self {
        self.details.extend(details);
        self
    }

    /// Rendered message of this error alone, without details
    pub fn message(&self) -> String {
        render(self.code.template(), &self.parameters)
    }
}

impl From<ErrorCode> for DomainError {
    fn from(code: ErrorCode) -> Self {
        DomainError::new(code)
    }
}

/// Message of an error followed by one line per detail
fn render_full(code: &ErrorCode, parameters: &[Parameter], details: &[DomainError]) -> String {
    let mut out = render(code.template(), parameters);
    if !details.is_empty() {
        out.push(':');
        for detail in details {
            out.push_str("\n\t- ");
            out.push_str(&detail.message());
        }
    }
    out
}

/// Resolve `{key}` placeholders against parameters; unknown keys are kept verbatim
fn render(template: &str, parameters: &[Parameter]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };

        let key = &after[..end];
        match parameters.iter().find(|p| p.key == key) {
            Some(parameter) => out.push_str(&parameter.to_string()),
            None => {
                out.push('{');
                out.push_str(key);
                out.push('}');
            }
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}
