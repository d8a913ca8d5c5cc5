//! Error types for record types and record instances.
//!
//! Every failure is raised synchronously at the point of detection. Errors
//! fall into three kinds (see [`ErrorKind`]): malformed schema definitions,
//! contract violations, and structural mismatches between supplied data and
//! a record type.

use crate::Value;
use thiserror::Error;

/// Result type for record operations.
pub type Result<T> = std::result::Result<T, RecordError>;

/// Broad classification of a [`RecordError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The schema definition itself is malformed.
    Schema,
    /// A value fails its declared type contract.
    ContractViolation,
    /// Supplied data does not fit the record type's shape.
    Value,
}

/// Main error type for record operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    /// Schema definition is malformed
    #[error("Schema error: {0}")]
    Schema(String),

    /// A field value fails its contract
    #[error("Value for field '{field}' fails its contract (contract: {contract}, value: {value})")]
    ContractViolation {
        /// Field name
        field: String,
        /// Description of the contract
        contract: String,
        /// Rejected value
        value: Value,
    },

    /// A configured default value fails its contract
    #[error("Default value for field '{field}' violates contract {contract} (value: {value})")]
    InvalidDefault {
        /// Field name
        field: String,
        /// Description of the contract
        contract: String,
        /// Rejected default
        value: Value,
    },

    /// Data names fields the record type does not have
    #[error("Invalid field(s): {}", .0.join(", "))]
    UnknownFields(Vec<String>),

    /// A field without a default was not supplied
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// More positional values than fields
    #[error("Too many values provided: expected at most {expected}, got {given}")]
    TooManyValues {
        /// Number of fields
        expected: usize,
        /// Number of values supplied
        given: usize,
    },

    /// Lookup key is neither a field nor a predicate alias
    #[error("Invalid field '{0}'")]
    InvalidKey(String),

    /// Predicate access on a field whose contract is not boolean
    #[error("Field '{0}' is not boolean and has no predicate accessor")]
    NotAPredicate(String),

    /// Auxiliary method is not attached to the record type
    #[error("Record type '{record_type}' has no method '{method}'")]
    UnknownMethod {
        /// Record type name
        record_type: String,
        /// Requested method
        method: String,
    },
}

impl RecordError {
    /// Creates a new schema error.
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema(message.into())
    }

    /// Creates a new contract violation error.
    pub fn violation(field: impl Into<String>, contract: impl Into<String>, value: Value) -> Self {
        Self::ContractViolation {
            field: field.into(),
            contract: contract.into(),
            value,
        }
    }

    /// Creates a new missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    /// Creates a new invalid key error.
    pub fn invalid_key(key: impl Into<String>) -> Self {
        Self::InvalidKey(key.into())
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Schema(_) => ErrorKind::Schema,
            Self::ContractViolation { .. } | Self::InvalidDefault { .. } => {
                ErrorKind::ContractViolation
            }
            Self::UnknownFields(_)
            | Self::MissingField(_)
            | Self::TooManyValues { .. }
            | Self::InvalidKey(_)
            | Self::NotAPredicate(_)
            | Self::UnknownMethod { .. } => ErrorKind::Value,
        }
    }

    /// Returns the field this error is about, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::ContractViolation { field, .. }
            | Self::InvalidDefault { field, .. }
            | Self::MissingField(field)
            | Self::InvalidKey(field)
            | Self::NotAPredicate(field) => Some(field),
            Self::UnknownFields(fields) => fields.first().map(String::as_str),
            _ => None,
        }
    }
}
