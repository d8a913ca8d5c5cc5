//! Type contracts for record fields.
//!
//! A contract answers one question, "does this value satisfy me?", and can
//! describe itself for [`RecordType::info`](crate::RecordType::info) and error
//! messages. Built-in contracts cover exact types, numeric ranges, nullable
//! wrappers, alternatives, enumerated sets and patterns; anything else plugs
//! in through [`TypeContract`].

use crate::{RecordError, RecordType, Result, Value};
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// Core trait for field contracts.
///
/// # Example
///
/// ```rust
/// use vobj_core::{TypeContract, Value};
///
/// struct Even;
///
/// impl TypeContract for Even {
///     fn satisfies(&self, value: &Value) -> bool {
///         value.as_int().is_some_and(|i| i % 2 == 0)
///     }
///
///     fn describe(&self) -> String {
///         "Even".to_string()
///     }
/// }
///
/// assert!(Even.satisfies(&Value::Int(4)));
/// ```
pub trait TypeContract: Send + Sync {
    /// Returns true if `value` satisfies this contract.
    fn satisfies(&self, value: &Value) -> bool;

    /// Human-readable description of the contract.
    fn describe(&self) -> String;
}

/// A contract backed by a closure and a fixed description.
///
/// # Example
///
/// ```rust
/// use vobj_core::{Contract, TypeContract, Value};
///
/// let short = Contract::predicate("ShortString", |v: &Value| {
///     v.as_str().is_some_and(|s| s.len() <= 8)
/// });
/// assert!(short.satisfies(&Value::from("abc")));
/// assert_eq!(short.describe(), "ShortString");
/// ```
pub struct Predicate<F> {
    description: String,
    check: F,
}

impl<F> Predicate<F>
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    /// Creates a predicate contract.
    pub fn new(description: impl Into<String>, check: F) -> Self {
        Self {
            description: description.into(),
            check,
        }
    }
}

impl<F> TypeContract for Predicate<F>
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    fn satisfies(&self, value: &Value) -> bool {
        (self.check)(value)
    }

    fn describe(&self) -> String {
        self.description.clone()
    }
}

/// Built-in field contracts.
#[derive(Clone)]
pub enum Contract {
    /// Accepts every value
    Any,
    /// Accepts only null
    Null,
    /// Boolean
    Bool,
    /// Integer
    Int,
    /// Non-negative integer
    Nat,
    /// Positive number
    Pos,
    /// Negative number
    Neg,
    /// Floating point number
    Float,
    /// Integer or float
    Num,
    /// String
    Str,
    /// Symbol
    Symbol,
    /// Timestamp whose text parses as RFC 3339
    Timestamp,
    /// List whose elements all satisfy the inner contract
    ListOf(Box<Contract>),
    /// Map whose values all satisfy the inner contract
    MapOf(Box<Contract>),
    /// Number within `[min, max]` that also satisfies `of`
    InRange {
        /// Minimum value (inclusive)
        min: f64,
        /// Maximum value (inclusive)
        max: f64,
        /// Contract the value must also satisfy
        of: Box<Contract>,
    },
    /// Null or the inner contract
    Maybe(Box<Contract>),
    /// Any of the listed contracts
    Or(Vec<Contract>),
    /// All of the listed contracts
    And(Vec<Contract>),
    /// Equal to one of the listed values
    OneOf(Vec<Value>),
    /// String matching the regex
    Pattern(Regex),
    /// Record instance of exactly this record type
    Record(RecordType),
    /// User-supplied contract
    Custom(Arc<dyn TypeContract>),
}

impl Contract {
    /// Wraps a contract so that null is also accepted.
    pub fn maybe(inner: Contract) -> Self {
        Contract::Maybe(Box::new(inner))
    }

    /// List of values satisfying `inner`.
    pub fn list_of(inner: Contract) -> Self {
        Contract::ListOf(Box::new(inner))
    }

    /// Map whose values satisfy `inner`.
    pub fn map_of(inner: Contract) -> Self {
        Contract::MapOf(Box::new(inner))
    }

    /// Any number within `[min, max]`.
    pub fn in_range(min: f64, max: f64) -> Self {
        Self::in_range_of(min, max, Contract::Any)
    }

    /// Number within `[min, max]` that also satisfies `of`.
    pub fn in_range_of(min: f64, max: f64, of: Contract) -> Self {
        Contract::InRange {
            min,
            max,
            of: Box::new(of),
        }
    }

    /// Any of the given contracts.
    pub fn or(alternatives: impl IntoIterator<Item = Contract>) -> Self {
        Contract::Or(alternatives.into_iter().collect())
    }

    /// All of the given contracts.
    pub fn and(parts: impl IntoIterator<Item = Contract>) -> Self {
        Contract::And(parts.into_iter().collect())
    }

    /// One of the given values.
    pub fn one_of<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        Contract::OneOf(values.into_iter().map(Into::into).collect())
    }

    /// String matching `pattern`.
    ///
    /// Fails with a schema error if the pattern does not compile.
    pub fn pattern(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(Contract::Pattern)
            .map_err(|e| RecordError::schema(format!("invalid pattern '{pattern}': {e}")))
    }

    /// Record instance of the given record type.
    pub fn record(record_type: &RecordType) -> Self {
        Contract::Record(record_type.clone())
    }

    /// Wraps a user-supplied contract.
    pub fn custom(contract: impl TypeContract + 'static) -> Self {
        Contract::Custom(Arc::new(contract))
    }

    /// Contract from a closure and a description.
    pub fn predicate<F>(description: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::custom(Predicate::new(description, check))
    }

    /// Returns true if this contract is exactly boolean.
    ///
    /// Only such fields get a `<field>?` predicate alias.
    pub fn is_boolean(&self) -> bool {
        matches!(self, Contract::Bool)
    }

    /// Returns true if an absent value (null) is acceptable.
    pub fn is_nullable(&self) -> bool {
        self.satisfies(&Value::Null)
    }
}

impl TypeContract for Contract {
    fn satisfies(&self, value: &Value) -> bool {
        match self {
            Contract::Any => true,
            Contract::Null => value.is_null(),
            Contract::Bool => matches!(value, Value::Bool(_)),
            Contract::Int => matches!(value, Value::Int(_)),
            Contract::Nat => matches!(value, Value::Int(i) if *i >= 0),
            Contract::Pos => match value {
                Value::Int(i) => *i > 0,
                Value::Float(f) => *f > 0.0,
                _ => false,
            },
            Contract::Neg => match value {
                Value::Int(i) => *i < 0,
                Value::Float(f) => *f < 0.0,
                _ => false,
            },
            Contract::Float => matches!(value, Value::Float(_)),
            Contract::Num => matches!(value, Value::Int(_) | Value::Float(_)),
            Contract::Str => matches!(value, Value::String(_)),
            Contract::Symbol => matches!(value, Value::Symbol(_)),
            Contract::Timestamp => match value {
                Value::Timestamp(text) => chrono::DateTime::parse_from_rfc3339(text).is_ok(),
                _ => false,
            },
            Contract::ListOf(inner) => match value {
                Value::List(items) => items.iter().all(|item| inner.satisfies(item)),
                _ => false,
            },
            Contract::MapOf(inner) => match value {
                Value::Map(map) => map.values().all(|item| inner.satisfies(item)),
                _ => false,
            },
            Contract::InRange { min, max, of } => {
                let in_range = match value {
                    // i128 against the rounded bounds is exact for every i64
                    Value::Int(i) => {
                        let i = i128::from(*i);
                        i >= min.ceil() as i128 && i <= max.floor() as i128
                    }
                    Value::Float(f) => *f >= *min && *f <= *max,
                    _ => false,
                };
                in_range && of.satisfies(value)
            }
            Contract::Maybe(inner) => value.is_null() || inner.satisfies(value),
            Contract::Or(alternatives) => alternatives.iter().any(|c| c.satisfies(value)),
            Contract::And(parts) => parts.iter().all(|c| c.satisfies(value)),
            Contract::OneOf(allowed) => allowed.contains(value),
            Contract::Pattern(regex) => value.as_str().is_some_and(|s| regex.is_match(s)),
            Contract::Record(record_type) => value
                .as_record()
                .is_some_and(|r| r.record_type().is_same(record_type)),
            Contract::Custom(inner) => inner.satisfies(value),
        }
    }

    fn describe(&self) -> String {
        match self {
            Contract::Any => "Any".to_string(),
            Contract::Null => "null".to_string(),
            Contract::Bool => "Bool".to_string(),
            Contract::Int => "Int".to_string(),
            Contract::Nat => "Nat".to_string(),
            Contract::Pos => "Pos".to_string(),
            Contract::Neg => "Neg".to_string(),
            Contract::Float => "Float".to_string(),
            Contract::Num => "Num".to_string(),
            Contract::Str => "String".to_string(),
            Contract::Symbol => "Symbol".to_string(),
            Contract::Timestamp => "Timestamp".to_string(),
            Contract::ListOf(inner) => format!("ListOf[{}]", inner.describe()),
            Contract::MapOf(inner) => format!("MapOf[{}]", inner.describe()),
            Contract::InRange { min, max, of } => match of.as_ref() {
                Contract::Any => format!("InRange[{min}..{max}]"),
                other => format!("InRange[{min}..{max}, {}]", other.describe()),
            },
            Contract::Maybe(inner) => format!("{} or null", inner.describe()),
            Contract::Or(alternatives) => format!(
                "Or[{}]",
                alternatives
                    .iter()
                    .map(|c| c.describe())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Contract::And(parts) => format!(
                "And[{}]",
                parts
                    .iter()
                    .map(|c| c.describe())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Contract::OneOf(allowed) => format!(
                "OneOf[{}]",
                allowed
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Contract::Pattern(regex) => format!("Pattern[/{}/]", regex.as_str()),
            Contract::Record(record_type) => record_type.name().to_string(),
            Contract::Custom(inner) => inner.describe(),
        }
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl fmt::Debug for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Contract({})", self.describe())
    }
}
