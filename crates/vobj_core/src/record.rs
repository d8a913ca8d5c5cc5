//! Record types and record instances.
//!
//! A [`RecordType`] is the frozen result of a [`SchemaBuilder`](crate::SchemaBuilder):
//! the ordered field table plus any auxiliary methods. It constructs
//! [`Record`]s, validating the supplied data against every field contract.
//! Construction is all-or-nothing and stops at the first failing field.
//!
//! Record types have nominal identity: two types built from identical
//! schemas are still different types, and their instances never compare
//! equal.

use crate::{FieldSpec, Methods, RecordError, Result, TypeContract, Value};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Index;
use std::sync::{Arc, OnceLock};
use tracing::trace;

/// Layout of [`RecordType::info`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InfoMode {
    /// Everything on one line
    Short,
    /// One field per line, aligned under the opening bracket
    #[default]
    Long,
}

struct TypeInner {
    name: String,
    fields: Vec<FieldSpec>,
    names: Vec<String>,
    positions: HashMap<String, usize>,
    methods: Methods,
}

/// A synthesized, validated, immutable value type.
///
/// Cheap to clone; clones share identity.
#[derive(Clone)]
pub struct RecordType {
    inner: Arc<TypeInner>,
}

impl RecordType {
    pub(crate) fn from_parts(name: String, fields: Vec<FieldSpec>, methods: Methods) -> Self {
        let names: Vec<String> = fields.iter().map(|f| f.name().to_string()).collect();
        let positions = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), i))
            .collect();
        Self {
            inner: Arc::new(TypeInner {
                name,
                fields,
                names,
                positions,
                methods,
            }),
        }
    }

    /// Type name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Field names in declared order.
    pub fn field_names(&self) -> &[String] {
        &self.inner.names
    }

    /// Full field table in declared order.
    pub fn field_specs(&self) -> &[FieldSpec] {
        &self.inner.fields
    }

    /// Looks up a field definition.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.position(name).map(|i| &self.inner.fields[i])
    }

    /// Number of fields.
    pub fn arity(&self) -> usize {
        self.inner.fields.len()
    }

    /// Auxiliary methods attached at creation.
    pub fn methods(&self) -> &Methods {
        &self.inner.methods
    }

    /// Returns true if `other` is this very type (not merely the same shape).
    pub fn is_same(&self, other: &RecordType) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.inner.positions.get(name).copied()
    }

    /// Constructs an instance from a field → value mapping.
    ///
    /// Fields absent from `data` take their default; fields without a default
    /// but with a nullable contract become null.
    ///
    /// # Errors
    ///
    /// - [`RecordError::UnknownFields`] for keys outside the schema
    /// - [`RecordError::MissingField`] for the first absent required field
    /// - [`RecordError::ContractViolation`] for the first invalid value
    pub fn named<K: Into<String>>(
        &self,
        data: impl IntoIterator<Item = (K, Value)>,
    ) -> Result<Record> {
        let data: BTreeMap<String, Value> = data.into_iter().map(|(k, v)| (k.into(), v)).collect();
        match self.validate(data) {
            Ok(values) => Ok(Record::new(self.clone(), values)),
            Err(err) => {
                trace!(record_type = %self.name(), error = %err, "record construction rejected");
                Err(err)
            }
        }
    }

    /// Constructs an instance from values in declared field order.
    ///
    /// A short list leaves the trailing fields to their defaults.
    ///
    /// # Errors
    ///
    /// [`RecordError::TooManyValues`] if there are more values than fields,
    /// otherwise as for [`named`](Self::named).
    pub fn positional(&self, values: Vec<Value>) -> Result<Record> {
        if values.len() > self.arity() {
            return Err(RecordError::TooManyValues {
                expected: self.arity(),
                given: values.len(),
            });
        }
        let data: Vec<(String, Value)> = self.inner.names.iter().cloned().zip(values).collect();
        self.named(data)
    }

    /// Constructs an instance from a generic argument list.
    ///
    /// A list holding exactly one `Value::Map` is read as a field → value
    /// mapping; any other list is positional. For a single-field type whose
    /// field holds a map, call [`positional`](Self::positional) directly.
    pub fn construct(&self, args: Vec<Value>) -> Result<Record> {
        match <[Value; 1]>::try_from(args) {
            Ok([Value::Map(map)]) => self.named(map),
            Ok([single]) => self.positional(vec![single]),
            Err(args) => self.positional(args),
        }
    }

    fn validate(&self, mut data: BTreeMap<String, Value>) -> Result<Vec<Value>> {
        let unknown: Vec<String> = data
            .keys()
            .filter(|key| self.position(key).is_none())
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(RecordError::UnknownFields(unknown));
        }

        let mut values = Vec::with_capacity(self.arity());
        for spec in &self.inner.fields {
            let value = match (data.remove(spec.name()), spec.default()) {
                (Some(value), _) => value,
                (None, Some(default)) => default.clone(),
                (None, None) if spec.contract().is_nullable() => Value::Null,
                (None, None) => return Err(RecordError::missing_field(spec.name())),
            };
            if !spec.contract().satisfies(&value) {
                return Err(RecordError::violation(
                    spec.name(),
                    spec.contract().describe(),
                    value,
                ));
            }
            values.push(value);
        }
        Ok(values)
    }

    /// Describes the type and its fields.
    ///
    /// ```text
    /// Employee[name: String, age: Nat, salary: Nat (10000)]
    ///
    /// Employee[name: String,
    ///          age: Nat,
    ///          salary: Nat (def. 10000)]
    /// ```
    pub fn info(&self, mode: InfoMode) -> String {
        let entries = self.inner.fields.iter().map(|spec| {
            let default = match (spec.default(), mode) {
                (None, _) => String::new(),
                (Some(value), InfoMode::Short) => format!(" ({})", value.to_plain_string()),
                (Some(value), InfoMode::Long) => format!(" (def. {})", value.to_plain_string()),
            };
            format!("{}: {}{}", spec.name(), spec.contract().describe(), default)
        });

        let separator = match mode {
            InfoMode::Short => ", ".to_string(),
            InfoMode::Long => format!(",\n{}", " ".repeat(self.name().len() + 1)),
        };

        format!(
            "{}[{}]",
            self.name(),
            entries.collect::<Vec<_>>().join(&separator)
        )
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordType")
            .field("name", &self.inner.name)
            .field("fields", &self.inner.fields)
            .field("methods", &self.inner.methods)
            .finish()
    }
}

struct RecordInner {
    record_type: RecordType,
    data: Vec<Value>,
    lookup: OnceLock<HashMap<String, usize>>,
}

/// An immutable, validated instance of a [`RecordType`].
///
/// Cheap to clone. No method mutates a record; derived records are
/// constructed and validated from scratch.
#[derive(Clone)]
pub struct Record {
    inner: Arc<RecordInner>,
}

impl Record {
    fn new(record_type: RecordType, data: Vec<Value>) -> Self {
        Self {
            inner: Arc::new(RecordInner {
                record_type,
                data,
                lookup: OnceLock::new(),
            }),
        }
    }

    /// The record's type.
    pub fn record_type(&self) -> &RecordType {
        &self.inner.record_type
    }

    /// Field accessor. Returns `None` for names that are not fields.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.inner
            .record_type
            .position(field)
            .map(|i| &self.inner.data[i])
    }

    /// Predicate accessor for a boolean field (`married?`).
    ///
    /// # Errors
    ///
    /// [`RecordError::InvalidKey`] for an unknown field,
    /// [`RecordError::NotAPredicate`] when the field's contract is not `Bool`.
    pub fn predicate(&self, field: &str) -> Result<bool> {
        let spec = self
            .inner
            .record_type
            .field(field)
            .ok_or_else(|| RecordError::invalid_key(field))?;
        if !spec.contract().is_boolean() {
            return Err(RecordError::NotAPredicate(field.to_string()));
        }
        self.get(field)
            .and_then(Value::as_bool)
            .ok_or_else(|| RecordError::NotAPredicate(field.to_string()))
    }

    /// Looks up a field by name or by its `<field>?` alias.
    ///
    /// # Errors
    ///
    /// [`RecordError::InvalidKey`] if `key` is neither.
    pub fn lookup(&self, key: &str) -> Result<&Value> {
        let table = self.inner.lookup.get_or_init(|| {
            let mut table = HashMap::new();
            for (i, spec) in self.inner.record_type.field_specs().iter().enumerate() {
                table.insert(spec.name().to_string(), i);
                if spec.contract().is_boolean() {
                    table.entry(format!("{}?", spec.name())).or_insert(i);
                }
            }
            table
        });
        table
            .get(key)
            .map(|&i| &self.inner.data[i])
            .ok_or_else(|| RecordError::invalid_key(key))
    }

    /// Field names in declared order (no predicate aliases).
    pub fn attributes(&self) -> &[String] {
        self.inner.record_type.field_names()
    }

    /// Values for the given keys, in key order.
    ///
    /// With no keys, returns every value in declared field order. Keys resolve
    /// like [`lookup`](Self::lookup).
    pub fn values(&self, keys: &[&str]) -> Result<Vec<&Value>> {
        if keys.is_empty() {
            return Ok(self.inner.data.iter().collect());
        }
        keys.iter().map(|key| self.lookup(key)).collect()
    }

    /// Iterates over `(field, value)` pairs in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attributes()
            .iter()
            .map(String::as_str)
            .zip(self.inner.data.iter())
    }

    /// The field → value mapping.
    pub fn to_map(&self) -> BTreeMap<String, Value> {
        self.iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    /// New record of the same type with some fields replaced.
    ///
    /// # Errors
    ///
    /// Fails if `changes` names an unknown field or a merged value breaks its
    /// contract.
    pub fn with<K: Into<String>>(
        &self,
        changes: impl IntoIterator<Item = (K, Value)>,
    ) -> Result<Record> {
        let mut data = self.to_map();
        data.extend(changes.into_iter().map(|(k, v)| (k.into(), v)));
        self.inner.record_type.named(data)
    }

    /// Moves this record to a wider type, adding `extra` fields.
    ///
    /// `extra` wins over existing fields on conflict.
    pub fn upgrade<K: Into<String>>(
        &self,
        target: &RecordType,
        extra: impl IntoIterator<Item = (K, Value)>,
    ) -> Result<Record> {
        let mut data = self.to_map();
        data.extend(extra.into_iter().map(|(k, v)| (k.into(), v)));
        target.named(data)
    }

    /// Projects this record onto a narrower type.
    ///
    /// Only fields `target` declares are kept; `target` must accept the
    /// projection (its other fields need defaults or nullable contracts).
    pub fn downgrade(&self, target: &RecordType) -> Result<Record> {
        let data: Vec<(&str, Value)> = self
            .iter()
            .filter(|(k, _)| target.position(k).is_some())
            .map(|(k, v)| (k, v.clone()))
            .collect();
        target.named(data)
    }

    /// Invokes an auxiliary method attached to the record type.
    pub fn call(&self, method: &str) -> Result<Value> {
        let record_type = &self.inner.record_type;
        let f = record_type
            .methods()
            .get(method)
            .ok_or_else(|| RecordError::UnknownMethod {
                record_type: record_type.name().to_string(),
                method: method.to_string(),
            })?;
        f(self)
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.inner.record_type.is_same(&other.inner.record_type)
            && self.inner.data == other.inner.data
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for (field, value) in self.iter() {
            field.hash(state);
            value.hash(state);
        }
    }
}

impl Index<&str> for Record {
    type Output = Value;

    /// # Panics
    ///
    /// Panics if `key` is neither a field nor a predicate alias.
    fn index(&self, key: &str) -> &Value {
        match self.lookup(key) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.inner.record_type.name())?;
        for (i, (field, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{field}: {value}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Contract, ErrorKind, SchemaBuilder};
    use pretty_assertions::assert_eq;

    fn person() -> RecordType {
        SchemaBuilder::new(
            "Person",
            [
                ("name", Contract::Str),
                ("age", Contract::Nat),
                ("married", Contract::Bool),
            ],
        )
        .unwrap()
        .default([("married", Value::Bool(false))])
        .unwrap()
        .create()
    }

    #[test]
    fn test_named_construction_fills_defaults() {
        let p = person()
            .named([("name", "John".into()), ("age", 19.into())])
            .unwrap();

        assert_eq!(p.get("name"), Some(&Value::from("John")));
        assert_eq!(p.get("age"), Some(&Value::Int(19)));
        assert_eq!(p.get("married"), Some(&Value::Bool(false)));
        assert!(!p.predicate("married").unwrap());
        assert_eq!(p.get("married?"), None);
    }

    #[test]
    fn test_contract_violation_names_field() {
        let err = person()
            .named([("name", "Owen".into()), ("age", (-2).into())])
            .unwrap_err();

        assert_eq!(err, RecordError::violation("age", "Nat", Value::Int(-2)));
    }

    #[test]
    fn test_positional_construction() {
        let ty = person();
        let p = ty.positional(vec!["Ann".into(), 21.into()]).unwrap();
        assert_eq!(
            p.values(&[]).unwrap(),
            vec![&Value::from("Ann"), &Value::Int(21), &Value::Bool(false)]
        );

        let err = ty
            .positional(vec!["Ann".into(), 21.into(), true.into(), 1.into()])
            .unwrap_err();
        assert_eq!(
            err,
            RecordError::TooManyValues {
                expected: 3,
                given: 4
            }
        );

        let err = ty.positional(vec!["Ann".into()]).unwrap_err();
        assert_eq!(err, RecordError::missing_field("age"));
    }

    #[test]
    fn test_construct_disambiguates_single_map() {
        let single = SchemaBuilder::new("Wrapper", [("inner", Contract::Any)])
            .unwrap()
            .create();

        let by_map = single
            .construct(vec![Value::map([("inner", Value::Int(5))])])
            .unwrap();
        assert_eq!(by_map.get("inner"), Some(&Value::Int(5)));

        let positional = single
            .positional(vec![Value::map([("inner", Value::Int(5))])])
            .unwrap();
        assert_eq!(
            positional.get("inner"),
            Some(&Value::map([("inner", Value::Int(5))]))
        );

        let by_position = single.construct(vec![Value::Int(7)]).unwrap();
        assert_eq!(by_position.get("inner"), Some(&Value::Int(7)));
    }

    #[test]
    fn test_lookup_table_and_aliases() {
        let p = person()
            .named([
                ("name", "John".into()),
                ("age", 19.into()),
                ("married", true.into()),
            ])
            .unwrap();

        assert_eq!(p.lookup("married?").unwrap(), &Value::Bool(true));
        assert_eq!(p["name"], Value::from("John"));
        assert_eq!(p.lookup("age?").unwrap_err(), RecordError::invalid_key("age?"));
        assert_eq!(
            p.predicate("age").unwrap_err(),
            RecordError::NotAPredicate("age".into())
        );
    }

    #[test]
    #[should_panic(expected = "Invalid field 'salary'")]
    fn test_index_panics_on_unknown_key() {
        let p = person()
            .named([("name", "John".into()), ("age", 19.into())])
            .unwrap();
        let _ = &p["salary"];
    }

    #[test]
    fn test_nominal_identity() {
        let a = person();
        let b = person();
        assert!(a.is_same(&a.clone()));
        assert!(!a.is_same(&b));

        let data = [("name", Value::from("John")), ("age", Value::Int(19))];
        assert_ne!(a.named(data.clone()).unwrap(), b.named(data).unwrap());
    }

    #[test]
    fn test_unknown_fields_listed() {
        let err = person()
            .named([
                ("name", "Alan".into()),
                ("x", 57.into()),
                ("age", 5.into()),
                ("b", 1.into()),
            ])
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Value);
        assert_eq!(err, RecordError::UnknownFields(vec!["b".into(), "x".into()]));
    }

    #[test]
    fn test_auxiliary_method() {
        let ty = SchemaBuilder::new("Point", [("x", Contract::Int), ("y", Contract::Int)])
            .unwrap()
            .create_with(Methods::new().define("sum", |p| {
                let x = p.lookup("x")?.as_int().unwrap_or_default();
                let y = p.lookup("y")?.as_int().unwrap_or_default();
                Ok(Value::Int(x + y))
            }));

        let p = ty.positional(vec![3.into(), 4.into()]).unwrap();
        assert_eq!(p.call("sum").unwrap(), Value::Int(7));
        assert_eq!(
            p.call("product").unwrap_err(),
            RecordError::UnknownMethod {
                record_type: "Point".into(),
                method: "product".into()
            }
        );
    }

    #[test]
    fn test_display_and_debug_match() {
        let p = person()
            .named([
                ("married", false.into()),
                ("name", "John".into()),
                ("age", 50.into()),
            ])
            .unwrap();

        assert_eq!(
            p.to_string(),
            r#"Person(name: "John", age: 50, married: false)"#
        );
        assert_eq!(format!("{p:?}"), p.to_string());
    }
}
