//! Builder for record types.
//!
//! A [`SchemaBuilder`] collects an ordered field → contract mapping and the
//! field defaults, validating each default eagerly, then freezes everything
//! into a [`RecordType`].

use crate::{Contract, Methods, RecordError, RecordType, Result, TypeContract, Value};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// A single field definition of a record type.
#[derive(Clone)]
pub struct FieldSpec {
    name: String,
    contract: Contract,
    default: Option<Value>,
}

impl FieldSpec {
    /// Creates a field with no default.
    pub fn new(name: impl Into<String>, contract: Contract) -> Self {
        Self {
            name: name.into(),
            contract,
            default: None,
        }
    }

    /// Field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field contract.
    pub fn contract(&self) -> &Contract {
        &self.contract
    }

    /// Configured default, or `None` when the field has no default.
    ///
    /// A `Some(Value::Null)` default is a real default, distinct from `None`.
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Returns true if a default is configured.
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("contract", &self.contract)
            .field("default", &self.default)
            .finish()
    }
}

/// Builder for creating a [`RecordType`].
///
/// # Example
///
/// ```rust
/// use vobj_core::{Contract, SchemaBuilder, Value};
///
/// let person = SchemaBuilder::new(
///     "Person",
///     [
///         ("name", Contract::Str),
///         ("age", Contract::Nat),
///         ("married", Contract::Bool),
///     ],
/// )?
/// .default([("married", Value::Bool(false))])?
/// .create();
///
/// let p = person.named([("name", "John".into()), ("age", 19.into())])?;
/// assert!(!p.predicate("married")?);
/// # Ok::<(), vobj_core::RecordError>(())
/// ```
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<FieldSpec>,
}

impl SchemaBuilder {
    /// Creates a new schema builder from an ordered field → contract mapping.
    ///
    /// # Errors
    ///
    /// Returns a schema error if `fields` is empty, or if a field name is
    /// blank, repeated or ends in `?` (reserved for predicate aliases).
    pub fn new<K: Into<String>>(
        name: impl Into<String>,
        fields: impl IntoIterator<Item = (K, Contract)>,
    ) -> Result<Self> {
        let name = name.into();
        let mut seen = HashSet::new();
        let mut specs = Vec::new();

        for (field, contract) in fields {
            let field = field.into();
            if field.trim().is_empty() {
                return Err(RecordError::schema(format!(
                    "{name}: field names must not be blank"
                )));
            }
            if field.ends_with('?') {
                return Err(RecordError::schema(format!(
                    "{name}: field '{field}' must not end in '?'"
                )));
            }
            if !seen.insert(field.clone()) {
                return Err(RecordError::schema(format!(
                    "{name}: duplicate field '{field}'"
                )));
            }
            specs.push(FieldSpec::new(field, contract));
        }

        if specs.is_empty() {
            return Err(RecordError::schema(format!("{name}: schema has no fields")));
        }

        Ok(Self {
            name,
            fields: specs,
        })
    }

    /// Sets default values for fields.
    ///
    /// Every named field must exist and every default must satisfy its
    /// field's contract; both are checked now rather than at construction.
    ///
    /// # Errors
    ///
    /// Returns a schema error for an unknown field, or an invalid-default
    /// contract violation.
    pub fn default<K: Into<String>>(
        mut self,
        overrides: impl IntoIterator<Item = (K, Value)>,
    ) -> Result<Self> {
        let overrides: Vec<(String, Value)> =
            overrides.into_iter().map(|(k, v)| (k.into(), v)).collect();

        if let Some((unknown, _)) = overrides
            .iter()
            .find(|(field, _)| self.position(field).is_none())
        {
            return Err(RecordError::schema(format!(
                "{}: field '{unknown}' doesn't exist",
                self.name
            )));
        }

        for (field, value) in overrides {
            let Some(index) = self.position(&field) else {
                continue;
            };
            let spec = &mut self.fields[index];
            if !spec.contract.satisfies(&value) {
                return Err(RecordError::InvalidDefault {
                    field,
                    contract: spec.contract.describe(),
                    value,
                });
            }
            spec.default = Some(value);
        }

        Ok(self)
    }

    /// Returns the pending field table.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Finalizes the schema into a record type.
    pub fn create(self) -> RecordType {
        self.create_with(Methods::new())
    }

    /// Finalizes the schema into a record type with auxiliary methods.
    pub fn create_with(self, methods: Methods) -> RecordType {
        debug!(
            record_type = %self.name,
            fields = self.fields.len(),
            methods = methods.len(),
            "created record type"
        );
        RecordType::from_parts(self.name, self.fields, methods)
    }

    fn position(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|spec| spec.name == field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use pretty_assertions::assert_eq;

    fn person_builder() -> SchemaBuilder {
        SchemaBuilder::new(
            "Person",
            [
                ("name", Contract::Str),
                ("age", Contract::Nat),
                ("married", Contract::Bool),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_field_table_with_trailing_default() {
        let builder = person_builder()
            .default([("married", Value::Bool(false))])
            .unwrap();
        let table = builder.fields();

        assert_eq!(table.len(), 3);
        assert_eq!(table[0].name(), "name");
        assert_eq!(table[0].contract().describe(), "String");
        assert_eq!(table[0].default(), None);
        assert_eq!(table[1].name(), "age");
        assert_eq!(table[1].default(), None);
        assert_eq!(table[2].name(), "married");
        assert_eq!(table[2].default(), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_field_table_with_leading_defaults() {
        let builder = person_builder()
            .default([("name", Value::from("John")), ("age", Value::Int(37))])
            .unwrap();
        let table = builder.fields();

        assert_eq!(table[0].default(), Some(&Value::from("John")));
        assert_eq!(table[1].default(), Some(&Value::Int(37)));
        assert!(!table[2].has_default());
    }

    #[test]
    fn test_null_default_is_distinct_from_no_default() {
        let builder = SchemaBuilder::new("X", [("b", Contract::maybe(Contract::Str))])
            .unwrap()
            .default([("b", Value::Null)])
            .unwrap();

        assert!(builder.fields()[0].has_default());
        assert_eq!(builder.fields()[0].default(), Some(&Value::Null));
    }

    #[test]
    fn test_default_violating_contract_fails() {
        let err = person_builder()
            .default([("name", Value::Int(56))])
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ContractViolation);
        assert!(err.to_string().contains("violates contract"));
        assert_eq!(err.field(), Some("name"));
    }

    #[test]
    fn test_default_for_unknown_field_fails() {
        let err = person_builder()
            .default([("salary", Value::Int(1))])
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Schema);
        assert!(err.to_string().contains("salary"));
    }

    #[test]
    fn test_empty_schema_rejected() {
        let err = SchemaBuilder::new("Empty", Vec::<(&str, Contract)>::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
    }

    #[test]
    fn test_duplicate_and_blank_fields_rejected() {
        let err =
            SchemaBuilder::new("Dup", [("a", Contract::Int), ("a", Contract::Str)]).unwrap_err();
        assert!(err.to_string().contains("duplicate field 'a'"));

        let err = SchemaBuilder::new("Blank", [(" ", Contract::Int)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
    }

    #[test]
    fn test_question_mark_names_rejected() {
        let err = SchemaBuilder::new(
            "Person",
            [("married?", Contract::Int), ("married", Contract::Bool)],
        )
        .unwrap_err();

        assert_eq!(
            err,
            RecordError::schema("Person: field 'married?' must not end in '?'")
        );
    }
}
