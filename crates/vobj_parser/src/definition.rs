//! Declarative schema definitions.
//!
//! A [`SchemaDefinition`] is the file form of a record schema. Turning it
//! into a [`RecordType`] goes through [`SchemaBuilder`], so defaults are
//! validated exactly as they are for schemas built in code.

use crate::{ParserError, Result, convert_value, parse_contract};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;
use vobj_core::{Contract, RecordType, SchemaBuilder};

/// A record schema as written in a YAML/TOML/JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaDefinition {
    /// Record type name
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,

    /// Field definitions in declared order
    pub fields: Vec<FieldDefinition>,
}

/// A single field of a [`SchemaDefinition`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Field name
    pub name: String,

    /// Contract type expression (e.g. "Nat", "Maybe[String]")
    #[serde(rename = "type")]
    pub field_type: String,

    /// Default value; an explicit `null` is a real default
    #[serde(
        default,
        deserialize_with = "explicit_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<serde_json::Value>,

    /// Numeric range the value must fall in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<RangeDefinition>,

    /// Allowed values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<serde_json::Value>>,

    /// Regex the string value must match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Inclusive numeric bounds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RangeDefinition {
    /// Minimum value (inclusive)
    pub min: f64,
    /// Maximum value (inclusive)
    pub max: f64,
}

fn explicit_value<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

impl FieldDefinition {
    /// Builds the field's contract from its type and constraints.
    ///
    /// The type comes first; `range` wraps it, `one_of` and `pattern` are
    /// added as further requirements.
    pub fn contract(&self) -> Result<Contract> {
        let base = parse_contract(&self.field_type).map_err(|e| ParserError::InvalidField {
            field: self.name.clone(),
            message: e.to_string(),
        })?;

        let mut parts = vec![match self.range {
            Some(RangeDefinition { min, max }) => {
                if min > max {
                    return Err(ParserError::InvalidField {
                        field: self.name.clone(),
                        message: format!("range min {min} is greater than max {max}"),
                    });
                }
                Contract::in_range_of(min, max, base.clone())
            }
            None => base.clone(),
        }];

        if let Some(values) = &self.one_of {
            parts.push(Contract::OneOf(
                values
                    .iter()
                    .cloned()
                    .map(|v| convert_value(v, &base))
                    .collect(),
            ));
        }
        if let Some(pattern) = &self.pattern {
            parts.push(Contract::pattern(pattern)?);
        }

        Ok(match parts.len() {
            1 => parts.remove(0),
            _ => Contract::and(parts),
        })
    }
}

impl SchemaDefinition {
    /// Creates the record type this definition describes.
    ///
    /// # Errors
    ///
    /// Fails on an unknown type expression, an invalid constraint, or any
    /// schema builder error (empty/duplicate fields, invalid default).
    pub fn to_record_type(&self) -> Result<RecordType> {
        let fields = self
            .fields
            .iter()
            .map(|f| Ok((f.name.clone(), f.contract()?)))
            .collect::<Result<Vec<(String, Contract)>>>()?;

        let defaults: Vec<_> = self
            .fields
            .iter()
            .zip(&fields)
            .filter_map(|(field, (name, contract))| {
                field
                    .default
                    .clone()
                    .map(|json| (name.clone(), convert_value(json, contract)))
            })
            .collect();

        let mut builder = SchemaBuilder::new(&self.name, fields)?;
        if !defaults.is_empty() {
            builder = builder.default(defaults)?;
        }

        debug!(record_type = %self.name, "schema definition loaded");
        Ok(builder.create())
    }
}
