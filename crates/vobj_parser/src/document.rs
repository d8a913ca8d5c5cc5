//! Conversion of document values into record values.
//!
//! Schema defaults and record documents arrive as generic JSON-like trees.
//! A field's contract steers the conversion where plain JSON is ambiguous:
//! strings become timestamps or symbols when the contract asks for them.

use crate::{DocumentFormat, ParserError, Result, detect_format};
use serde_json::Value as Json;
use std::path::Path;
use vobj_core::{Contract, Record, RecordType, Value};

/// Converts a document value, guided by the contract it will be checked against.
pub fn convert_value(json: Json, hint: &Contract) -> Value {
    match (json, hint) {
        (Json::String(s), Contract::Timestamp) => Value::Timestamp(s),
        (Json::String(s), Contract::Symbol) => Value::Symbol(s),
        (json, Contract::Maybe(inner)) => convert_value(json, inner),
        (json, Contract::InRange { of, .. }) => convert_value(json, of),
        (json, Contract::And(parts)) => match parts.first() {
            Some(first) => convert_value(json, first),
            None => convert_plain(json),
        },
        (Json::Array(items), Contract::ListOf(inner)) => Value::List(
            items
                .into_iter()
                .map(|item| convert_value(item, inner))
                .collect(),
        ),
        (Json::Object(map), Contract::MapOf(inner)) => Value::Map(
            map.into_iter()
                .map(|(k, v)| (k, convert_value(v, inner)))
                .collect(),
        ),
        (json, _) => convert_plain(json),
    }
}

/// Converts a document value without any contract guidance.
pub fn convert_plain(json: Json) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(b),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => n.as_f64().map_or(Value::Null, Value::Float),
        },
        Json::String(s) => Value::String(s),
        Json::Array(items) => Value::List(items.into_iter().map(convert_plain).collect()),
        Json::Object(map) => Value::Map(
            map.into_iter()
                .map(|(k, v)| (k, convert_plain(v)))
                .collect(),
        ),
    }
}

/// Builds a record of `record_type` from a document object.
///
/// Keys the record type does not know are converted plainly and left for
/// the record type to reject.
pub fn build_record(
    record_type: &RecordType,
    object: serde_json::Map<String, Json>,
) -> Result<Record> {
    let data: Vec<(String, Value)> = object
        .into_iter()
        .map(|(key, json)| {
            let value = match record_type.field(&key) {
                Some(spec) => convert_value(json, spec.contract()),
                None => convert_plain(json),
            };
            (key, value)
        })
        .collect();
    Ok(record_type.named(data)?)
}

/// Parses a record document: a list of objects, or a single object.
pub fn parse_records(
    content: &str,
    format: DocumentFormat,
) -> Result<Vec<serde_json::Map<String, Json>>> {
    let document: Json = match format {
        DocumentFormat::Json => serde_json::from_str(content)?,
        DocumentFormat::Yaml => serde_yaml_ng::from_str(content)?,
        DocumentFormat::Toml => {
            toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?
        }
    };

    match document {
        Json::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                Json::Object(map) => Ok(map),
                other => Err(ParserError::InvalidDocument(format!(
                    "entry {i} is not an object: {other}"
                ))),
            })
            .collect(),
        Json::Object(map) => Ok(vec![map]),
        other => Err(ParserError::InvalidDocument(format!(
            "expected a list of objects, got {other}"
        ))),
    }
}

/// Parses a record document from a file with automatic format detection.
pub fn parse_records_file(path: &Path) -> Result<Vec<serde_json::Map<String, Json>>> {
    let content = std::fs::read_to_string(path)?;
    let format = detect_format(path)?;
    parse_records(&content, format)
}
