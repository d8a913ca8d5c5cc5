//! Loader for declarative record schemas (YAML/TOML/JSON formats).
//!
//! This crate reads schema definition files into [`SchemaDefinition`]s and
//! turns them into [`vobj_core::RecordType`]s. It also reads record documents
//! (lists of field → value objects) so that records can be checked against a
//! schema from the command line.
//!
//! # Example
//!
//! ```rust
//! use vobj_parser::parse_yaml;
//! use vobj_core::InfoMode;
//!
//! let yaml = r#"
//! name: Person
//! fields:
//!   - name: name
//!     type: String
//!   - name: age
//!     type: Nat
//!   - name: married
//!     type: Bool
//!     default: false
//! "#;
//!
//! let definition = parse_yaml(yaml).expect("Failed to parse schema");
//! let person = definition.to_record_type().expect("Invalid schema");
//! assert_eq!(
//!     person.info(InfoMode::Short),
//!     "Person[name: String, age: Nat, married: Bool (false)]"
//! );
//! ```

mod definition;
mod document;
mod types;

pub use definition::*;
pub use document::*;
pub use types::*;

use std::path::Path;
use thiserror::Error;
use vobj_core::{RecordError, RecordType};

/// Errors that can occur while loading schemas and record documents.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// JSON parsing or deserialization failed
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,

    /// Unknown contract type expression
    #[error("Unknown contract type: {0}")]
    UnknownType(String),

    /// Field definition is malformed
    #[error("Invalid definition for field '{field}': {message}")]
    InvalidField {
        /// Field name
        field: String,
        /// Problem description
        message: String,
    },

    /// Record document has an unexpected shape
    #[error("Invalid record document: {0}")]
    InvalidDocument(String),

    /// Schema building or record construction failed
    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
    /// JSON format (.json)
    Json,
}

/// Parse a schema definition from a YAML string.
pub fn parse_yaml(content: &str) -> Result<SchemaDefinition> {
    let definition: SchemaDefinition = serde_yaml_ng::from_str(content)?;
    Ok(definition)
}

/// Parse a schema definition from a TOML string.
///
/// # Example
///
/// ```rust
/// use vobj_parser::parse_toml;
///
/// let toml = r#"
/// name = "Point"
///
/// [[fields]]
/// name = "x"
/// type = "Int"
///
/// [[fields]]
/// name = "y"
/// type = "Int"
/// default = 0
/// "#;
///
/// let definition = parse_toml(toml).unwrap();
/// assert_eq!(definition.fields.len(), 2);
/// ```
pub fn parse_toml(content: &str) -> Result<SchemaDefinition> {
    let definition: SchemaDefinition =
        toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    Ok(definition)
}

/// Parse a schema definition from a JSON string.
pub fn parse_json(content: &str) -> Result<SchemaDefinition> {
    let definition: SchemaDefinition = serde_json::from_str(content)?;
    Ok(definition)
}

/// Detect the document format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.yaml`, `.yml` → `DocumentFormat::Yaml`
/// * `.toml` → `DocumentFormat::Toml`
/// * `.json` → `DocumentFormat::Json`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<DocumentFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(DocumentFormat::Yaml),
        "toml" => Ok(DocumentFormat::Toml),
        "json" => Ok(DocumentFormat::Json),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a schema definition from a file with automatic format detection.
///
/// ```no_run
/// use vobj_parser::parse_file;
/// use std::path::Path;
///
/// let definition = parse_file(Path::new("schemas/person.yml")).unwrap();
/// println!("Loaded schema: {}", definition.name);
/// ```
pub fn parse_file(path: &Path) -> Result<SchemaDefinition> {
    let content = std::fs::read_to_string(path)?;
    let format = detect_format(path)?;

    match format {
        DocumentFormat::Yaml => parse_yaml(&content),
        DocumentFormat::Toml => parse_toml(&content),
        DocumentFormat::Json => parse_json(&content),
    }
}

/// Load a schema file straight into a record type.
pub fn load_record_type(path: &Path) -> Result<RecordType> {
    parse_file(path)?.to_record_type()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use vobj_core::{ErrorKind, InfoMode, Value};

    const EMPLOYEE_YAML: &str = r#"
name: Employee
description: Someone on the payroll
fields:
  - name: name
    type: String
  - name: age
    type: Nat
  - name: title
    type: Maybe[String]
  - name: salary
    type: Nat
    default: 10000
"#;

    #[test]
    fn test_parse_valid_yaml() {
        let definition = parse_yaml(EMPLOYEE_YAML).unwrap();

        assert_eq!(definition.name, "Employee");
        assert_eq!(
            definition.description,
            Some("Someone on the payroll".to_string())
        );
        assert_eq!(definition.fields.len(), 4);
        assert_eq!(definition.fields[2].field_type, "Maybe[String]");
        assert_eq!(definition.fields[3].default, Some(serde_json::json!(10000)));
        assert_eq!(definition.fields[0].default, None);
    }

    #[test]
    fn test_yaml_to_record_type() {
        let employee = parse_yaml(EMPLOYEE_YAML).unwrap().to_record_type().unwrap();

        assert_eq!(
            employee.info(InfoMode::Short),
            "Employee[name: String, age: Nat, title: String or null, salary: Nat (10000)]"
        );
        let e = employee
            .named([("name", "Ally".into()), ("age", 19.into())])
            .unwrap();
        assert_eq!(e.get("salary"), Some(&Value::Int(10000)));
        assert_eq!(e.get("title"), Some(&Value::Null));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let yaml = "name: [unclosed";
        assert!(matches!(parse_yaml(yaml), Err(ParserError::YamlError(_))));

        let yaml = "name: Person\n";
        assert!(parse_yaml(yaml).is_err(), "fields are required");
    }

    #[test]
    fn test_parse_toml_with_constraints() {
        let toml = r#"
name = "Reading"

[[fields]]
name = "sensor"
type = "String"
pattern = "^[a-z]+-[0-9]+$"

[[fields]]
name = "celsius"
type = "Num"
range = { min = -273.15, max = 1000.0 }
"#;
        let reading = parse_toml(toml).unwrap().to_record_type().unwrap();

        assert!(
            reading
                .named([("sensor", "probe-1".into()), ("celsius", 21.5.into())])
                .is_ok()
        );
        let err = reading
            .named([("sensor", "Probe 1".into()), ("celsius", 21.5.into())])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ContractViolation);
        let err = reading
            .named([("sensor", "probe-1".into()), ("celsius", (-300.0).into())])
            .unwrap_err();
        assert_eq!(err.field(), Some("celsius"));
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{"name": "Flag", "fields": [{"name": "on", "type": "Bool"}]}"#;
        let flag = parse_json(json).unwrap().to_record_type().unwrap();
        let f = flag.positional(vec![true.into()]).unwrap();
        assert_eq!(f.lookup("on?").unwrap(), &Value::Bool(true));
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(
            detect_format(Path::new("a.yml")).unwrap(),
            DocumentFormat::Yaml
        );
        assert_eq!(
            detect_format(Path::new("a.YAML")).unwrap(),
            DocumentFormat::Yaml
        );
        assert_eq!(
            detect_format(Path::new("a.toml")).unwrap(),
            DocumentFormat::Toml
        );
        assert_eq!(
            detect_format(Path::new("a.json")).unwrap(),
            DocumentFormat::Json
        );
        assert!(matches!(
            detect_format(Path::new("a.txt")),
            Err(ParserError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            detect_format(Path::new("schema")),
            Err(ParserError::InvalidExtension)
        ));
    }

    #[test]
    fn test_load_record_type_from_file() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        file.write_all(EMPLOYEE_YAML.as_bytes()).unwrap();

        let employee = load_record_type(file.path()).unwrap();
        assert_eq!(employee.name(), "Employee");
        assert_eq!(employee.arity(), 4);
    }

    #[test]
    fn test_unknown_type_in_file() {
        let yaml = "name: Bad\nfields:\n  - name: x\n    type: Integer\n";
        let err = parse_yaml(yaml).unwrap().to_record_type().unwrap_err();
        assert!(err.to_string().contains("Integer"));
    }
}
