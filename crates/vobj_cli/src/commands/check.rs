use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};
use vobj_parser::{build_record, parse_file, parse_records_file};

use crate::output;

/// Outcome of checking a records file against a schema.
pub struct CheckReport {
    pub record_type: String,
    pub checked: usize,
    pub valid: usize,
    /// `(record index, error message)` for every rejected record
    pub failures: Vec<(usize, String)>,
}

impl CheckReport {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

pub fn execute(schema_path: &str, records_path: &str, strict: bool, format: &str) -> Result<()> {
    info!("Checking records {} against {}", records_path, schema_path);

    let definition = parse_file(Path::new(schema_path))
        .with_context(|| format!("Failed to parse schema file: {}", schema_path))?;
    let record_type = definition
        .to_record_type()
        .with_context(|| format!("Invalid schema: {}", definition.name))?;

    let objects = parse_records_file(Path::new(records_path))
        .with_context(|| format!("Failed to parse records file: {}", records_path))?;

    let mut report = CheckReport {
        record_type: record_type.name().to_string(),
        checked: 0,
        valid: 0,
        failures: Vec::new(),
    };

    for (index, object) in objects.into_iter().enumerate() {
        report.checked += 1;
        match build_record(&record_type, object) {
            Ok(record) => {
                debug!("record {} ok: {}", index, record);
                report.valid += 1;
            }
            Err(err) => {
                report.failures.push((index, err.to_string()));
                if strict {
                    break;
                }
            }
        }
    }

    output::print_check_report(&report, format);

    if !report.passed() {
        std::process::exit(1);
    }

    Ok(())
}
