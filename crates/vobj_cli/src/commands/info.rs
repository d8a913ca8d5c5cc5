use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;
use vobj_core::InfoMode;
use vobj_parser::parse_file;

use crate::output;

pub fn execute(schema_path: &str, short: bool) -> Result<()> {
    info!("Loading schema: {}", schema_path);

    let path = Path::new(schema_path);
    let definition = parse_file(path)
        .with_context(|| format!("Failed to parse schema file: {}", schema_path))?;
    let record_type = definition
        .to_record_type()
        .with_context(|| format!("Invalid schema: {}", definition.name))?;

    output::print_success(&format!(
        "Schema loaded: {} ({} fields)",
        record_type.name(),
        record_type.arity()
    ));
    if let Some(description) = &definition.description {
        output::print_info(description);
    }

    let mode = if short { InfoMode::Short } else { InfoMode::Long };
    println!("\n{}", record_type.info(mode));

    Ok(())
}
