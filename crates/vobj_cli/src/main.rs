mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "vobj")]
#[command(version, about = "Value object schema CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Describe the record type defined by a schema file
    Info {
        /// Path to the schema file (YAML, TOML or JSON)
        schema: String,

        /// Print everything on one line
        #[arg(short, long)]
        short: bool,
    },

    /// Check records against a schema
    Check {
        /// Path to the schema file (YAML, TOML or JSON)
        schema: String,

        /// Path to the records file (JSON or YAML list of objects)
        records: String,

        /// Stop at the first invalid record
        #[arg(long)]
        strict: bool,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    match cli.command {
        Commands::Info { schema, short } => commands::info::execute(&schema, short),

        Commands::Check {
            schema,
            records,
            strict,
            format,
        } => commands::check::execute(&schema, &records, strict, &format),
    }
}
