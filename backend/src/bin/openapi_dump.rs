//! Print the OpenAPI document as JSON or YAML.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use patient_registry::doc::ApiDoc;
use utoipa::OpenApi;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

/// Export the patient registry OpenAPI document.
#[derive(Debug, Parser)]
struct Args {
    /// Output encoding.
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
    /// Write to this file instead of standard output.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let doc = ApiDoc::openapi();
    let rendered = match args.format {
        Format::Json => doc.to_pretty_json()?,
        Format::Yaml => doc.to_yaml()?,
    };

    match args.output {
        Some(path) => std::fs::write(path, rendered)?,
        None => writeln!(std::io::stdout().lock(), "{rendered}")?,
    }
    Ok(())
}
