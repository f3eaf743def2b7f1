//! auditgen Command-Line Tool
//!
//! Reads an introspection snapshot and prints the audit schema extension.

mod formatter;

use auditgen_core::{generate, AuditOptions, DefaultInflection, Introspection};
use clap::Parser;
use formatter::OutputFormat;
use std::path::PathBuf;
use tracing::info;

/// auditgen Command-Line Tool
#[derive(Parser, Debug)]
#[command(name = "auditgen")]
#[command(version, about = "Generate audit history fields from a database introspection snapshot")]
pub struct Args {
    /// Introspection snapshot (JSON)
    #[arg(short = 'i', long)]
    pub introspection: PathBuf,

    /// Generation options (JSON)
    #[arg(short = 'o', long)]
    pub options: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "sdl", value_enum)]
    pub format: OutputFormat,

    /// Hide the audit id column of audited tables
    #[arg(long)]
    pub omit_audit_ids: bool,

    /// Make audit event fields nullable
    #[arg(long)]
    pub optional_fields: bool,
}

fn main() {
    // Logs go to stderr so stdout carries only the document
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("auditgen=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = Introspection::from_path(&args.introspection)?;

    let mut options = match &args.options {
        Some(path) => AuditOptions::from_path(path)?,
        None => AuditOptions::default(),
    };
    if args.omit_audit_ids {
        options = options.with_omit_audit_ids(true);
    }
    if args.optional_fields {
        options = options.with_optional_fields(true);
    }

    let schema = generate(&snapshot, &options, &DefaultInflection)?;

    for annotation in &schema.annotations {
        info!(annotation = %annotation, "Applied annotation");
    }

    let formatter = formatter::create_formatter(args.format);
    let output = formatter.format_document(&schema.document)?;
    if !output.is_empty() {
        println!("{}", output);
    }

    Ok(())
}
