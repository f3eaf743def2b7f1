//! Output formatters for generated documents.

use auditgen_proto::{Error, ExtensionDocument};
use clap::ValueEnum;

/// Output format for the generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// GraphQL `extend type` blocks
    Sdl,
    /// JSON encoding of the document
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Sdl => write!(f, "sdl"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Trait for formatting output.
pub trait Formatter: Send + Sync {
    /// Format an extension document.
    fn format_document(&self, document: &ExtensionDocument) -> Result<String, Error>;
}

/// Create a formatter for the given output format.
pub fn create_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Sdl => Box::new(SdlFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}

/// SDL formatter.
pub struct SdlFormatter;

impl Formatter for SdlFormatter {
    fn format_document(&self, document: &ExtensionDocument) -> Result<String, Error> {
        Ok(document.to_string())
    }
}

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_document(&self, document: &ExtensionDocument) -> Result<String, Error> {
        document.to_json_pretty()
    }
}
