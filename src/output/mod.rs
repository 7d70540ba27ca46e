mod json;
mod text;

pub use json::{print_json, render_json};
pub use text::{print_text, render_text};

use crate::model::Catalog;
use anyhow::Result;

/// Output format for the catalog listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text, one table per product version
    Text,
    /// JSON format for programmatic use
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "table" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use 'text' or 'json'", s)),
        }
    }
}

pub fn print_catalog(catalog: &Catalog, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(catalog),
        OutputFormat::Json => print_json(catalog),
    }
}
