//! Output formatting and writing functionality

mod formatters;
pub mod manifest;
mod progress;
mod writers;

pub use self::formatters::{format_list, format_verdict, REPORT_TITLE};
pub use self::manifest::{build_model_manifest, format_model_manifest, write_model_manifest};
pub use self::progress::{create_progress_callback, ProgressReporter};
pub use self::writers::{FileWriter, OutputWriter, StdoutWriter};

use crate::error::Result;
use crate::models::analysis::AuditResults;
use crate::models::config::OutputFormat;

/// Trait for different output formatters
pub trait Formatter {
    /// Format audit results into a string
    fn format(&self, results: &AuditResults) -> Result<String>;
}

/// Markdown report for humans and CI logs
#[derive(Debug, Default)]
pub struct MarkdownFormatter;

impl Formatter for MarkdownFormatter {
    fn format(&self, results: &AuditResults) -> Result<String> {
        Ok(formatters::format_results_markdown(results))
    }
}

/// JSON formatter for machine-readable output
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, results: &AuditResults) -> Result<String> {
        formatters::format_results_json(results)
    }
}

/// CSV formatter, one row per finding
#[derive(Debug, Default)]
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, results: &AuditResults) -> Result<String> {
        formatters::format_results_csv(results)
    }
}

/// Create a formatter based on the output format
pub fn create_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Markdown => Box::new(MarkdownFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}
