//! model-audit - model reference validator for workflow templates
//!
//! Scans a directory of workflow template JSON files and reconciles every
//! `.safetensors` reference across widget values, `properties.models`
//! declarations and markdown download links. Produces a report, an
//! aggregated model manifest and a pass/fail verdict for CI.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod output;
pub mod parsers;

// Re-export commonly used types
pub use config::WhitelistConfig;
pub use core::{CorpusAggregator, FileAnalyzer};
pub use error::{AuditError, ErrorSeverity, Result, ResultExt};
pub use models::{
    analysis::{AuditResults, FileAnalysis, FileOutcome, Verdict},
    config::Settings,
    statistics::CorpusStatistics,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
