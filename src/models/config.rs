//! Configuration-related data structures

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Whitelist location used when none is configured
pub const DEFAULT_WHITELIST_PATH: &str = "scripts/whitelist.json";

/// Main configuration settings for model-audit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory holding the template JSON files
    pub templates_dir: PathBuf,

    /// Whitelist of node types exempt from the properties.models check
    pub whitelist_path: PathBuf,

    /// Where the report is written
    pub report_path: PathBuf,

    /// Where the aggregated model manifest is written
    pub save_path: PathBuf,

    /// File name patterns skipped during the scan
    pub exclude_patterns: Vec<String>,

    /// Report format (markdown, json, csv)
    pub output_format: OutputFormat,

    /// Whether to analyse files on the rayon pool
    pub parallel: bool,

    /// Whether to suppress non-essential output
    pub quiet: bool,

    /// Whether to show debug information
    pub verbose: bool,

    /// Whether to use colors in console output
    pub use_colors: bool,

    /// Whether to show a progress bar while scanning
    pub show_progress: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from("./templates"),
            whitelist_path: PathBuf::from(DEFAULT_WHITELIST_PATH),
            report_path: PathBuf::from("./model_analysis_report.md"),
            save_path: PathBuf::from("./models.json"),
            exclude_patterns: vec!["index.*".to_string()],
            output_format: OutputFormat::Markdown,
            parallel: false,
            quiet: false,
            verbose: false,
            use_colors: true,
            show_progress: true,
        }
    }
}

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown report for humans and CI logs
    Markdown,
    /// JSON dump of every file outcome and the statistics
    Json,
    /// One CSV row per finding
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Partial settings for configuration merging
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialSettings {
    pub templates_dir: Option<PathBuf>,
    pub whitelist_path: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub save_path: Option<PathBuf>,
    pub exclude_patterns: Option<Vec<String>>,
    pub output_format: Option<OutputFormat>,
    pub parallel: Option<bool>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub use_colors: Option<bool>,
    pub show_progress: Option<bool>,
}

impl PartialSettings {
    /// Merge another PartialSettings into this one
    /// Fields from `other` take precedence over existing fields
    pub fn merge_from(&mut self, other: PartialSettings) {
        if other.templates_dir.is_some() {
            self.templates_dir = other.templates_dir;
        }
        if other.whitelist_path.is_some() {
            self.whitelist_path = other.whitelist_path;
        }
        if other.report_path.is_some() {
            self.report_path = other.report_path;
        }
        if other.save_path.is_some() {
            self.save_path = other.save_path;
        }
        if other.exclude_patterns.is_some() {
            self.exclude_patterns = other.exclude_patterns;
        }
        if other.output_format.is_some() {
            self.output_format = other.output_format;
        }
        if other.parallel.is_some() {
            self.parallel = other.parallel;
        }
        if other.quiet.is_some() {
            self.quiet = other.quiet;
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
        if other.use_colors.is_some() {
            self.use_colors = other.use_colors;
        }
        if other.show_progress.is_some() {
            self.show_progress = other.show_progress;
        }
    }

    /// Convert partial settings to full settings
    /// Uses defaults for any fields that are None
    pub fn to_settings(&self) -> Settings {
        let defaults = Settings::default();

        Settings {
            templates_dir: self.templates_dir.clone().unwrap_or(defaults.templates_dir),
            whitelist_path: self.whitelist_path.clone().unwrap_or(defaults.whitelist_path),
            report_path: self.report_path.clone().unwrap_or(defaults.report_path),
            save_path: self.save_path.clone().unwrap_or(defaults.save_path),
            exclude_patterns: self
                .exclude_patterns
                .clone()
                .unwrap_or(defaults.exclude_patterns),
            output_format: self.output_format.unwrap_or(defaults.output_format),
            parallel: self.parallel.unwrap_or(defaults.parallel),
            quiet: self.quiet.unwrap_or(defaults.quiet),
            verbose: self.verbose.unwrap_or(defaults.verbose),
            use_colors: self.use_colors.unwrap_or(defaults.use_colors),
            show_progress: self.show_progress.unwrap_or(defaults.show_progress),
        }
    }
}
