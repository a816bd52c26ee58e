//! Command-line argument parsing

use crate::models::config::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// model-audit - model reference validator for workflow templates
#[derive(Parser, Debug)]
#[command(name = "model-audit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check that workflow templates reference their .safetensors models consistently")]
#[command(long_about = "model-audit scans a directory of workflow template JSON files and checks that every \
.safetensors model is referenced consistently: widget values against the node's properties.models \
declaration, and markdown download links against the file named in their URL. It writes a report, \
an aggregated models.json and exits non-zero when any check fails.")]
#[command(after_help = "EXAMPLES:

    # Audit ./templates with the default whitelist
    model-audit

    # Audit another directory and write outputs elsewhere
    model-audit --templates-dir ./flows --report out/report.md --save out/models.json

    # Exempt extra node types from the properties.models check
    model-audit --whitelist ./scripts/whitelist.json

    # Machine-readable report, no console noise
    model-audit --format json --quiet

    # Create a .model-audit.toml with every option documented
    model-audit --init

Exit status is 0 when all checks pass, 1 when any check fails and 2 when the
audit could not run (unreadable templates directory, bad configuration).
")]
pub struct Args {
    /// Directory holding the template JSON files
    #[arg(long, value_name = "DIR", help = "Templates directory (default: ./templates)")]
    pub templates_dir: Option<PathBuf>,

    /// Whitelist configuration file
    #[arg(long, value_name = "FILE", help = "Path to whitelist configuration JSON (default: ./scripts/whitelist.json)")]
    pub whitelist: Option<PathBuf>,

    /// Report output path
    #[arg(long, value_name = "FILE", help = "Output report path (default: ./model_analysis_report.md)")]
    pub report: Option<PathBuf>,

    /// Aggregated model manifest output path
    #[arg(long, value_name = "FILE", help = "Output path for the aggregated models.json (default: ./models.json)")]
    pub save: Option<PathBuf>,

    /// File name patterns to skip
    #[arg(short, long, value_name = "PATTERN", help = "Glob patterns for template file names to skip (can be given multiple times; default: index.*)")]
    pub exclude: Vec<String>,

    /// Report format
    #[arg(short, long, value_name = "FORMAT", help = "Report format: markdown, json or csv (default: markdown)")]
    pub format: Option<OutputFormat>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", help = "Path to configuration file (defaults to .model-audit.toml in the current directory)")]
    pub config: Option<PathBuf>,

    /// Analyze files in parallel
    #[arg(long, help = "Analyze template files on all cores; the report is identical to a sequential run")]
    pub parallel: bool,

    /// Suppress non-essential output
    #[arg(short, long, help = "Do not print the report to stdout; only the verdict line is printed")]
    pub quiet: bool,

    /// Show debug information
    #[arg(short, long, help = "Log per-file analysis details to stderr")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, help = "Disable colored output")]
    pub no_colors: bool,

    /// Disable progress bars
    #[arg(long, help = "Disable the progress bar (useful for CI environments)")]
    pub no_progress: bool,

    /// Initialize a default configuration file
    #[arg(long, help = "Create a default configuration file (.model-audit.toml) in the current directory")]
    pub init: bool,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }
}
