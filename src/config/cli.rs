//! Command-line argument configuration source

use std::path::PathBuf;

use super::ConfigSource;
use crate::cli::args::Args;
use crate::error::Result;
use crate::models::config::{OutputFormat, PartialSettings};

/// Command-line arguments relevant to configuration
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub templates_dir: Option<PathBuf>,
    pub whitelist: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub save: Option<PathBuf>,
    pub exclude: Option<Vec<String>>,
    pub output_format: Option<OutputFormat>,
    pub parallel: bool,
    pub quiet: bool,
    pub verbose: bool,
    pub no_colors: bool,
    pub no_progress: bool,
    pub config: Option<PathBuf>,
}

impl From<&Args> for CliArgs {
    fn from(args: &Args) -> Self {
        Self {
            templates_dir: args.templates_dir.clone(),
            whitelist: args.whitelist.clone(),
            report: args.report.clone(),
            save: args.save.clone(),
            exclude: (!args.exclude.is_empty()).then(|| args.exclude.clone()),
            output_format: args.format,
            parallel: args.parallel,
            quiet: args.quiet,
            verbose: args.verbose,
            no_colors: args.no_colors,
            no_progress: args.no_progress,
            config: args.config.clone(),
        }
    }
}

/// Command-line argument configuration source
#[derive(Debug)]
pub struct CliConfig {
    args: CliArgs,
}

impl CliConfig {
    pub fn new(args: CliArgs) -> Self {
        Self { args }
    }

    /// Create a CLI configuration source from parsed arguments
    pub fn from_args(args: &Args) -> Self {
        Self::new(CliArgs::from(args))
    }

    /// Get the config file path if specified
    pub fn config_path(&self) -> Option<&PathBuf> {
        self.args.config.as_ref()
    }
}

impl ConfigSource for CliConfig {
    fn load(&self) -> Result<PartialSettings> {
        let args = &self.args;

        // Flags only override when set so lower layers keep their values
        Ok(PartialSettings {
            templates_dir: args.templates_dir.clone(),
            whitelist_path: args.whitelist.clone(),
            report_path: args.report.clone(),
            save_path: args.save.clone(),
            exclude_patterns: args.exclude.clone(),
            output_format: args.output_format,
            parallel: args.parallel.then_some(true),
            quiet: args.quiet.then_some(true),
            verbose: args.verbose.then_some(true),
            use_colors: args.no_colors.then_some(false),
            show_progress: (args.no_progress || args.quiet).then_some(false),
        })
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "command-line arguments"
    }
}
