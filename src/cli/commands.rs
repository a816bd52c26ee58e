//! Command implementations

use super::Args;
use crate::config::{self, CliArgs, DEFAULT_CONFIG_FILE};
use crate::core::CorpusAggregator;
use crate::error::Result;
use crate::models::analysis::{AuditResults, Verdict};
use crate::models::config::Settings;
use crate::output::{
    create_formatter, create_progress_callback, format_verdict, write_model_manifest, FileWriter,
    OutputWriter, ProgressReporter, StdoutWriter,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Available commands
#[derive(Debug)]
pub enum Command {
    /// Audit the templates directory
    Audit(Args),
    /// Initialize a default configuration file
    Init,
}

impl Command {
    /// Create a command from parsed arguments
    pub fn from_args(args: Args) -> Self {
        if args.init {
            return Command::Init;
        }
        Command::Audit(args)
    }

    /// Execute the command, returning the audit verdict
    pub fn execute(&self) -> Result<Verdict> {
        match self {
            Command::Audit(args) => {
                let settings = config::load_config(CliArgs::from(args))?;
                tracing::debug!(?settings, "resolved settings");

                let results = run_audit(&settings)?;
                let verdict = results.verdict();

                StdoutWriter.write(&format!("\n{}", format_verdict(verdict, settings.use_colors)))?;
                Ok(verdict)
            }
            Command::Init => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);

                if config_path.exists() {
                    println!("Configuration file already exists at: {}", config_path.display());
                    println!("To overwrite it, delete the file first and run this command again.");
                    return Ok(Verdict::Pass);
                }

                config::create_default_config(&config_path)?;
                println!("Created default configuration file at: {}", config_path.display());
                Ok(Verdict::Pass)
            }
        }
    }

    /// Run the command and map the outcome to a process exit code
    pub fn run(&self) -> i32 {
        match self.execute() {
            Ok(verdict) => verdict.exit_code(),
            Err(err) => {
                eprintln!("{}: {}", err.severity(), err.user_message());
                if let Some(suggestion) = err.suggestion() {
                    eprintln!("Suggestion: {}", suggestion);
                }
                err.exit_code()
            }
        }
    }
}

/// Scan the corpus and write every output the settings ask for
///
/// The report goes to `report_path` and, unless quiet, to stdout. The model
/// manifest goes to `save_path`.
pub fn run_audit(settings: &Settings) -> Result<AuditResults> {
    let aggregator = CorpusAggregator::from_settings(settings)?;

    let reporter = Arc::new(ProgressReporter::new(
        settings.show_progress && !settings.quiet,
        settings.verbose,
    ));
    reporter.start(0, &format!("Scanning {}", settings.templates_dir.display()));
    let results = aggregator.run_with_progress(create_progress_callback(reporter.clone()))?;
    reporter.finish(&format!("Analyzed {} files", results.statistics.total_files));

    let report = create_formatter(settings.output_format).format(&results)?;
    FileWriter::new(&settings.report_path).write(&report)?;
    if !settings.quiet {
        StdoutWriter.write(&report)?;
    }

    write_model_manifest(&results, &settings.save_path)?;

    Ok(results)
}
