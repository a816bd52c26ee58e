//! Corpus scanning and aggregation
//!
//! Discovers the template files of a directory, analyzes each one and folds
//! the outcomes into corpus statistics. A bad file only affects its own
//! outcome; the only fatal condition is a templates directory that cannot be
//! listed.

use crate::config::whitelist::WhitelistConfig;
use crate::core::analyzer::FileAnalyzer;
use crate::core::parallel::{parallel_map_with_progress, ProgressUpdate};
use crate::error::{AuditError, Result, ResultExt};
use crate::models::{
    analysis::{AuditResults, FileOutcome},
    config::Settings,
};
use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const TEMPLATE_EXTENSION: &str = ".json";

/// Runs the file analyzer over every template of a directory
pub struct CorpusAggregator {
    templates_dir: PathBuf,
    exclude_patterns: Vec<Pattern>,
    parallel: bool,
    analyzer: FileAnalyzer,
}

impl CorpusAggregator {
    /// Create an aggregator for `templates_dir`
    pub fn new(templates_dir: impl Into<PathBuf>, analyzer: FileAnalyzer) -> Self {
        Self {
            templates_dir: templates_dir.into(),
            exclude_patterns: vec![Pattern::new("index.*").expect("default exclude pattern is valid")],
            parallel: false,
            analyzer,
        }
    }

    /// Create an aggregator from settings, loading the configured whitelist
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let whitelist = WhitelistConfig::load(&settings.whitelist_path);
        let exclude_patterns = compile_patterns(&settings.exclude_patterns)?;

        Ok(Self {
            templates_dir: settings.templates_dir.clone(),
            exclude_patterns,
            parallel: settings.parallel,
            analyzer: FileAnalyzer::new(whitelist),
        })
    }

    /// Replace the file name patterns that are skipped
    pub fn with_exclude_patterns(mut self, patterns: &[String]) -> Result<Self> {
        self.exclude_patterns = compile_patterns(patterns)?;
        Ok(self)
    }

    /// Analyze files on the rayon pool
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    /// Template files directly inside the directory, in file name order
    pub fn discover_files(&self) -> Result<Vec<PathBuf>> {
        if !self.templates_dir.is_dir() {
            return Err(AuditError::InvalidPath {
                path: self.templates_dir.clone(),
            });
        }

        // Surface an unreadable directory as a hard failure before walking
        std::fs::read_dir(&self.templates_dir).with_file_context(&self.templates_dir)?;

        let mut files = Vec::new();
        let walker = WalkDir::new(&self.templates_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!("skipping unreadable entry: {}", err);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if !name.ends_with(TEMPLATE_EXTENSION) || self.is_excluded(&name) {
                continue;
            }

            files.push(entry.into_path());
        }

        Ok(files)
    }

    /// Whether a file name matches any exclude pattern
    pub fn is_excluded(&self, file_name: &str) -> bool {
        self.exclude_patterns
            .iter()
            .any(|pattern| pattern.matches(file_name))
    }

    /// Analyze the corpus
    pub fn run(&self) -> Result<AuditResults> {
        self.run_with_progress(|_| {})
    }

    /// Analyze the corpus, reporting progress after each file
    pub fn run_with_progress<P>(&self, progress: P) -> Result<AuditResults>
    where
        P: Fn(ProgressUpdate) + Send + Sync,
    {
        let files = self.discover_files()?;
        let total = files.len();
        tracing::info!(
            dir = %self.templates_dir.display(),
            files = total,
            parallel = self.parallel,
            "scanning templates"
        );

        let outcomes: Vec<FileOutcome> = if self.parallel {
            parallel_map_with_progress(&files, |path| self.analyzer.analyze_path(path), &progress)
        } else {
            files
                .iter()
                .enumerate()
                .map(|(index, path)| {
                    let outcome = self.analyzer.analyze_path(path);
                    progress(ProgressUpdate::new(
                        index + 1,
                        total,
                        format!("Analyzed {}", outcome.file()),
                    ));
                    outcome
                })
                .collect()
        };

        // Fold in scan order so both modes produce identical results
        let mut results = AuditResults::new();
        for outcome in outcomes {
            results.add_outcome(outcome);
        }

        tracing::info!(
            files = results.statistics.total_files,
            parse_errors = results.statistics.parse_errors(),
            markdown_link_errors = results.statistics.markdown_link_errors,
            model_link_errors = results.statistics.model_link_errors,
            verdict = %results.verdict(),
            "scan complete"
        );

        Ok(results)
    }
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|pattern| Pattern::new(pattern).map_err(AuditError::from))
        .collect()
}
