//! Corpus-wide statistics
//!
//! An explicit accumulator: each file outcome is folded in once, counters only
//! ever grow.

use super::analysis::{FileOutcome, Verdict};
use crate::core::classifier::is_subgraph_node;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Counters and histograms gathered over every scanned template
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CorpusStatistics {
    pub total_files: usize,
    pub files_with_safetensors: usize,
    pub files_with_properties_models: usize,
    /// Safetensors-bearing node types, subgraph nodes excluded
    pub node_types: BTreeMap<String, usize>,
    pub model_loader_types: BTreeMap<String, usize>,
    /// Safetensors-bearing subgraph node types
    pub subgraph_node_types: BTreeMap<String, usize>,
    pub total_safetensors_files: BTreeSet<String>,
    pub files_with_errors: Vec<String>,
    pub markdown_link_errors: usize,
    pub model_link_errors: usize,
}

impl CorpusStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one file outcome into the statistics
    ///
    /// A file that failed to parse only counts towards `total_files` and
    /// `files_with_errors`.
    pub fn absorb(&mut self, outcome: &FileOutcome) {
        self.total_files += 1;

        let analysis = match outcome {
            FileOutcome::ParseError { file, .. } => {
                self.files_with_errors.push(file.clone());
                return;
            }
            FileOutcome::Analyzed(analysis) => analysis,
        };

        if !analysis.safetensors_widgets.is_empty() {
            self.files_with_safetensors += 1;
        }
        if analysis.analysis.has_properties_models {
            self.files_with_properties_models += 1;
        }

        for entry in &analysis.safetensors_widgets {
            let node_type = &entry.node.node_type;
            let histogram = if is_subgraph_node(node_type) {
                &mut self.subgraph_node_types
            } else {
                &mut self.node_types
            };
            *histogram.entry(node_type.clone()).or_insert(0) += 1;
            self.total_safetensors_files
                .extend(entry.safetensors_files.iter().cloned());
        }

        for loader in &analysis.model_loaders {
            *self
                .model_loader_types
                .entry(loader.node_type.clone())
                .or_insert(0) += 1;
        }

        self.markdown_link_errors += analysis.analysis.markdown_link_errors.len();
        self.model_link_errors += analysis.analysis.model_link_errors();
    }

    pub fn parse_errors(&self) -> usize {
        self.files_with_errors.len()
    }

    pub fn unique_safetensors_files(&self) -> usize {
        self.total_safetensors_files.len()
    }

    /// Fail on any parse error, link error or model reconciliation error
    pub fn verdict(&self) -> Verdict {
        if self.parse_errors() > 0 || self.markdown_link_errors > 0 || self.model_link_errors > 0 {
            Verdict::Fail
        } else {
            Verdict::Pass
        }
    }
}

/// Histogram entries by descending count, ties by ascending name
pub fn sorted_by_count(histogram: &BTreeMap<String, usize>) -> Vec<(&str, usize)> {
    let mut entries: Vec<(&str, usize)> = histogram
        .iter()
        .map(|(name, count)| (name.as_str(), *count))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries
}
