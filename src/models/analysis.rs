//! Analysis result structures

use super::graph::{display_id, ModelDescriptor, Node};
use super::statistics::CorpusStatistics;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

/// A `[text](url)` reference to a model file found in free text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkdownLink {
    pub text: String,
    pub url: String,
}

impl MarkdownLink {
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
        }
    }
}

/// A link whose label does not agree with the file its URL points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkdownLinkError {
    pub text: String,
    pub url: String,
    /// File name recovered from the URL, if any
    pub url_name: Option<String>,
}

/// Reconciliation of widget file names against `properties.models` for one node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub node_id: Value,
    pub node_type: String,
    pub matched: BTreeSet<String>,
    pub missing_in_properties: BTreeSet<String>,
    pub extra_in_properties: BTreeSet<String>,
}

impl MatchResult {
    /// Partition the two name sets of a node
    pub fn from_sets(
        node_id: Value,
        node_type: impl Into<String>,
        widget_names: &BTreeSet<String>,
        property_names: &BTreeSet<String>,
    ) -> Self {
        Self {
            node_id,
            node_type: node_type.into(),
            matched: widget_names.intersection(property_names).cloned().collect(),
            missing_in_properties: widget_names.difference(property_names).cloned().collect(),
            extra_in_properties: property_names.difference(widget_names).cloned().collect(),
        }
    }

    /// True when either side references a file the other does not
    pub fn has_mismatch(&self) -> bool {
        !self.missing_in_properties.is_empty() || !self.extra_in_properties.is_empty()
    }

    pub fn node_label(&self) -> String {
        display_id(&self.node_id)
    }
}

/// A node that references model files but declares no `properties.models`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingProperties {
    pub node_id: Value,
    pub node_type: String,
    pub safetensors_files: Vec<String>,
}

impl MissingProperties {
    pub fn node_label(&self) -> String {
        display_id(&self.node_id)
    }
}

/// A node whose widgets reference at least one model file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SafetensorsNode {
    #[serde(flatten)]
    pub node: Node,
    pub safetensors_files: Vec<String>,
}

/// Cross-surface consistency findings for one file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConsistencyFindings {
    pub has_properties_models: bool,
    pub widgets_models_match: Vec<MatchResult>,
    pub missing_properties: Vec<MissingProperties>,
    pub markdown_link_errors: Vec<MarkdownLinkError>,
}

impl ConsistencyFindings {
    /// Nodes whose model references do not reconcile, including nodes with no metadata
    pub fn model_link_errors(&self) -> usize {
        let mismatched = self
            .widgets_models_match
            .iter()
            .filter(|m| m.has_mismatch())
            .count();
        mismatched + self.missing_properties.len()
    }

    pub fn has_issues(&self) -> bool {
        !self.markdown_link_errors.is_empty() || self.model_link_errors() > 0
    }
}

/// Everything extracted from one successfully parsed template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileAnalysis {
    pub file: String,
    pub model_loaders: Vec<Node>,
    pub safetensors_widgets: Vec<SafetensorsNode>,
    pub properties_models: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_models: Option<Vec<ModelDescriptor>>,
    pub markdown_links: Vec<MarkdownLink>,
    pub analysis: ConsistencyFindings,
}

impl FileAnalysis {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            model_loaders: Vec::new(),
            safetensors_widgets: Vec::new(),
            properties_models: Vec::new(),
            root_models: None,
            markdown_links: Vec::new(),
            analysis: ConsistencyFindings::default(),
        }
    }
}

/// Result of analysing one file: either findings or a parse failure
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Analyzed(FileAnalysis),
    ParseError { file: String, error: String },
}

impl FileOutcome {
    pub fn file(&self) -> &str {
        match self {
            FileOutcome::Analyzed(analysis) => &analysis.file,
            FileOutcome::ParseError { file, .. } => file,
        }
    }

    pub fn analysis(&self) -> Option<&FileAnalysis> {
        match self {
            FileOutcome::Analyzed(analysis) => Some(analysis),
            FileOutcome::ParseError { .. } => None,
        }
    }
}

/// Overall pass/fail judgement for a corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn is_pass(self) -> bool {
        self == Verdict::Pass
    }

    /// Process exit code for CI
    pub fn exit_code(self) -> i32 {
        match self {
            Verdict::Pass => 0,
            Verdict::Fail => 1,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => write!(f, "pass"),
            Verdict::Fail => write!(f, "fail"),
        }
    }
}

/// Per-file outcomes in scan order plus corpus statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AuditResults {
    pub files: Vec<FileOutcome>,
    pub statistics: CorpusStatistics,
}

impl AuditResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one file outcome and fold it into the statistics
    pub fn add_outcome(&mut self, outcome: FileOutcome) {
        self.statistics.absorb(&outcome);
        self.files.push(outcome);
    }

    /// Outcomes for files that parsed
    pub fn analyses(&self) -> impl Iterator<Item = &FileAnalysis> {
        self.files.iter().filter_map(FileOutcome::analysis)
    }

    pub fn verdict(&self) -> Verdict {
        self.statistics.verdict()
    }
}
