//! Per-file template analysis
//!
//! Parses one template, extracts documentation links and model-bearing
//! nodes, and reconciles each surface against the others.

use crate::config::whitelist::WhitelistConfig;
use crate::core::classifier::is_loader_node;
use crate::core::link_validator::validate_links;
use crate::core::matcher::{ModelMatcher, NodeMatch};
use crate::error::AuditError;
use crate::models::analysis::{FileAnalysis, FileOutcome, SafetensorsNode};
use crate::models::graph::GraphFile;
use crate::parsers::{extract_markdown_links, GraphFileParser};
use std::path::Path;

/// Analyzer for single template files
#[derive(Debug, Clone, Default)]
pub struct FileAnalyzer {
    whitelist: WhitelistConfig,
}

impl FileAnalyzer {
    pub fn new(whitelist: WhitelistConfig) -> Self {
        Self { whitelist }
    }

    pub fn whitelist(&self) -> &WhitelistConfig {
        &self.whitelist
    }

    /// Analyze a template on disk
    ///
    /// Unreadable files and invalid JSON become a `ParseError` outcome; no
    /// further extraction is attempted for that file.
    pub fn analyze_path(&self, path: &Path) -> FileOutcome {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match GraphFileParser::parse_file(path) {
            Ok(graph) => FileOutcome::Analyzed(self.analyze_graph(&graph)),
            Err(err) => {
                tracing::debug!(file = %file_name, "parse failed: {}", err);
                FileOutcome::ParseError {
                    file: file_name,
                    error: parse_error_message(&err),
                }
            }
        }
    }

    /// Analyze template content that has not been parsed yet
    pub fn analyze_str(&self, file_name: &str, content: &str) -> FileOutcome {
        match GraphFileParser::parse(file_name, content) {
            Ok(graph) => FileOutcome::Analyzed(self.analyze_graph(&graph)),
            Err(err) => FileOutcome::ParseError {
                file: file_name.to_string(),
                error: parse_error_message(&err),
            },
        }
    }

    /// Analyze a parsed template
    pub fn analyze_graph(&self, graph: &GraphFile) -> FileAnalysis {
        let mut result = FileAnalysis::new(graph.file_name.clone());
        let matcher = ModelMatcher::new(&self.whitelist);

        result.markdown_links = extract_markdown_links(&graph.document);

        for node in &graph.nodes {
            if is_loader_node(&node.node_type) {
                result.model_loaders.push(node.clone());
            }

            let safetensors_files = node.safetensors_files();

            match matcher.match_node(node, &safetensors_files) {
                Some(NodeMatch::Reconciled(matched)) => {
                    result.analysis.widgets_models_match.push(matched)
                }
                Some(NodeMatch::MissingProperties(missing)) => {
                    result.analysis.missing_properties.push(missing)
                }
                None => {}
            }

            if !safetensors_files.is_empty() {
                result.safetensors_widgets.push(SafetensorsNode {
                    node: node.clone(),
                    safetensors_files,
                });
            }

            if node.properties.has_models_key() {
                result.properties_models.push(node.clone());
                result.analysis.has_properties_models = true;
            }
        }

        result.root_models = graph.root_models.clone();
        result.analysis.markdown_link_errors = validate_links(&result.markdown_links);

        tracing::debug!(
            file = %result.file,
            nodes = graph.nodes.len(),
            links = result.markdown_links.len(),
            link_errors = result.analysis.markdown_link_errors.len(),
            model_errors = result.analysis.model_link_errors(),
            "analyzed template"
        );

        result
    }
}

/// Short reason for a file that could not be analyzed
fn parse_error_message(err: &AuditError) -> String {
    match err {
        AuditError::JsonParse { source, .. } => source.to_string(),
        AuditError::Io { source } => source.to_string(),
        other => other.to_string(),
    }
}
