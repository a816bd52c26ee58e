//! Data models for templates, findings and configuration

pub mod analysis;
pub mod config;
pub mod graph;
pub mod statistics;

pub use analysis::{
    AuditResults, ConsistencyFindings, FileAnalysis, FileOutcome, MarkdownLink,
    MarkdownLinkError, MatchResult, MissingProperties, SafetensorsNode, Verdict,
};
pub use config::{OutputFormat, PartialSettings, Settings};
pub use graph::{GraphFile, ModelDescriptor, Node, NodeProperties, MODEL_EXTENSION};
pub use statistics::CorpusStatistics;
