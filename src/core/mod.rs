//! Core functionality for template analysis and corpus aggregation

pub mod aggregator;
pub mod analyzer;
pub mod classifier;
pub mod link_validator;
pub mod matcher;
pub mod parallel;

pub use aggregator::CorpusAggregator;
pub use analyzer::FileAnalyzer;
pub use matcher::ModelMatcher;
