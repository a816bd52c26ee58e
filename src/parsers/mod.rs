//! Parsing functionality for template files
//!
//! Typed extraction of graph nodes and recovery of markdown model links from
//! free text.

pub mod graph_file;
pub mod markdown_links;

pub use graph_file::GraphFileParser;
pub use markdown_links::{extract_markdown_links, scan_balanced_url};
