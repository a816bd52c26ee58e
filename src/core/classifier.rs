//! Node classification heuristics
//!
//! Node types are free-form strings. These checks are deliberately loose:
//! substring matching for loaders and UUID shape for subgraphs.

use crate::config::whitelist::WhitelistConfig;
use regex::Regex;
use std::sync::OnceLock;

/// Node types that never need a properties.models entry
const BUILTIN_EXEMPT_TYPES: [&str; 2] = ["markdownnote", "note"];

const LOADER_KEYWORDS: [&str; 2] = ["loader", "checkpoint"];

fn subgraph_pattern() -> &'static Regex {
    static ONCE: OnceLock<Regex> = OnceLock::new();
    ONCE.get_or_init(|| {
        Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
            .expect("subgraph pattern is valid")
    })
}

/// Whether the node type is a UUID, i.e. an embedded subgraph
pub fn is_subgraph_node(node_type: &str) -> bool {
    subgraph_pattern().is_match(node_type)
}

/// Whether the node type looks like a model loader
pub fn is_loader_node(node_type: &str) -> bool {
    let lowered = node_type.to_lowercase();
    LOADER_KEYWORDS.iter().any(|keyword| lowered.contains(keyword)) && !is_subgraph_node(node_type)
}

/// Whether the node skips widget / properties.models reconciliation
///
/// Exemption never affects link extraction.
pub fn is_exempt(node_type: &str, whitelist: &WhitelistConfig) -> bool {
    let lowered = node_type.to_lowercase();
    BUILTIN_EXEMPT_TYPES.contains(&lowered.as_str())
        || whitelist.contains(node_type)
        || is_subgraph_node(node_type)
}
