//! Widget / properties.models reconciliation

use crate::config::whitelist::WhitelistConfig;
use crate::core::classifier::is_exempt;
use crate::models::analysis::{MatchResult, MissingProperties};
use crate::models::graph::Node;
use std::collections::BTreeSet;

/// Result of reconciling one node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeMatch {
    /// The node declares models; the sets were partitioned
    Reconciled(MatchResult),
    /// The node references model files but declares none
    MissingProperties(MissingProperties),
}

/// Reconciles model file names in widget values with `properties.models`
pub struct ModelMatcher<'a> {
    whitelist: &'a WhitelistConfig,
}

impl<'a> ModelMatcher<'a> {
    pub fn new(whitelist: &'a WhitelistConfig) -> Self {
        Self { whitelist }
    }

    /// Reconcile a node given its model-bearing widget values
    ///
    /// Returns `None` for nodes without model references and for exempt
    /// node types.
    pub fn match_node(&self, node: &Node, safetensors_files: &[String]) -> Option<NodeMatch> {
        if safetensors_files.is_empty() || is_exempt(&node.node_type, self.whitelist) {
            return None;
        }

        let declared = node.properties.declared_models();
        if declared.is_empty() {
            return Some(NodeMatch::MissingProperties(MissingProperties {
                node_id: node.id.clone(),
                node_type: node.node_type.clone(),
                safetensors_files: safetensors_files.to_vec(),
            }));
        }

        let widget_names: BTreeSet<String> = safetensors_files.iter().cloned().collect();
        // Descriptors without a name contribute "" to the set
        let property_names: BTreeSet<String> =
            declared.iter().map(|model| model.name.clone()).collect();

        Some(NodeMatch::Reconciled(MatchResult::from_sets(
            node.id.clone(),
            node.node_type.clone(),
            &widget_names,
            &property_names,
        )))
    }
}
