//! Node-type whitelist for the properties.models check
//!
//! ```json
//! { "whitelist": { "model_check_ignore_node_types": ["MarkdownNote", "Note"] } }
//! ```
//!
//! A missing or malformed whitelist is never fatal: the audit falls back to
//! an empty ignore-set.

use crate::error::{AuditError, Result};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
struct WhitelistFile {
    #[serde(default)]
    whitelist: WhitelistSection,
}

#[derive(Debug, Default, Deserialize)]
struct WhitelistSection {
    #[serde(default)]
    model_check_ignore_node_types: Vec<String>,
}

/// Node types exempt from widget / properties.models reconciliation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WhitelistConfig {
    /// Lowercased node types
    ignore_node_types: BTreeSet<String>,
}

impl WhitelistConfig {
    /// Build a whitelist from node type names
    pub fn new<I, S>(node_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            ignore_node_types: node_types
                .into_iter()
                .map(|t| t.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Load the whitelist, falling back to an empty one on any problem
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(config) => {
                tracing::debug!(
                    path = %path.display(),
                    entries = config.len(),
                    "loaded model check whitelist"
                );
                config
            }
            Err(err) => {
                tracing::debug!("using empty whitelist: {}", err);
                Self::default()
            }
        }
    }

    /// Load the whitelist, reporting why it could not be read
    pub fn try_load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AuditError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content).map_err(|e| match e {
            AuditError::JsonParse { source, .. } => AuditError::json_parse_error(path, source),
            other => other,
        })
    }

    /// Parse whitelist JSON content
    pub fn parse(content: &str) -> Result<Self> {
        let file: WhitelistFile = serde_json::from_str(content)
            .map_err(|e| AuditError::json_parse_error("whitelist.json", e))?;
        Ok(Self::new(file.whitelist.model_check_ignore_node_types))
    }

    /// Case-insensitive membership test
    pub fn contains(&self, node_type: &str) -> bool {
        self.ignore_node_types.contains(&node_type.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.ignore_node_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ignore_node_types.is_empty()
    }
}
