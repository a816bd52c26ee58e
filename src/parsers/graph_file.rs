//! Template file parsing
//!
//! Templates are processed field by field. Anything that does not look like
//! the expected shape degrades to an empty value rather than an error; only
//! unreadable files and invalid JSON are failures.

use crate::error::{AuditError, Result};
use crate::models::graph::{GraphFile, ModelDescriptor, Node, NodeProperties};
use serde_json::{Map, Value};
use std::path::Path;

/// Parser for workflow template files
pub struct GraphFileParser;

impl GraphFileParser {
    /// Parse template content into a GraphFile
    pub fn parse(file_name: &str, content: &str) -> Result<GraphFile> {
        let document: Value = serde_json::from_str(content)
            .map_err(|e| AuditError::json_parse_error(file_name, e))?;

        Ok(Self::from_document(file_name, document))
    }

    /// Read and parse a template file
    pub fn parse_file(path: &Path) -> Result<GraphFile> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let content = std::fs::read_to_string(path).map_err(AuditError::io_error)?;

        Self::parse(&file_name, &content).map_err(|e| match e {
            AuditError::JsonParse { source, .. } => AuditError::json_parse_error(path, source),
            other => other,
        })
    }

    /// Build the typed view of an already parsed document
    pub fn from_document(file_name: &str, document: Value) -> GraphFile {
        let (nodes, root_models) = match document.as_object() {
            Some(root) => (Self::extract_nodes(root), Self::extract_root_models(root)),
            None => {
                tracing::debug!(file = file_name, "template root is not an object");
                (Vec::new(), None)
            }
        };

        GraphFile {
            file_name: file_name.to_string(),
            nodes,
            root_models,
            document,
        }
    }

    fn extract_nodes(root: &Map<String, Value>) -> Vec<Node> {
        let Some(Value::Array(items)) = root.get("nodes") else {
            return Vec::new();
        };

        items
            .iter()
            .filter_map(|item| match item {
                Value::Object(obj) => Some(Self::extract_node(obj)),
                other => {
                    tracing::warn!("skipping node that is not an object: {}", other);
                    None
                }
            })
            .collect()
    }

    fn extract_node(obj: &Map<String, Value>) -> Node {
        Node {
            id: obj.get("id").cloned().unwrap_or(Value::Null),
            node_type: obj
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            widgets_values: Self::extract_widgets(obj.get("widgets_values")),
            properties: match obj.get("properties") {
                Some(Value::Object(props)) => NodeProperties::from_map(props.clone()),
                _ => NodeProperties::default(),
            },
        }
    }

    /// Widget values are usually a list; some nodes store a keyed object
    ///
    /// A keyed object contributes its values, not its keys, since the keys are
    /// widget names and never model files.
    fn extract_widgets(value: Option<&Value>) -> Vec<Value> {
        match value {
            Some(Value::Array(items)) => items.clone(),
            Some(Value::Object(map)) => map.values().cloned().collect(),
            _ => Vec::new(),
        }
    }

    fn extract_root_models(root: &Map<String, Value>) -> Option<Vec<ModelDescriptor>> {
        root.get("models").map(|value| match value {
            Value::Array(items) => items.iter().cloned().map(ModelDescriptor::from_value).collect(),
            _ => Vec::new(),
        })
    }
}
