//! Typed views over a workflow template graph
//!
//! Templates are loosely structured JSON. These records keep only what the
//! audit needs, with explicit absence where it matters: a node without a
//! `properties.models` key is distinct from one whose list is empty.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// File extension that marks a string as a model file reference
pub const MODEL_EXTENSION: &str = ".safetensors";

/// A single downloadable model declared in template metadata
///
/// Only `name` is interpreted. The full JSON value is kept verbatim so that
/// fields such as `url` and `directory` reach the model manifest untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDescriptor {
    /// Declared file name, empty when missing or not a string
    pub name: String,
    raw: Value,
}

impl ModelDescriptor {
    /// Build a descriptor from its raw JSON value
    pub fn from_value(raw: Value) -> Self {
        let name = raw
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Self { name, raw }
    }

    /// The descriptor exactly as it appeared in the template
    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

impl Serialize for ModelDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

/// The `properties` object of a node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeProperties {
    /// `None` when the node has no `models` key at all
    pub models: Option<Vec<ModelDescriptor>>,
    raw: Map<String, Value>,
}

impl NodeProperties {
    /// Build properties from the raw JSON object
    pub fn from_map(raw: Map<String, Value>) -> Self {
        let models = raw.get("models").map(|value| match value {
            Value::Array(items) => items.iter().cloned().map(ModelDescriptor::from_value).collect(),
            // A present but unusable `models` value counts as an empty declaration
            _ => Vec::new(),
        });
        Self { models, raw }
    }

    /// Whether the node carries a `models` key, even an empty one
    pub fn has_models_key(&self) -> bool {
        self.models.is_some()
    }

    /// Declared models, empty when absent
    pub fn declared_models(&self) -> &[ModelDescriptor] {
        self.models.as_deref().unwrap_or_default()
    }

    /// The properties object exactly as it appeared in the template
    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }
}

impl Serialize for NodeProperties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

/// One node of a template graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: Value,
    #[serde(rename = "type")]
    pub node_type: String,
    pub widgets_values: Vec<Value>,
    pub properties: NodeProperties,
}

impl Node {
    /// Widget values that reference a model file
    pub fn safetensors_files(&self) -> Vec<String> {
        self.widgets_values
            .iter()
            .filter_map(Value::as_str)
            .filter(|value| value.contains(MODEL_EXTENSION))
            .map(str::to_string)
            .collect()
    }
}

/// Render an opaque node id for reports
pub fn display_id(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// A parsed template file
#[derive(Debug, Clone)]
pub struct GraphFile {
    /// File name without directory
    pub file_name: String,
    pub nodes: Vec<Node>,
    /// Root-level `models` array, `None` when the key is absent
    pub root_models: Option<Vec<ModelDescriptor>>,
    /// The whole document, walked for documentation links
    pub document: Value,
}
