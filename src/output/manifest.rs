//! Aggregated model manifest
//!
//! Collects every model descriptor declared by loader nodes into one JSON
//! object keyed by model name.

use crate::error::{AuditError, Result};
use crate::models::analysis::AuditResults;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Model name to its full descriptor
///
/// Keys come out sorted by name, not in first-seen order, so the written
/// manifest is byte-stable across sequential and parallel runs.
///
/// Descriptors with an empty name are skipped and a later declaration of the
/// same name replaces an earlier one.
pub fn build_model_manifest(results: &AuditResults) -> BTreeMap<String, Value> {
    let mut manifest = BTreeMap::new();

    for analysis in results.analyses() {
        for loader in &analysis.model_loaders {
            for model in loader.properties.declared_models() {
                if model.name.is_empty() {
                    continue;
                }
                manifest.insert(model.name.clone(), model.raw().clone());
            }
        }
    }

    manifest
}

/// Serialize a manifest with 4-space indentation
pub fn format_model_manifest(manifest: &BTreeMap<String, Value>) -> Result<String> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    manifest.serialize(&mut serializer)?;

    String::from_utf8(buffer).map_err(|e| AuditError::Analysis {
        message: format!("manifest is not valid UTF-8: {}", e),
    })
}

/// Build the manifest for `results` and write it to `path`
pub fn write_model_manifest(results: &AuditResults, path: &Path) -> Result<usize> {
    let manifest = build_model_manifest(results);
    let content = format_model_manifest(&manifest)?;

    fs::write(path, content).map_err(|e| AuditError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(path = %path.display(), models = manifest.len(), "wrote model manifest");
    Ok(manifest.len())
}
