//! Output formatting functionality
//!
//! Renders audit results as a markdown report, JSON or CSV, plus the
//! one-line console verdict.

use crate::error::{AuditError, Result};
use crate::models::analysis::{AuditResults, FileOutcome, Verdict};
use crate::models::statistics::sorted_by_count;
use ansi_term::Colour::{Green, Red};
use std::collections::BTreeMap;
use std::fmt::Display;

pub const REPORT_TITLE: &str = "# ComfyUI Template Model Analysis Report";

const FAIL_MESSAGE: &str = "[FAIL] Some checks failed. See report above.";
const SUCCESS_MESSAGE: &str = "[SUCCESS] All checks passed.";

/// Render a list of names as `[a, b]`
pub fn format_list<I, T>(items: I) -> String
where
    I: IntoIterator<Item = T>,
    T: Display,
{
    let joined = items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{}]", joined)
}

fn push_histogram(report: &mut Vec<String>, heading: &str, histogram: &BTreeMap<String, usize>) {
    report.push(format!("\n## {}", heading));
    for (node_type, count) in sorted_by_count(histogram) {
        report.push(format!("- {}: {}", node_type, count));
    }
}

/// Format audit results as the markdown report
///
/// Lines are joined with `\n` and the report has no trailing newline.
pub fn format_results_markdown(results: &AuditResults) -> String {
    let stats = &results.statistics;
    let mut report = Vec::new();

    report.push(format!("{}\n", REPORT_TITLE));
    report.push("## Summary".to_string());
    report.push(format!("- Total files analyzed: {}", stats.total_files));
    report.push(format!("- Files with .safetensors: {}", stats.files_with_safetensors));
    report.push(format!(
        "- Files with properties.models: {}",
        stats.files_with_properties_models
    ));
    report.push(format!(
        "- Unique .safetensors files found: {}",
        stats.unique_safetensors_files()
    ));
    if stats.parse_errors() > 0 {
        report.push(format!("- Files with parse errors: {}", stats.parse_errors()));
    }
    report.push(format!(
        "- Markdown safetensors link errors: {}",
        stats.markdown_link_errors
    ));
    report.push(format!("- Model link errors: {}", stats.model_link_errors));

    push_histogram(&mut report, "Model Loader Node Types", &stats.model_loader_types);
    push_histogram(&mut report, "Node Types with .safetensors", &stats.node_types);
    if !stats.subgraph_node_types.is_empty() {
        push_histogram(
            &mut report,
            "Subgraph Node Types with .safetensors (skipped from model validation)",
            &stats.subgraph_node_types,
        );
    }

    report.push("\n## Details".to_string());
    for outcome in &results.files {
        let analysis = match outcome {
            FileOutcome::ParseError { file, error } => {
                report.push(format!("\n### {} - ERROR: {}", file, error));
                continue;
            }
            FileOutcome::Analyzed(analysis) => analysis,
        };
        let file = &analysis.file;
        let findings = &analysis.analysis;

        if !findings.markdown_link_errors.is_empty() {
            report.push(format!("\n### {} - Markdown safetensors link errors:", file));
            for err in &findings.markdown_link_errors {
                report.push(format!(
                    "  - Text: {} | URL: {} | URL filename: {}",
                    err.text,
                    err.url,
                    err.url_name.as_deref().unwrap_or("(none)")
                ));
            }
        }

        for matched in findings.widgets_models_match.iter().filter(|m| m.has_mismatch()) {
            report.push(format!(
                "\n### {} - Node {} ({}) model link mismatch:",
                file,
                matched.node_label(),
                matched.node_type
            ));
            if !matched.missing_in_properties.is_empty() {
                report.push(format!(
                    "  - In widgets_values but missing in properties.models: {}",
                    format_list(&matched.missing_in_properties)
                ));
            }
            if !matched.extra_in_properties.is_empty() {
                report.push(format!(
                    "  - In properties.models but missing in widgets_values: {}",
                    format_list(&matched.extra_in_properties)
                ));
            }
        }

        for missing in &findings.missing_properties {
            report.push(format!(
                "\n### {} - Node {} ({}) missing properties.models for: {}",
                file,
                missing.node_label(),
                missing.node_type,
                format_list(&missing.safetensors_files)
            ));
        }
    }

    report.join("\n")
}

/// Format audit results as pretty JSON
pub fn format_results_json(results: &AuditResults) -> Result<String> {
    serde_json::to_string_pretty(results).map_err(|e| AuditError::JsonSerialize { source: e })
}

/// Format audit results as CSV, one row per finding
pub fn format_results_csv(results: &AuditResults) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);

    writer.write_record(["File", "Kind", "Node", "Text", "URL", "Detail"])?;

    for outcome in &results.files {
        let analysis = match outcome {
            FileOutcome::ParseError { file, error } => {
                writer.write_record([file.as_str(), "parse_error", "", "", "", error.as_str()])?;
                continue;
            }
            FileOutcome::Analyzed(analysis) => analysis,
        };
        let file = analysis.file.as_str();
        let findings = &analysis.analysis;

        for err in &findings.markdown_link_errors {
            writer.write_record([
                file,
                "markdown_link",
                "",
                err.text.as_str(),
                err.url.as_str(),
                err.url_name.as_deref().unwrap_or(""),
            ])?;
        }

        for matched in findings.widgets_models_match.iter().filter(|m| m.has_mismatch()) {
            let node = format!("{} ({})", matched.node_label(), matched.node_type);
            let detail = format!(
                "missing in properties: {}; extra in properties: {}",
                format_list(&matched.missing_in_properties),
                format_list(&matched.extra_in_properties)
            );
            writer.write_record([file, "model_mismatch", node.as_str(), "", "", detail.as_str()])?;
        }

        for missing in &findings.missing_properties {
            let node = format!("{} ({})", missing.node_label(), missing.node_type);
            let detail = format_list(&missing.safetensors_files);
            writer.write_record([
                file,
                "missing_properties",
                node.as_str(),
                "",
                "",
                detail.as_str(),
            ])?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AuditError::CsvSerialize {
            message: e.to_string(),
        })?;

    String::from_utf8(bytes).map_err(|e| AuditError::CsvSerialize {
        message: e.to_string(),
    })
}

/// The console line printed after the report
pub fn format_verdict(verdict: Verdict, use_colors: bool) -> String {
    match (verdict, use_colors) {
        (Verdict::Pass, true) => Green.bold().paint(SUCCESS_MESSAGE).to_string(),
        (Verdict::Pass, false) => SUCCESS_MESSAGE.to_string(),
        (Verdict::Fail, true) => Red.bold().paint(FAIL_MESSAGE).to_string(),
        (Verdict::Fail, false) => FAIL_MESSAGE.to_string(),
    }
}
