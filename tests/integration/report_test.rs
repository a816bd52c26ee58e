use super::common::{loader_template, note_template, Workspace};
use model_audit::cli::run_audit;
use model_audit::models::config::OutputFormat;
use model_audit::Settings;
use std::fs;

fn settings_for(workspace: &Workspace) -> Settings {
    Settings {
        templates_dir: workspace.templates(),
        whitelist_path: workspace.root().join("whitelist.json"),
        report_path: workspace.root().join("report.md"),
        save_path: workspace.root().join("models.json"),
        quiet: true,
        show_progress: false,
        use_colors: false,
        ..Settings::default()
    }
}

fn mixed_corpus() -> Workspace {
    let workspace = Workspace::new();
    workspace
        .add_template("a.json", &loader_template("CheckpointLoaderSimple", &["a.safetensors", "b.safetensors"], &["a.safetensors"]))
        .add_template("b.json", &loader_template("LoraLoader", &["lora.safetensors"], &[]))
        .add_template("c.json", &note_template("[x.safetensors](https://host/y.safetensors)"))
        .add_template("d.json", &loader_template("a1b2c3d4-e5f6-7890-abcd-ef1234567890", &["s.safetensors"], &[]))
        .add_template("e.json", "not json at all");
    workspace
}

#[test]
fn test_markdown_report_file() {
    let workspace = mixed_corpus();
    let settings = settings_for(&workspace);

    let results = run_audit(&settings).unwrap();
    assert!(!results.verdict().is_pass());

    let report = fs::read_to_string(&settings.report_path).unwrap();
    let expected_summary = "# ComfyUI Template Model Analysis Report\n\n## Summary\n\
        - Total files analyzed: 5\n\
        - Files with .safetensors: 4\n\
        - Files with properties.models: 3\n\
        - Unique .safetensors files found: 5\n\
        - Files with parse errors: 1\n\
        - Markdown safetensors link errors: 1\n\
        - Model link errors: 2\n";
    assert!(report.starts_with(expected_summary), "{}", report);

    assert!(report.contains(
        "\n## Subgraph Node Types with .safetensors (skipped from model validation)\n- a1b2c3d4-e5f6-7890-abcd-ef1234567890: 1\n"
    ));
    assert!(report.contains("\n### a.json - Node 1 (CheckpointLoaderSimple) model link mismatch:\n  - In widgets_values but missing in properties.models: [b.safetensors]"));
    assert!(report.contains("\n### b.json - Node 1 (LoraLoader) missing properties.models for: [lora.safetensors]"));
    assert!(report.contains("\n### c.json - Markdown safetensors link errors:\n  - Text: x.safetensors | URL: https://host/y.safetensors | URL filename: y.safetensors"));
    assert!(report.contains("\n### e.json - ERROR: "));
}

#[test]
fn test_report_is_byte_identical_across_runs() {
    let workspace = mixed_corpus();
    let settings = settings_for(&workspace);

    run_audit(&settings).unwrap();
    let first_report = fs::read(&settings.report_path).unwrap();
    let first_manifest = fs::read(&settings.save_path).unwrap();

    let parallel = Settings {
        parallel: true,
        ..settings.clone()
    };
    run_audit(&parallel).unwrap();
    assert_eq!(fs::read(&settings.report_path).unwrap(), first_report);
    assert_eq!(fs::read(&settings.save_path).unwrap(), first_manifest);
}

#[test]
fn test_model_manifest_file() {
    let workspace = mixed_corpus();
    let settings = settings_for(&workspace);
    run_audit(&settings).unwrap();

    let text = fs::read_to_string(&settings.save_path).unwrap();
    assert!(text.starts_with("{\n    \"a.safetensors\": {\n        \"name\": \"a.safetensors\","));

    let manifest: serde_json::Value = serde_json::from_str(&text).unwrap();
    let object = manifest.as_object().unwrap();
    assert_eq!(object.len(), 1);
    assert_eq!(manifest["a.safetensors"]["url"], "https://host/a.safetensors");
    assert_eq!(manifest["a.safetensors"]["directory"], "checkpoints");
}

#[test]
fn test_json_and_csv_formats() {
    let workspace = mixed_corpus();

    let json_settings = Settings {
        output_format: OutputFormat::Json,
        ..settings_for(&workspace)
    };
    run_audit(&json_settings).unwrap();
    let parsed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_settings.report_path).unwrap()).unwrap();
    assert_eq!(parsed["statistics"]["total_files"], 5);
    assert_eq!(parsed["files"].as_array().unwrap().len(), 5);

    let csv_settings = Settings {
        output_format: OutputFormat::Csv,
        ..settings_for(&workspace)
    };
    run_audit(&csv_settings).unwrap();
    let csv = fs::read_to_string(&csv_settings.report_path).unwrap();
    // header, one mismatch, one missing properties, one link error, one parse error
    assert_eq!(csv.lines().count(), 5);
}

#[test]
fn test_unwritable_report_path_is_critical() {
    let workspace = mixed_corpus();
    let settings = Settings {
        report_path: workspace.root().join("missing-dir").join("report.md"),
        ..settings_for(&workspace)
    };
    let err = run_audit(&settings).unwrap_err();
    assert!(err.is_critical());
}
