use super::common::{loader_template, Workspace};
use clap::Parser;
use model_audit::cli::{Args, Command};
use model_audit::models::config::OutputFormat;
use std::path::{Path, PathBuf};

fn audit_args(workspace: &Workspace, extra: &[&str]) -> Args {
    audit_args_for(workspace, &workspace.templates(), extra)
}

fn audit_args_for(workspace: &Workspace, templates: &Path, extra: &[&str]) -> Args {
    let templates = templates.display().to_string();
    let whitelist = workspace.root().join("whitelist.json").display().to_string();
    let report = workspace.root().join("report.md").display().to_string();
    let save = workspace.root().join("models.json").display().to_string();

    let mut argv = vec![
        "model-audit",
        "--templates-dir",
        templates.as_str(),
        "--whitelist",
        whitelist.as_str(),
        "--report",
        report.as_str(),
        "--save",
        save.as_str(),
        "--quiet",
        "--no-colors",
    ];
    argv.extend_from_slice(extra);
    Args::parse_from(argv)
}

#[test]
fn test_cli_args_parsing() {
    let args = Args::parse_from([
        "model-audit",
        "--templates-dir",
        "./flows",
        "--format",
        "json",
        "--exclude",
        "index.*",
        "--no-progress",
        "--verbose",
    ]);

    assert_eq!(args.templates_dir, Some(PathBuf::from("./flows")));
    assert_eq!(args.format, Some(OutputFormat::Json));
    assert_eq!(args.exclude, vec!["index.*".to_string()]);
    assert!(args.no_progress);
    assert!(args.verbose);
    assert!(!args.quiet);
}

#[test]
fn test_cli_config_option() {
    let args = Args::parse_from(["model-audit", "--config", "custom-config.toml"]);
    assert_eq!(args.config, Some(PathBuf::from("custom-config.toml")));
}

#[test]
fn test_exit_code_zero_when_all_checks_pass() {
    let workspace = Workspace::new();
    workspace.add_template("a.json", &loader_template("VAELoader", &["ae.safetensors"], &["ae.safetensors"]));

    let code = Command::from_args(audit_args(&workspace, &[])).run();
    assert_eq!(code, 0);
    assert!(workspace.root().join("report.md").is_file());
    assert!(workspace.root().join("models.json").is_file());
}

#[test]
fn test_exit_code_one_on_findings() {
    let workspace = Workspace::new();
    workspace.add_template("a.json", &loader_template("VAELoader", &["ae.safetensors"], &[]));

    assert_eq!(Command::from_args(audit_args(&workspace, &[])).run(), 1);
    assert_eq!(Command::from_args(audit_args(&workspace, &["--parallel"])).run(), 1);
}

#[test]
fn test_exit_code_two_when_templates_dir_is_missing() {
    let workspace = Workspace::new();
    let missing = workspace.root().join("nope");

    let code = Command::from_args(audit_args_for(&workspace, &missing, &[])).run();
    assert_eq!(code, 2);
}

#[test]
fn test_exit_code_two_when_config_file_is_missing() {
    let workspace = Workspace::new();
    let code = Command::from_args(audit_args(&workspace, &["--config", "/nonexistent/model-audit.toml"])).run();
    assert_eq!(code, 2);
}
