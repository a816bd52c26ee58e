use super::common::{loader_template, note_template, Workspace};
use model_audit::{CorpusAggregator, FileAnalyzer, FileOutcome, WhitelistConfig};

fn audit(workspace: &Workspace) -> model_audit::AuditResults {
    CorpusAggregator::new(workspace.templates(), FileAnalyzer::default())
        .run()
        .unwrap()
}

#[test]
fn test_consistent_corpus_passes() {
    let workspace = Workspace::new();
    workspace
        .add_template("a.json", &loader_template("CheckpointLoaderSimple", &["a.safetensors"], &["a.safetensors"]))
        .add_template(
            "b.json",
            &note_template("Get [b.safetensors](https://huggingface.co/org/repo/resolve/main/b.safetensors?download=true)"),
        );

    let results = audit(&workspace);
    assert_eq!(results.statistics.total_files, 2);
    assert_eq!(results.statistics.markdown_link_errors, 0);
    assert_eq!(results.statistics.model_link_errors, 0);
    assert!(results.verdict().is_pass());
}

#[test]
fn test_widget_missing_from_properties() {
    let workspace = Workspace::new();
    workspace.add_template(
        "flow.json",
        &loader_template("CheckpointLoaderSimple", &["a.safetensors", "b.safetensors"], &["a.safetensors"]),
    );

    let results = audit(&workspace);
    let analysis = results.files[0].analysis().unwrap();
    let matched = &analysis.analysis.widgets_models_match[0];

    assert!(matched.matched.contains("a.safetensors"));
    assert!(matched.missing_in_properties.contains("b.safetensors"));
    assert!(matched.extra_in_properties.is_empty());
    assert_eq!(results.statistics.model_link_errors, 1);
    assert!(!results.verdict().is_pass());
}

#[test]
fn test_subgraph_nodes_are_exempt_and_counted_separately() {
    let workspace = Workspace::new();
    let subgraph = "a1b2c3d4-e5f6-7890-abcd-ef1234567890";
    workspace.add_template("flow.json", &loader_template(subgraph, &["orphan.safetensors"], &[]));

    let results = audit(&workspace);
    let stats = &results.statistics;
    assert_eq!(stats.model_link_errors, 0);
    assert_eq!(stats.subgraph_node_types.get(subgraph), Some(&1));
    assert!(stats.node_types.is_empty());
    assert!(stats.model_loader_types.is_empty());
    assert!(results.verdict().is_pass());
}

#[test]
fn test_note_nodes_are_exempt() {
    let workspace = Workspace::new();
    for (name, node_type) in [("a.json", "Note"), ("b.json", "MarkdownNote")] {
        workspace.add_template(name, &loader_template(node_type, &["mention.safetensors"], &[]));
    }

    let results = audit(&workspace);
    assert_eq!(results.statistics.model_link_errors, 0);
    assert_eq!(results.statistics.files_with_safetensors, 2);
}

#[test]
fn test_whitelist_file_exempts_node_types() {
    let workspace = Workspace::new();
    workspace.add_template("flow.json", &loader_template("LoadImageMask", &["mask.safetensors"], &[]));
    let whitelist_path = workspace.write_whitelist(&["LOADIMAGEMASK"]);

    let failing = audit(&workspace);
    assert_eq!(failing.statistics.model_link_errors, 1);

    let analyzer = FileAnalyzer::new(WhitelistConfig::load(&whitelist_path));
    let passing = CorpusAggregator::new(workspace.templates(), analyzer).run().unwrap();
    assert_eq!(passing.statistics.model_link_errors, 0);
    assert!(passing.verdict().is_pass());
}

#[test]
fn test_broken_whitelist_falls_back_to_empty() {
    let workspace = Workspace::new();
    let path = workspace.root().join("whitelist.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(WhitelistConfig::load(&path).is_empty());
    assert!(WhitelistConfig::load(&workspace.root().join("missing.json")).is_empty());
}

#[test]
fn test_civitai_links_are_never_errors() {
    let workspace = Workspace::new();
    workspace.add_template(
        "flow.json",
        &note_template("[anything.safetensors](https://civitai.com/api/download/models/12345)"),
    );
    assert_eq!(audit(&workspace).statistics.markdown_link_errors, 0);
}

#[test]
fn test_huggingface_mismatch_reports_url_name() {
    let workspace = Workspace::new();
    workspace.add_template(
        "flow.json",
        &note_template("[wrong.safetensors](https://huggingface.co/org/repo/resolve/main/right.safetensors)"),
    );

    let results = audit(&workspace);
    let errors = &results.files[0].analysis().unwrap().analysis.markdown_link_errors;
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].text, "wrong.safetensors");
    assert_eq!(errors[0].url_name.as_deref(), Some("right.safetensors"));
    assert_eq!(results.statistics.markdown_link_errors, 1);
}

#[test]
fn test_parenthesised_urls_are_extracted_whole() {
    let workspace = Workspace::new();
    workspace.add_template(
        "flow.json",
        &note_template("See [v2(a).safetensors](https://host/path/v2(a).safetensors) for details."),
    );

    let results = audit(&workspace);
    let analysis = results.files[0].analysis().unwrap();
    assert_eq!(analysis.markdown_links.len(), 1);
    assert_eq!(analysis.markdown_links[0].url, "https://host/path/v2(a).safetensors");
    assert!(analysis.analysis.markdown_link_errors.is_empty());
}

#[test]
fn test_links_anywhere_in_the_document_are_checked() {
    let workspace = Workspace::new();
    workspace.add_template(
        "flow.json",
        r#"{"nodes": [], "extra": {"notes": {"deep": ["[a.safetensors](https://host/b.safetensors)"]}}}"#,
    );
    assert_eq!(audit(&workspace).statistics.markdown_link_errors, 1);
}

#[test]
fn test_parse_errors_are_recorded_and_fail_the_run() {
    let workspace = Workspace::new();
    workspace
        .add_template("bad.json", "{\"nodes\": [")
        .add_template("good.json", &loader_template("VAELoader", &["ae.safetensors"], &["ae.safetensors"]));

    let results = audit(&workspace);
    assert_eq!(results.statistics.files_with_errors, vec!["bad.json".to_string()]);
    assert!(matches!(results.files[0], FileOutcome::ParseError { .. }));
    assert!(results.files[1].analysis().is_some());
    assert_eq!(results.verdict().exit_code(), 1);
}

#[test]
fn test_index_files_and_other_extensions_are_skipped() {
    let workspace = Workspace::new();
    workspace
        .add_template("index.json", "{ broken")
        .add_template("index.zh.json", "{ broken")
        .add_template("readme.md", "[a.safetensors](https://host/b.safetensors)")
        .add_template("flow.json", r#"{"nodes": []}"#);

    let results = audit(&workspace);
    assert_eq!(results.statistics.total_files, 1);
    assert!(results.verdict().is_pass());
}

#[test]
fn test_runs_are_idempotent_and_order_independent() {
    let workspace = Workspace::new();
    for i in 0..20 {
        let declared: Vec<String> = if i % 3 == 0 { vec![] } else { vec![format!("m{}.safetensors", i)] };
        let declared: Vec<&str> = declared.iter().map(String::as_str).collect();
        let widget = format!("m{}.safetensors", i);
        workspace.add_template(&format!("t{:02}.json", i), &loader_template("UNETLoader", &[widget.as_str()], &declared));
    }

    let first = audit(&workspace);
    let second = audit(&workspace);
    let parallel = CorpusAggregator::new(workspace.templates(), FileAnalyzer::default())
        .with_parallel(true)
        .run()
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first, parallel);
    assert_eq!(first.statistics.model_link_errors, 7);
}

#[test]
fn test_missing_templates_directory_is_fatal() {
    let workspace = Workspace::new();
    let err = CorpusAggregator::new(workspace.root().join("nope"), FileAnalyzer::default())
        .run()
        .unwrap_err();
    assert!(err.is_critical());
    assert_eq!(err.exit_code(), 2);
}
