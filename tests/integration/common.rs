use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary workspace with a `templates/` directory
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("templates")).unwrap();
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn templates(&self) -> PathBuf {
        self.root().join("templates")
    }

    pub fn add_template(&self, name: &str, content: &str) -> &Self {
        fs::write(self.templates().join(name), content).unwrap();
        self
    }

    pub fn write_whitelist(&self, node_types: &[&str]) -> PathBuf {
        let path = self.root().join("whitelist.json");
        let content = serde_json::json!({
            "whitelist": {"model_check_ignore_node_types": node_types}
        });
        fs::write(&path, content.to_string()).unwrap();
        path
    }
}

/// A loader node whose widgets and declared models are given explicitly
pub fn loader_template(node_type: &str, widgets: &[&str], declared: &[&str]) -> String {
    let models: Vec<serde_json::Value> = declared
        .iter()
        .map(|name| serde_json::json!({"name": name, "url": format!("https://host/{}", name), "directory": "checkpoints"}))
        .collect();
    serde_json::json!({
        "nodes": [{
            "id": 1,
            "type": node_type,
            "widgets_values": widgets,
            "properties": {"models": models}
        }]
    })
    .to_string()
}

/// A template holding only a markdown note
pub fn note_template(markdown: &str) -> String {
    serde_json::json!({
        "nodes": [{"id": 7, "type": "MarkdownNote", "widgets_values": [markdown]}]
    })
    .to_string()
}
