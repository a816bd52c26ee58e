//! Markdown link extraction
//!
//! Finds `[name.safetensors](url)` references anywhere in a JSON document.
//! URLs may legitimately contain parentheses (`model(v2).safetensors`), so the
//! target is recovered with a depth-counting scan instead of a pattern.

use crate::models::analysis::MarkdownLink;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// `[label ending in .safetensors](` with a non-greedy label
fn link_start() -> &'static Regex {
    static ONCE: OnceLock<Regex> = OnceLock::new();
    ONCE.get_or_init(|| {
        Regex::new(r"\[([^\]]+?\.safetensors)\]\(").expect("link start pattern is valid")
    })
}

/// Recover a link target starting just after its opening parenthesis
///
/// Returns the URL and the byte position where scanning stopped. A closing
/// parenthesis that balances the opening one is consumed; whitespace at the
/// outermost level ends an unterminated link without being consumed. A
/// backslash escapes the next character.
pub fn scan_balanced_url(text: &str, start: usize) -> (&str, usize) {
    let mut depth = 1usize;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }

        let pos = start + offset;
        match ch {
            '\\' => escaped = true,
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return (&text[start..pos], pos + ch.len_utf8());
                }
            }
            c if c.is_whitespace() && depth == 1 => return (&text[start..pos], pos),
            _ => {}
        }
    }

    (&text[start..], text.len())
}

/// Extract every model link from a single string, in order of appearance
///
/// Matching resumes right after each link opener, so a link nested inside
/// another link's scanned target is reported too.
pub fn extract_from_str(text: &str, links: &mut Vec<MarkdownLink>) {
    let pattern = link_start();
    let mut cursor = 0;

    while let Some(caps) = pattern.captures_at(text, cursor) {
        let (Some(whole), Some(label)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let (url, _) = scan_balanced_url(text, whole.end());
        links.push(MarkdownLink::new(label.as_str(), url));
        cursor = whole.end();
    }
}

/// Walk a JSON value and collect model links from every string in it
///
/// Order follows the document: object values in key order, array elements in
/// sequence, then position within each string.
pub fn extract_markdown_links(value: &Value) -> Vec<MarkdownLink> {
    let mut links = Vec::new();
    collect(value, &mut links);
    links
}

fn collect(value: &Value, links: &mut Vec<MarkdownLink>) {
    match value {
        Value::Object(map) => map.values().for_each(|v| collect(v, links)),
        Value::Array(items) => items.iter().for_each(|v| collect(v, links)),
        Value::String(text) => extract_from_str(text, links),
        _ => {}
    }
}
