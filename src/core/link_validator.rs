//! Markdown link validation
//!
//! A link is consistent when its label names the same file as its URL. How
//! the file name is read from the URL depends on the host:
//!
//! - Civitai addresses models by numeric id, so its links are not checked.
//! - Hugging Face file URLs use `/resolve/<rev>/...` or `/blob/<rev>/...`;
//!   bare repository links address no file and are not checked.
//! - Any other host must end its path in the file name.

use crate::models::analysis::{MarkdownLink, MarkdownLinkError};
use regex::Regex;
use std::sync::OnceLock;

fn skip_hosts() -> &'static [Regex] {
    static ONCE: OnceLock<Vec<Regex>> = OnceLock::new();
    ONCE.get_or_init(|| vec![Regex::new(r"(?i)civitai\.com").expect("civitai pattern is valid")])
}

fn huggingface_host() -> &'static Regex {
    static ONCE: OnceLock<Regex> = OnceLock::new();
    ONCE.get_or_init(|| Regex::new(r"(?i)huggingface\.co").expect("huggingface pattern is valid"))
}

fn huggingface_file() -> &'static Regex {
    static ONCE: OnceLock<Regex> = OnceLock::new();
    ONCE.get_or_init(|| {
        Regex::new(r"/(?:resolve|blob)/[^/]+/(?:.+/)?([^/?]+\.safetensors)(?:[?]|$)")
            .expect("huggingface file pattern is valid")
    })
}

fn huggingface_file_segment() -> &'static Regex {
    static ONCE: OnceLock<Regex> = OnceLock::new();
    ONCE.get_or_init(|| Regex::new(r"/(?:resolve|blob)/").expect("segment pattern is valid"))
}

fn generic_file() -> &'static Regex {
    static ONCE: OnceLock<Regex> = OnceLock::new();
    ONCE.get_or_init(|| {
        Regex::new(r"/([^/?]+\.safetensors)(?:[?]|$)").expect("file pattern is valid")
    })
}

/// Why a link was not checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Host uses opaque ids instead of file names
    OpaqueHost,
    /// Hugging Face repository link without a file path
    RepositoryLink,
}

/// Outcome of validating one link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkVerdict {
    Skipped(SkipReason),
    Consistent,
    Inconsistent(MarkdownLinkError),
}

fn capture_file_name(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn is_url(text: &str) -> bool {
    text.starts_with("http://") || text.starts_with("https://")
}

/// Validate a single link
pub fn validate_link(link: &MarkdownLink) -> LinkVerdict {
    let text = link.text.as_str();
    let url = link.url.as_str();

    if skip_hosts().iter().any(|pattern| pattern.is_match(url)) {
        return LinkVerdict::Skipped(SkipReason::OpaqueHost);
    }

    let inconsistent = |url_name: Option<String>| {
        LinkVerdict::Inconsistent(MarkdownLinkError {
            text: link.text.clone(),
            url: link.url.clone(),
            url_name,
        })
    };

    if huggingface_host().is_match(url) {
        let Some(url_name) = capture_file_name(huggingface_file(), url) else {
            if !huggingface_file_segment().is_match(url) {
                return LinkVerdict::Skipped(SkipReason::RepositoryLink);
            }
            return inconsistent(None);
        };

        let consistent = if is_url(text) {
            match capture_file_name(huggingface_file(), text) {
                Some(text_name) => text_name == url_name,
                None => text == url,
            }
        } else {
            text == url_name
        };

        return if consistent {
            LinkVerdict::Consistent
        } else {
            inconsistent(Some(url_name))
        };
    }

    match capture_file_name(generic_file(), url) {
        Some(url_name) if url_name == text => LinkVerdict::Consistent,
        Some(url_name) => inconsistent(Some(url_name)),
        None => inconsistent(None),
    }
}

/// Validate links in order, returning only the inconsistent ones
pub fn validate_links(links: &[MarkdownLink]) -> Vec<MarkdownLinkError> {
    links
        .iter()
        .filter_map(|link| match validate_link(link) {
            LinkVerdict::Inconsistent(error) => Some(error),
            LinkVerdict::Skipped(reason) => {
                tracing::trace!(url = %link.url, ?reason, "link not checked");
                None
            }
            LinkVerdict::Consistent => None,
        })
        .collect()
}
