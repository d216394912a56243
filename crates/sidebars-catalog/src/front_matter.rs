//! YAML front matter parsing for markdown documents.
//!
//! Provides functions for splitting a markdown file into its front matter
//! block and body, and for reading the sidebar-related front matter fields.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

/// First H1 heading in the document body.
static H1_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#\s+(.+)$").unwrap());

/// Error type for front matter parsing.
#[derive(Debug, thiserror::Error)]
pub enum FrontMatterError {
    /// The front matter block is not valid YAML.
    #[error("Invalid front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The opening `---` has no matching closing delimiter.
    #[error("Unterminated front matter block")]
    Unterminated,
}

/// Sidebar-related front matter fields.
///
/// Unknown fields are ignored: front matter is shared with other consumers.
#[derive(Debug, Default, PartialEq, Deserialize)]
pub(crate) struct FrontMatter {
    pub id: Option<String>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub sidebar_label: Option<String>,
    pub sidebar_position: Option<f64>,
    pub sidebar_class_name: Option<String>,
    pub sidebar_custom_props: Option<serde_json::Value>,
}

/// Split markdown content into parsed front matter and body.
///
/// Content without a leading `---` line has empty front matter.
pub(crate) fn parse_front_matter(content: &str) -> Result<(FrontMatter, &str), FrontMatterError> {
    let Some(after_open) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return Ok((FrontMatter::default(), content));
    };

    let (yaml, body) = if let Some(rest) = after_open.strip_prefix("---") {
        ("", rest)
    } else {
        let close = after_open
            .find("\n---")
            .ok_or(FrontMatterError::Unterminated)?;
        (&after_open[..close], &after_open[close + 4..])
    };
    let body = body.split_once('\n').map_or("", |(_, rest)| rest);

    if yaml.trim().is_empty() {
        return Ok((FrontMatter::default(), body));
    }
    Ok((serde_yaml::from_str(yaml)?, body))
}

/// Extract the text of the first H1 heading.
pub(crate) fn extract_h1(body: &str) -> Option<String> {
    let caps = H1_RE.captures(body)?;
    Some(caps[1].trim().to_owned())
}
