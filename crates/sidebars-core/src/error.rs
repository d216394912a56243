//! Error types for the sidebars pipeline.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use sidebars_catalog::CatalogError;

/// Sidebars config does not match the expected shape.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Invalid sidebar '{sidebar}' at {location}: {message}")]
pub struct ValidationError {
    /// Sidebar name.
    pub sidebar: String,
    /// Path of the offending value (e.g., `docs[0].items[2]`).
    pub location: String,
    /// What is wrong.
    pub message: String,
}

/// Item is structurally inconsistent after shorthand expansion.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NormalizationError {
    /// Category has neither inline items nor an autogenerated source.
    #[error("Category '{label}' in sidebar '{sidebar}' has no items")]
    MissingItems {
        /// Sidebar name.
        sidebar: String,
        /// Category label.
        label: String,
    },
    /// Item could not be converted to its typed form.
    #[error("Invalid item in sidebar '{sidebar}' at {location}: {message}")]
    InvalidItem {
        /// Sidebar name.
        sidebar: String,
        /// Path of the offending item.
        location: String,
        /// What is wrong.
        message: String,
    },
}

/// Sidebar item referencing a document missing from the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokenReference {
    /// Sidebar name.
    pub sidebar: String,
    /// Referenced document id.
    pub doc_id: String,
    /// Labels of the enclosing categories, outermost first.
    pub location: Vec<String>,
}

impl fmt::Display for BrokenReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sidebar '{}'", self.sidebar)?;
        if !self.location.is_empty() {
            write!(f, " > {}", self.location.join(" > "))?;
        }
        write!(f, ": unknown document '{}'", self.doc_id)
    }
}

/// Error returned by the sidebars pipeline.
#[derive(Debug, thiserror::Error)]
pub enum SidebarsError {
    /// Sidebars file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// Sidebars file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Sidebars file content is not valid for its format.
    #[error("Failed to parse {}: {message}", path.display())]
    Parse {
        /// Sidebars file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
    /// Sidebars file extension is not json, yaml, yml or toml.
    #[error("Unsupported sidebars file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    /// Sidebars config failed validation.
    #[error("{origin}: {source}")]
    InvalidConfig {
        /// Where the config came from (file path or built-in constant).
        origin: String,
        /// Validation failure.
        #[source]
        source: ValidationError,
    },
    /// Sidebars config failed normalization.
    #[error("{origin}: {source}")]
    Normalization {
        /// Where the config came from (file path or built-in constant).
        origin: String,
        /// Normalization failure.
        #[source]
        source: NormalizationError,
    },
    /// Catalog lookup failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    /// Broken references with `throw` severity.
    #[error("{} broken document reference(s):\n{}", .0.len(), format_references(.0))]
    BrokenReferences(Vec<BrokenReference>),
}

fn format_references(references: &[BrokenReference]) -> String {
    references
        .iter()
        .map(|r| format!("  - {r}"))
        .collect::<Vec<_>>()
        .join("\n")
}
