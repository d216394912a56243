//! Catalog trait and error types.
//!
//! Provides the core [`DocCatalog`] trait for looking up documents by id and by
//! source directory, along with [`CatalogError`] for unified error handling
//! across backends.
//!
//! # Directory Convention
//!
//! All directory parameters are paths relative to the docs root, using `/` as
//! separator:
//! - `"."` - the docs root itself
//! - `"guides"` - a top-level directory
//! - `"guides/advanced"` - a nested directory
//!
//! A leading `./` and trailing `/` are ignored.

use std::future::Future;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::metadata::CategoryMetadata;

/// Document record returned by catalog lookups.
///
/// # Path Convention
///
/// `source` is the path of the markdown file relative to the docs root
/// (e.g., `"guides/01-setup.md"`), while `id` is the number-prefix-free
/// identifier sidebars reference (e.g., `"guides/setup"`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocRecord {
    /// Document id referenced by sidebar items.
    pub id: String,
    /// Source file path relative to the docs root.
    pub source: String,
    /// Document title (resolved: front matter > H1 > filename).
    pub title: String,
    /// Absolute URL of the rendered page.
    pub permalink: String,
    /// Sidebar position (front matter `sidebar_position` > filename number prefix).
    pub position: Option<f64>,
    /// Label override from front matter `sidebar_label`.
    pub sidebar_label: Option<String>,
    /// CSS class from front matter `sidebar_class_name`.
    pub class_name: Option<String>,
    /// Arbitrary props from front matter `sidebar_custom_props`.
    pub custom_props: Option<serde_json::Value>,
}

impl DocRecord {
    /// Directory containing the source file, `"."` for the docs root.
    #[must_use]
    pub fn source_dir(&self) -> &str {
        self.source.rsplit_once('/').map_or(".", |(dir, _)| dir)
    }

    /// File name of the source file (e.g., `"01-setup.md"`).
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.source.rsplit_once('/').map_or(&self.source, |(_, name)| name)
    }

    /// File name without extension (e.g., `"01-setup"`).
    #[must_use]
    pub fn file_stem(&self) -> &str {
        let name = self.file_name();
        name.rsplit_once('.').map_or(name, |(stem, _)| stem)
    }

    /// Check whether the document lives in `dir` or any of its subdirectories.
    #[must_use]
    pub fn is_under(&self, dir: &str) -> bool {
        let dir = normalize_dir(dir);
        if dir == "." {
            return true;
        }
        let source_dir = self.source_dir();
        source_dir == dir
            || source_dir
                .strip_prefix(dir)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// Normalize a directory parameter to the catalog convention.
pub(crate) fn normalize_dir(dir: &str) -> &str {
    let dir = dir.strip_prefix("./").unwrap_or(dir).trim_end_matches('/');
    if dir.is_empty() { "." } else { dir }
}

/// What went wrong while building or querying a catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogErrorKind {
    /// A file or directory under the docs root disappeared during the scan.
    NotFound,
    /// A file or directory under the docs root cannot be read.
    PermissionDenied,
    /// Front matter or `_category_` metadata is malformed.
    InvalidContent,
    /// The backend cannot answer lookups right now.
    Unavailable,
    /// Any other read failure.
    Io,
}

impl CatalogErrorKind {
    fn describe(self) -> &'static str {
        match self {
            Self::NotFound => "missing file",
            Self::PermissionDenied => "permission denied",
            Self::InvalidContent => "invalid content",
            Self::Unavailable => "catalog unavailable",
            Self::Io => "read failed",
        }
    }
}

/// Whether loading the sidebars again can succeed without changing the docs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ErrorStatus {
    /// The docs tree has to be fixed first.
    #[default]
    Permanent,
    /// The backend was briefly unable to answer.
    Temporary,
}

/// Catalog failure with the offending file and backend attached.
///
/// Displayed as `[Backend] kind in path: source`, each part optional except
/// the kind.
#[derive(Debug)]
pub struct CatalogError {
    /// Failure category.
    pub kind: CatalogErrorKind,
    /// Retry guidance, derived from the kind.
    pub status: ErrorStatus,
    /// File or directory the failure relates to.
    pub path: Option<PathBuf>,
    /// Backend identifier (`"Fs"`, `"Mock"`).
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CatalogError {
    /// Create an error of the given kind.
    #[must_use]
    pub fn new(kind: CatalogErrorKind) -> Self {
        let status = match kind {
            CatalogErrorKind::Unavailable => ErrorStatus::Temporary,
            _ => ErrorStatus::Permanent,
        };
        Self {
            kind,
            status,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Failure reading `path` while scanning the docs tree.
    pub(crate) fn read(path: &Path, err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => CatalogErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => CatalogErrorKind::PermissionDenied,
            std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted => {
                CatalogErrorKind::Unavailable
            }
            _ => CatalogErrorKind::Io,
        };
        Self::new(kind).with_path(path).with_source(err)
    }

    /// Malformed front matter or category metadata in `path`.
    pub(crate) fn invalid_content(
        path: &Path,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::new(CatalogErrorKind::InvalidContent)
            .with_path(path)
            .with_source(source)
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Check whether retrying the load can succeed.
    #[must_use]
    pub fn is_temporary(&self) -> bool {
        self.status == ErrorStatus::Temporary
    }
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }
        f.write_str(self.kind.describe())?;
        if let Some(path) = &self.path {
            write!(f, " in {}", path.display())?;
        }
        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        Ok(())
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Read-only document catalog consulted during sidebar processing.
///
/// Lookups are async so that backends can serve them from cached reads or
/// remote indexes. The catalog is never mutated by sidebar processing.
pub trait DocCatalog: Send + Sync {
    /// Return every document whose source lives in `dir`, recursively.
    ///
    /// Documents are returned in source path order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the backend cannot answer the lookup.
    fn docs_in_dir(
        &self,
        dir: &str,
    ) -> impl Future<Output = Result<Vec<DocRecord>, CatalogError>> + Send;

    /// Look up a document by id.
    ///
    /// Returns `Ok(None)` when no document has this id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the backend cannot answer the lookup.
    fn doc(&self, id: &str) -> impl Future<Output = Result<Option<DocRecord>, CatalogError>> + Send;

    /// Read category metadata (`_category_.yml` and friends) for a directory.
    ///
    /// Returns `Ok(None)` when the directory carries no metadata.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the backend cannot answer the lookup.
    fn category_metadata(
        &self,
        dir: &str,
    ) -> impl Future<Output = Result<Option<CategoryMetadata>, CatalogError>> + Send;
}
