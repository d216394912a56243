//! Mock catalog implementation for testing.
//!
//! Provides [`MockCatalog`] for unit testing without filesystem access.

use std::sync::RwLock;

use crate::catalog::{CatalogError, CatalogErrorKind, DocCatalog, DocRecord};
use crate::index::CatalogIndex;
use crate::metadata::CategoryMetadata;
use crate::number_prefix::strip_number_prefix;

/// Mock catalog for testing.
///
/// Stores documents and category metadata in memory. Use the builder methods
/// to configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use sidebars_catalog::{DocCatalog, MockCatalog};
///
/// let catalog = MockCatalog::new()
///     .with_doc("intro.md", "Introduction")
///     .with_doc("guides/01-setup.md", "Setup");
///
/// let guides = catalog.docs_in_dir("guides").await?;
/// ```
#[derive(Debug, Default)]
pub struct MockCatalog {
    index: RwLock<CatalogIndex>,
    failing: RwLock<bool>,
}

impl MockCatalog {
    /// Create a new empty mock catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document from its source path and title.
    ///
    /// The id drops the extension and number prefixes of every segment, the
    /// position comes from the file number prefix, and the permalink is
    /// `/docs/<id>`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_doc(self, source: &str, title: impl Into<String>) -> Self {
        let without_ext = source.rsplit_once('.').map_or(source, |(stem, _)| stem);
        let mut position = None;
        let id = without_ext
            .split('/')
            .map(|segment| {
                let parsed = strip_number_prefix(segment);
                position = parsed.number.map(f64::from);
                parsed.name
            })
            .collect::<Vec<_>>()
            .join("/");
        let record = DocRecord {
            permalink: format!("/docs/{id}"),
            id,
            source: source.to_owned(),
            title: title.into(),
            position,
            sidebar_label: None,
            class_name: None,
            custom_props: None,
        };
        self.with_record(record)
    }

    /// Add a fully specified document record.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_record(self, record: DocRecord) -> Self {
        self.index.write().unwrap().insert_doc(record);
        self
    }

    /// Attach category metadata to a directory.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_category(self, dir: &str, metadata: CategoryMetadata) -> Self {
        self.index.write().unwrap().insert_category(dir, metadata);
        self
    }

    /// Make every lookup fail with an `Unavailable` error.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn failing(self) -> Self {
        *self.failing.write().unwrap() = true;
        self
    }

    fn check_available(&self) -> Result<(), CatalogError> {
        if *self.failing.read().unwrap() {
            return Err(CatalogError::new(CatalogErrorKind::Unavailable).with_backend("Mock"));
        }
        Ok(())
    }
}

impl DocCatalog for MockCatalog {
    async fn docs_in_dir(&self, dir: &str) -> Result<Vec<DocRecord>, CatalogError> {
        self.check_available()?;
        Ok(self.index.read().unwrap().docs_in_dir(dir))
    }

    async fn doc(&self, id: &str) -> Result<Option<DocRecord>, CatalogError> {
        self.check_available()?;
        Ok(self.index.read().unwrap().get(id).cloned())
    }

    async fn category_metadata(&self, dir: &str) -> Result<Option<CategoryMetadata>, CatalogError> {
        self.check_available()?;
        Ok(self.index.read().unwrap().category(dir).cloned())
    }
}
