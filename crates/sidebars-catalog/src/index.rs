//! In-memory catalog index.
//!
//! Backends that load their documents up front ([`FsCatalog`](crate::FsCatalog),
//! [`MockCatalog`](crate::MockCatalog)) answer lookups from a [`CatalogIndex`].

use std::collections::HashMap;

use crate::catalog::{DocRecord, normalize_dir};
use crate::metadata::CategoryMetadata;

/// Documents and category metadata with O(1) id and directory lookups.
#[derive(Debug, Default)]
pub struct CatalogIndex {
    docs: Vec<DocRecord>,
    id_index: HashMap<String, usize>,
    categories: HashMap<String, CategoryMetadata>,
}

impl CatalogIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document.
    ///
    /// Documents are kept sorted by source path. A later document with an
    /// already indexed id replaces the earlier one.
    pub fn insert_doc(&mut self, doc: DocRecord) {
        if let Some(&idx) = self.id_index.get(&doc.id) {
            tracing::warn!(id = %doc.id, source = %doc.source, "Duplicate document id, replacing");
            self.docs.remove(idx);
        }
        let pos = self
            .docs
            .partition_point(|existing| existing.source < doc.source);
        self.docs.insert(pos, doc);
        self.reindex();
    }

    /// Attach category metadata to a directory.
    pub fn insert_category(&mut self, dir: &str, metadata: CategoryMetadata) {
        self.categories
            .insert(normalize_dir(dir).to_owned(), metadata);
    }

    /// All documents, in source path order.
    #[must_use]
    pub fn docs(&self) -> &[DocRecord] {
        &self.docs
    }

    /// Number of indexed documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Check if the index holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Look up a document by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&DocRecord> {
        self.id_index.get(id).map(|&i| &self.docs[i])
    }

    /// Documents under `dir`, recursively, in source path order.
    #[must_use]
    pub fn docs_in_dir(&self, dir: &str) -> Vec<DocRecord> {
        self.docs
            .iter()
            .filter(|doc| doc.is_under(dir))
            .cloned()
            .collect()
    }

    /// Category metadata for `dir`.
    #[must_use]
    pub fn category(&self, dir: &str) -> Option<&CategoryMetadata> {
        self.categories.get(normalize_dir(dir))
    }

    fn reindex(&mut self) {
        self.id_index = self
            .docs
            .iter()
            .enumerate()
            .map(|(i, doc)| (doc.id.clone(), i))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, source: &str) -> DocRecord {
        DocRecord {
            id: id.to_owned(),
            source: source.to_owned(),
            title: id.to_owned(),
            permalink: format!("/docs/{id}"),
            position: None,
            sidebar_label: None,
            class_name: None,
            custom_props: None,
        }
    }

    #[test]
    fn test_empty_index() {
        let index = CatalogIndex::new();

        assert!(index.is_empty());
        assert!(index.get("intro").is_none());
        assert!(index.docs_in_dir(".").is_empty());
    }

    #[test]
    fn test_docs_sorted_by_source() {
        let mut index = CatalogIndex::new();
        index.insert_doc(record("b", "b.md"));
        index.insert_doc(record("a", "a.md"));
        index.insert_doc(record("guides/x", "guides/x.md"));

        let sources: Vec<_> = index.docs().iter().map(|d| d.source.as_str()).collect();
        assert_eq!(sources, vec!["a.md", "b.md", "guides/x.md"]);
        assert_eq!(index.get("b").unwrap().source, "b.md");
    }

    #[test]
    fn test_docs_in_dir_recursive() {
        let mut index = CatalogIndex::new();
        index.insert_doc(record("intro", "intro.md"));
        index.insert_doc(record("guides/a", "guides/a.md"));
        index.insert_doc(record("guides/deep/b", "guides/deep/b.md"));
        index.insert_doc(record("guidesx/c", "guidesx/c.md"));

        let ids: Vec<_> = index
            .docs_in_dir("guides")
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec!["guides/a", "guides/deep/b"]);
        assert_eq!(index.docs_in_dir(".").len(), 4);
    }

    #[test]
    fn test_duplicate_id_replaces() {
        let mut index = CatalogIndex::new();
        index.insert_doc(record("intro", "intro.md"));
        index.insert_doc(record("intro", "01-intro.md"));

        assert_eq!(index.len(), 1);
        assert_eq!(index.get("intro").unwrap().source, "01-intro.md");
    }

    #[test]
    fn test_category_lookup_normalizes_dir() {
        let mut index = CatalogIndex::new();
        index.insert_category(
            "./guides/",
            CategoryMetadata {
                label: Some("Guides".to_owned()),
                ..Default::default()
            },
        );

        assert_eq!(
            index.category("guides").and_then(|m| m.label.as_deref()),
            Some("Guides")
        );
        assert!(index.category("api").is_none());
    }
}
