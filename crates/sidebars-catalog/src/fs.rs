//! Filesystem catalog implementation.
//!
//! [`FsCatalog`] walks a docs directory once and answers lookups from memory:
//!
//! - `.md` / `.mdx` files become documents
//! - `_category_.json`, `_category_.yml`, `_category_.yaml` become category metadata
//! - Hidden (`.`) and partial (`_`) files and directories are skipped
//!
//! Document ids drop number prefixes from every path segment, so
//! `guides/01-setup.md` gets the id `guides/setup`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::{CatalogError, DocCatalog, DocRecord};
use crate::front_matter::{extract_h1, parse_front_matter};
use crate::index::CatalogIndex;
use crate::metadata::CategoryMetadata;
use crate::number_prefix::strip_number_prefix;

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Category metadata file names, in lookup order.
const CATEGORY_FILES: [&str; 3] = ["_category_.json", "_category_.yml", "_category_.yaml"];

/// Filesystem-backed document catalog.
///
/// The directory is scanned when the catalog is opened; later edits require
/// opening a new catalog. Sidebar loading rebuilds everything on change, so
/// this matches how the catalog is consumed.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use sidebars_catalog::{DocCatalog, FsCatalog};
///
/// let catalog = FsCatalog::open(PathBuf::from("docs"), "/docs")?;
/// let intro = catalog.doc("intro").await?;
/// ```
#[derive(Debug)]
pub struct FsCatalog {
    source_dir: PathBuf,
    index: CatalogIndex,
}

impl FsCatalog {
    /// Scan `source_dir` and build the catalog.
    ///
    /// A missing directory yields an empty catalog.
    ///
    /// # Arguments
    ///
    /// * `source_dir` - Root directory containing markdown files
    /// * `route_base` - URL prefix for permalinks (e.g., `/docs`, `/docs/1.0`)
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if a file cannot be read or its front matter
    /// or category metadata cannot be parsed.
    pub fn open(source_dir: PathBuf, route_base: &str) -> Result<Self, CatalogError> {
        let mut index = CatalogIndex::new();
        if source_dir.exists() {
            let mut scanner = Scanner {
                route_base,
                index: &mut index,
            };
            scanner.scan_directory(&source_dir, "", "")?;
        }
        tracing::debug!(
            source_dir = %source_dir.display(),
            doc_count = index.len(),
            "Catalog scanned"
        );
        Ok(Self { source_dir, index })
    }

    /// Root directory the catalog was scanned from.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Underlying in-memory index.
    #[must_use]
    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }
}

impl DocCatalog for FsCatalog {
    async fn docs_in_dir(&self, dir: &str) -> Result<Vec<DocRecord>, CatalogError> {
        Ok(self.index.docs_in_dir(dir))
    }

    async fn doc(&self, id: &str) -> Result<Option<DocRecord>, CatalogError> {
        Ok(self.index.get(id).cloned())
    }

    async fn category_metadata(&self, dir: &str) -> Result<Option<CategoryMetadata>, CatalogError> {
        Ok(self.index.category(dir).cloned())
    }
}

/// Recursive directory walker filling a [`CatalogIndex`].
struct Scanner<'a> {
    route_base: &'a str,
    index: &'a mut CatalogIndex,
}

impl Scanner<'_> {
    /// Scan one directory level and recurse into subdirectories.
    ///
    /// `rel_dir` is the directory path relative to the root as written on
    /// disk, `id_dir` the same path with number prefixes stripped. Both are
    /// empty for the root.
    fn scan_directory(
        &mut self,
        dir_path: &Path,
        rel_dir: &str,
        id_dir: &str,
    ) -> Result<(), CatalogError> {
        let entries = fs::read_dir(dir_path)
            .map_err(|e| CatalogError::read(dir_path, e).with_backend(BACKEND))?;

        // Sort for a deterministic source order across platforms
        let mut entries: Vec<_> = entries
            .filter_map(Result::ok)
            .map(|e| {
                let is_dir = e.file_type().is_ok_and(|t| t.is_dir());
                let name = e.file_name().to_string_lossy().into_owned();
                (e.path(), is_dir, name)
            })
            .collect();
        entries.sort_by(|a, b| a.2.cmp(&b.2));

        for (path, is_dir, name) in &entries {
            if !is_dir && CATEGORY_FILES.contains(&name.as_str()) {
                self.load_category(path, rel_dir)?;
                continue;
            }

            // Skip hidden and partial files/dirs
            if name.starts_with('.') || name.starts_with('_') {
                continue;
            }

            if *is_dir {
                let stripped = strip_number_prefix(name).name;
                let child_rel = join_rel(rel_dir, name);
                let child_id = join_rel(id_dir, stripped);
                self.scan_directory(path, &child_rel, &child_id)?;
            } else if path
                .extension()
                .is_some_and(|e| e == "md" || e == "mdx")
            {
                let doc = self.build_doc(path, rel_dir, id_dir, name)?;
                self.index.insert_doc(doc);
            }
        }
        Ok(())
    }

    /// Read a markdown file into a [`DocRecord`].
    fn build_doc(
        &self,
        path: &Path,
        rel_dir: &str,
        id_dir: &str,
        file_name: &str,
    ) -> Result<DocRecord, CatalogError> {
        let content = fs::read_to_string(path)
            .map_err(|e| CatalogError::read(path, e).with_backend(BACKEND))?;
        let (front_matter, body) = parse_front_matter(&content)
            .map_err(|e| CatalogError::invalid_content(path, e).with_backend(BACKEND))?;

        let stem = file_name.rsplit_once('.').map_or(file_name, |(stem, _)| stem);
        let prefix = strip_number_prefix(stem);
        let id = join_rel(id_dir, front_matter.id.as_deref().unwrap_or(prefix.name));

        let title = front_matter
            .title
            .or_else(|| extract_h1(body))
            .unwrap_or_else(|| prefix.name.to_owned());

        let dir_name = id_dir.rsplit('/').next().unwrap_or_default();
        let is_index = ["index", "readme"].contains(&prefix.name.to_lowercase().as_str())
            || (!dir_name.is_empty() && prefix.name.eq_ignore_ascii_case(dir_name));
        let route = match front_matter.slug.as_deref() {
            Some(slug) if slug.starts_with('/') => slug.to_owned(),
            Some(slug) => join_rel(id_dir, slug),
            None if is_index => id_dir.to_owned(),
            None => id.clone(),
        };

        Ok(DocRecord {
            id,
            source: join_rel(rel_dir, file_name),
            title,
            permalink: join_url(self.route_base, &route),
            position: front_matter
                .sidebar_position
                .or_else(|| prefix.number.map(f64::from)),
            sidebar_label: front_matter.sidebar_label,
            class_name: front_matter.sidebar_class_name,
            custom_props: front_matter.sidebar_custom_props,
        })
    }

    /// Parse a `_category_` file and attach it to `rel_dir`.
    fn load_category(&mut self, path: &Path, rel_dir: &str) -> Result<(), CatalogError> {
        let content = fs::read_to_string(path)
            .map_err(|e| CatalogError::read(path, e).with_backend(BACKEND))?;
        if content.trim().is_empty() {
            return Ok(());
        }

        let invalid = |source: Box<dyn std::error::Error + Send + Sync>| {
            CatalogError::invalid_content(path, InvalidCategory(source)).with_backend(BACKEND)
        };
        let metadata: CategoryMetadata = if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content).map_err(|e| invalid(Box::new(e)))?
        } else {
            serde_yaml::from_str(&content).map_err(|e| invalid(Box::new(e)))?
        };

        let dir = if rel_dir.is_empty() { "." } else { rel_dir };
        self.index.insert_category(dir, metadata);
        Ok(())
    }
}

/// Category metadata parse failure, wrapping the format-specific error.
#[derive(Debug, thiserror::Error)]
#[error("Invalid category metadata: {0}")]
struct InvalidCategory(Box<dyn std::error::Error + Send + Sync>);

/// Join a relative path segment onto a relative directory.
fn join_rel(dir: &str, name: &str) -> String {
    let name = name.trim_start_matches("./");
    if dir.is_empty() {
        name.to_owned()
    } else if name.is_empty() {
        dir.to_owned()
    } else {
        format!("{dir}/{name}")
    }
}

/// Join a route onto a URL base, producing an absolute URL path.
fn join_url(base: &str, route: &str) -> String {
    let base = base.trim_end_matches('/');
    let route = route.trim_matches('/');
    match (base.is_empty(), route.is_empty()) {
        (true, true) => "/".to_owned(),
        (true, false) => format!("/{route}"),
        (false, true) => base.to_owned(),
        (false, false) => format!("{base}/{route}"),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::catalog::CatalogErrorKind;
    use crate::metadata::CategoryLinkMetadata;

    fn create_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_fs_catalog_is_send_sync() {
        assert_send_sync::<FsCatalog>();
    }

    #[test]
    fn test_open_missing_dir() {
        let temp = create_test_dir();
        let catalog = FsCatalog::open(temp.path().join("missing"), "/docs").unwrap();

        assert!(catalog.index().is_empty());
    }

    #[test]
    fn test_open_flat_structure() {
        let temp = create_test_dir();
        write(temp.path(), "intro.md", "# Introduction\n\nWelcome.");
        write(temp.path(), "setup.mdx", "No heading here");
        write(temp.path(), "notes.txt", "ignored");

        let catalog = FsCatalog::open(temp.path().to_path_buf(), "/docs").unwrap();
        let docs = catalog.index().docs();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, "intro");
        assert_eq!(docs[0].title, "Introduction");
        assert_eq!(docs[0].permalink, "/docs/intro");
        assert_eq!(docs[1].id, "setup");
        assert_eq!(docs[1].title, "setup");
    }

    #[test]
    fn test_number_prefixes_stripped_from_ids() {
        let temp = create_test_dir();
        write(temp.path(), "02-guides/01-install.md", "# Install");

        let catalog = FsCatalog::open(temp.path().to_path_buf(), "/docs").unwrap();
        let doc = catalog.index().get("guides/install").unwrap();

        assert_eq!(doc.source, "02-guides/01-install.md");
        assert_eq!(doc.source_dir(), "02-guides");
        assert_eq!(doc.position, Some(1.0));
        assert_eq!(doc.permalink, "/docs/guides/install");
    }

    #[test]
    fn test_front_matter_overrides() {
        let temp = create_test_dir();
        write(
            temp.path(),
            "guides/03-setup.md",
            "---\nid: getting-set-up\ntitle: Set Up\nsidebar_label: Setup\n\
             sidebar_position: 7\nslug: /start\n---\n# Ignored\n",
        );

        let catalog = FsCatalog::open(temp.path().to_path_buf(), "/docs/").unwrap();
        let doc = catalog.index().get("guides/getting-set-up").unwrap();

        assert_eq!(doc.title, "Set Up");
        assert_eq!(doc.sidebar_label.as_deref(), Some("Setup"));
        assert_eq!(doc.position, Some(7.0));
        assert_eq!(doc.permalink, "/docs/start");
    }

    #[test]
    fn test_index_doc_permalink_is_directory() {
        let temp = create_test_dir();
        write(temp.path(), "guides/index.md", "# Guides");
        write(temp.path(), "api/api.md", "# API");

        let catalog = FsCatalog::open(temp.path().to_path_buf(), "/docs").unwrap();

        assert_eq!(
            catalog.index().get("guides/index").unwrap().permalink,
            "/docs/guides"
        );
        assert_eq!(catalog.index().get("api/api").unwrap().permalink, "/docs/api");
    }

    #[test]
    fn test_skips_hidden_and_partial_files() {
        let temp = create_test_dir();
        write(temp.path(), ".hidden.md", "# Hidden");
        write(temp.path(), "_partial.md", "# Partial");
        write(temp.path(), "_drafts/post.md", "# Draft");
        write(temp.path(), "visible.md", "# Visible");

        let catalog = FsCatalog::open(temp.path().to_path_buf(), "/docs").unwrap();

        assert_eq!(catalog.index().len(), 1);
        assert!(catalog.index().get("visible").is_some());
    }

    #[test]
    fn test_category_metadata_json_and_yaml() {
        let temp = create_test_dir();
        write(temp.path(), "guides/_category_.json", r#"{"label": "All Guides", "position": 2}"#);
        write(temp.path(), "api/_category_.yml", "label: API Reference\ncollapsed: false\n");
        write(temp.path(), "guides/a.md", "# A");

        let catalog = FsCatalog::open(temp.path().to_path_buf(), "/docs").unwrap();

        let guides = catalog.index().category("guides").unwrap();
        assert_eq!(guides.label.as_deref(), Some("All Guides"));
        assert_eq!(guides.position, Some(2.0));
        let api = catalog.index().category("api").unwrap();
        assert_eq!(api.collapsed, Some(false));
    }

    #[test]
    fn test_generated_index_keywords_and_image() {
        let temp = create_test_dir();
        write(
            temp.path(),
            "guides/_category_.json",
            r#"{
                "label": "Guides",
                "link": {"type": "generated-index", "keywords": ["a"], "image": "/img.png"}
            }"#,
        );
        write(temp.path(), "guides/a.md", "# A");

        let catalog = FsCatalog::open(temp.path().to_path_buf(), "/docs").unwrap();

        assert_eq!(
            catalog.index().category("guides").unwrap().link,
            Some(Some(CategoryLinkMetadata::GeneratedIndex {
                slug: None,
                title: None,
                description: None,
                keywords: vec!["a".to_owned()],
                image: Some("/img.png".to_owned()),
            }))
        );
    }

    #[test]
    fn test_invalid_category_metadata_is_error() {
        let temp = create_test_dir();
        write(temp.path(), "guides/_category_.json", r#"{"label": "#);

        let err = FsCatalog::open(temp.path().to_path_buf(), "/docs").unwrap_err();

        assert_eq!(err.kind, CatalogErrorKind::InvalidContent);
        assert_eq!(err.backend, Some("Fs"));
        assert!(err.to_string().contains("Invalid category metadata"));
    }

    #[test]
    fn test_invalid_front_matter_is_error() {
        let temp = create_test_dir();
        write(temp.path(), "broken.md", "---\ntitle: [oops\n---\n");

        let err = FsCatalog::open(temp.path().to_path_buf(), "/docs").unwrap_err();

        assert_eq!(err.kind, CatalogErrorKind::InvalidContent);
        assert!(err.path.unwrap().ends_with("broken.md"));
    }

    #[tokio::test]
    async fn test_doc_catalog_lookups() {
        let temp = create_test_dir();
        write(temp.path(), "intro.md", "# Intro");
        write(temp.path(), "guides/a.md", "# A");
        write(temp.path(), "guides/b.md", "# B");
        write(temp.path(), "guides/_category_.yml", "label: Guides\n");

        let catalog = FsCatalog::open(temp.path().to_path_buf(), "/docs").unwrap();

        let guides = catalog.docs_in_dir("guides").await.unwrap();
        assert_eq!(guides.len(), 2);
        assert_eq!(catalog.docs_in_dir(".").await.unwrap().len(), 3);
        assert!(catalog.doc("intro").await.unwrap().is_some());
        assert!(catalog.doc("missing").await.unwrap().is_none());
        assert!(catalog.category_metadata("guides").await.unwrap().is_some());
        assert!(catalog.category_metadata(".").await.unwrap().is_none());
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("/docs", "intro"), "/docs/intro");
        assert_eq!(join_url("/docs/", "/intro/"), "/docs/intro");
        assert_eq!(join_url("/docs", ""), "/docs");
        assert_eq!(join_url("", ""), "/");
        assert_eq!(join_url("", "a/b"), "/a/b");
    }
}
