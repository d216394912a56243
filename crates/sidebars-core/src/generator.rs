//! Autogenerated sidebar expansion.
//!
//! Builds category trees mirroring the directory layout of catalog documents.
//! The processor fetches documents and category metadata up front; this
//! module only arranges them.
//!
//! # Rules
//!
//! - Each subdirectory becomes a category labeled by its `_category_` label
//!   or its name without number prefix
//! - A doc named `index`, `readme` or after its directory becomes the
//!   category link, unless the metadata declares `link`
//! - Siblings are ordered by [`SortPolicy`]
//! - Metadata applies to its own directory only; nested directories do not
//!   inherit it

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use sidebars_catalog::{CategoryLinkMetadata, CategoryMetadata, DocRecord, strip_number_prefix};

use crate::options::SortPolicy;
use crate::slug::Slugger;
use crate::types::{
    CategoryLink, DocItem, GeneratedIndex, NormalizedCategory, NormalizedItem, Version,
};

/// Directories strictly below `dir_name` that contain documents.
pub(crate) fn subdirectories(dir_name: &str, docs: &[DocRecord]) -> BTreeSet<String> {
    let dir = normalize_dir(dir_name);
    let mut dirs = BTreeSet::new();
    for doc in docs {
        let Some(relative) = relative_dir(dir, doc.source_dir()) else {
            continue;
        };
        let mut path = if dir == "." { String::new() } else { dir.to_owned() };
        for segment in relative.split('/').filter(|s| !s.is_empty()) {
            if !path.is_empty() {
                path.push('/');
            }
            path.push_str(segment);
            dirs.insert(path.clone());
        }
    }
    dirs
}

/// Expands autogenerated markers into concrete items.
pub(crate) struct Generator<'a> {
    pub slugger: &'a mut Slugger,
    pub version: &'a Version,
    pub sort: SortPolicy,
    /// Category metadata keyed by directory relative to the docs root.
    pub metadata: &'a HashMap<String, CategoryMetadata>,
}

impl Generator<'_> {
    /// Items for the documents under `dir_name`, recursively.
    ///
    /// The directory itself does not become a category: its contents are
    /// returned for flattening in place of the marker.
    pub fn generate(&mut self, dir_name: &str, docs: &[DocRecord]) -> Vec<NormalizedItem> {
        let dir = normalize_dir(dir_name);
        let mut root = DirNode::default();
        for doc in docs {
            let Some(relative) = relative_dir(dir, doc.source_dir()) else {
                continue;
            };
            let node = relative
                .split('/')
                .filter(|s| !s.is_empty())
                .fold(&mut root, |node, segment| {
                    node.children.entry(segment.to_owned()).or_default()
                });
            node.docs.push(doc);
        }
        self.dir_items(dir, &root)
    }

    fn dir_items(&mut self, path: &str, node: &DirNode<'_>) -> Vec<NormalizedItem> {
        let all_metadata = self.metadata;
        let mut entries = Vec::with_capacity(node.docs.len() + node.children.len());
        for &doc in &node.docs {
            entries.push(Entry {
                position: doc.position,
                file_name: doc.file_name(),
                title: doc.sidebar_label.clone().unwrap_or_else(|| doc.title.clone()),
                kind: EntryKind::Doc(doc),
            });
        }
        for (name, child) in &node.children {
            let child_path = if path == "." {
                name.clone()
            } else {
                format!("{path}/{name}")
            };
            let metadata = all_metadata.get(&child_path);
            let prefix = strip_number_prefix(name);
            let label = metadata
                .and_then(|m| m.label.clone())
                .unwrap_or_else(|| prefix.name.to_owned());
            entries.push(Entry {
                position: metadata
                    .and_then(|m| m.position)
                    .or(prefix.number.map(f64::from)),
                file_name: name,
                title: label,
                kind: EntryKind::Dir {
                    name,
                    path: child_path,
                    node: child,
                    metadata,
                },
            });
        }

        let sort = self.sort;
        entries.sort_by(|a, b| a.compare(b, sort));

        entries
            .into_iter()
            .map(|entry| match entry.kind {
                EntryKind::Doc(doc) => NormalizedItem::Doc(DocItem::new(doc.id.as_str())),
                EntryKind::Dir {
                    name,
                    path,
                    node,
                    metadata,
                } => self.category(name, &path, entry.title, node, metadata),
            })
            .collect()
    }

    fn category(
        &mut self,
        name: &str,
        path: &str,
        label: String,
        node: &DirNode<'_>,
        metadata: Option<&CategoryMetadata>,
    ) -> NormalizedItem {
        let id = self.slugger.slug(&label);

        let (link, linked_doc) = match metadata.and_then(|m| m.link.clone()) {
            Some(Some(CategoryLinkMetadata::Doc { id: doc_id })) => {
                (Some(CategoryLink::Doc { id: doc_id.clone() }), Some(doc_id))
            }
            Some(Some(CategoryLinkMetadata::GeneratedIndex {
                slug,
                title,
                description,
                keywords,
                image,
            })) => {
                let index = GeneratedIndex {
                    title,
                    description,
                    keywords,
                    image,
                    ..GeneratedIndex::new(&id, slug, self.version)
                };
                (Some(CategoryLink::GeneratedIndex(index)), None)
            }
            Some(None) => (None, None),
            None => match index_doc(name, node) {
                Some(doc) => (
                    Some(CategoryLink::Doc { id: doc.id.clone() }),
                    Some(doc.id.clone()),
                ),
                None => (None, None),
            },
        };

        let mut items = self.dir_items(path, node);
        if let Some(linked) = linked_doc {
            items.retain(|item| !matches!(item, NormalizedItem::Doc(doc) if doc.id == linked));
        }

        NormalizedItem::Category(NormalizedCategory {
            id,
            label,
            items,
            collapsed: metadata.and_then(|m| m.collapsed),
            collapsible: metadata.and_then(|m| m.collapsible),
            link,
            class_name: metadata.and_then(|m| m.class_name.clone()),
            custom_props: metadata.and_then(|m| m.custom_props.clone()),
            description: metadata.and_then(|m| m.description.clone()),
            key: None,
        })
    }
}

#[derive(Default)]
struct DirNode<'d> {
    docs: Vec<&'d DocRecord>,
    children: BTreeMap<String, DirNode<'d>>,
}

struct Entry<'e> {
    position: Option<f64>,
    file_name: &'e str,
    title: String,
    kind: EntryKind<'e>,
}

enum EntryKind<'e> {
    Doc(&'e DocRecord),
    Dir {
        name: &'e str,
        path: String,
        node: &'e DirNode<'e>,
        metadata: Option<&'e CategoryMetadata>,
    },
}

impl Entry<'_> {
    fn compare(&self, other: &Self, sort: SortPolicy) -> Ordering {
        match sort {
            SortPolicy::Position => compare_positions(self.position, other.position)
                .then_with(|| self.file_name.cmp(other.file_name))
                .then_with(|| self.title.cmp(&other.title)),
            SortPolicy::FileName => self.file_name.cmp(other.file_name),
            SortPolicy::Title => self
                .title
                .cmp(&other.title)
                .then_with(|| self.file_name.cmp(other.file_name)),
        }
    }
}

/// Positioned entries first, ascending.
fn compare_positions(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// First doc of `node` that serves as the landing page of directory `name`.
fn index_doc<'d>(name: &str, node: &DirNode<'d>) -> Option<&'d DocRecord> {
    let dir_name = strip_number_prefix(name).name.to_lowercase();
    node.docs.iter().copied().find(|doc| {
        let stem = strip_number_prefix(doc.file_stem()).name.to_lowercase();
        stem == "index" || stem == "readme" || stem == dir_name
    })
}

/// Path of `source_dir` below `dir`, or `None` if it is outside.
fn relative_dir<'s>(dir: &str, source_dir: &'s str) -> Option<&'s str> {
    if dir == "." {
        return Some(if source_dir == "." { "" } else { source_dir });
    }
    if source_dir == dir {
        return Some("");
    }
    source_dir
        .strip_prefix(dir)
        .and_then(|rest| rest.strip_prefix('/'))
}

fn normalize_dir(dir: &str) -> &str {
    let dir = dir.strip_prefix("./").unwrap_or(dir).trim_end_matches('/');
    if dir.is_empty() { "." } else { dir }
}
