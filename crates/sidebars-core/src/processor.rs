//! Sidebar processing.
//!
//! Turns [`NormalizedSidebars`] into final [`Sidebars`] against a
//! [`DocCatalog`]:
//!
//! 1. Fetch documents under every autogenerated directory and the category
//!    metadata of their subdirectories
//! 2. Expand autogenerated markers in place
//! 3. Fetch every referenced document
//! 4. Resolve labels and permalinks, apply category defaults, and drop or
//!    convert empty categories
//! 5. Report broken references per [`BrokenReferenceSeverity`]
//!
//! Catalog lookups are awaited one at a time.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use sidebars_catalog::{DocCatalog, DocRecord};

use crate::error::{BrokenReference, SidebarsError};
use crate::generator::{Generator, subdirectories};
use crate::options::{BrokenReferenceSeverity, SidebarOptions};
use crate::slug::Slugger;
use crate::types::{
    Category, CategoryLink, DocItem, NormalizedCategory, NormalizedItem, NormalizedSidebars,
    ResolvedCategoryLink, ResolvedDoc, SidebarItem, Sidebars, Version,
};

/// Inputs threaded through processing.
pub struct ProcessParams<'a, C> {
    /// Source of documents and category metadata.
    pub catalog: &'a C,
    /// Version the sidebars belong to.
    pub version: &'a Version,
    /// Global sidebar options.
    pub options: &'a SidebarOptions,
    /// Category id generator, shared with normalization.
    pub slugger: &'a mut Slugger,
}

/// Processed sidebars with the broken references found while resolving them.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedSidebars {
    /// Final sidebar trees.
    pub sidebars: Sidebars,
    /// References to documents missing from the catalog.
    pub broken_references: Vec<BrokenReference>,
}

/// Expand and resolve normalized sidebars.
///
/// Broken references never abort processing by themselves: the item is kept
/// with `broken: true`. With [`BrokenReferenceSeverity::Throw`] all of them
/// are returned together as an error once every sidebar is resolved.
///
/// # Errors
///
/// Returns [`SidebarsError::Catalog`] if a catalog lookup fails, and
/// [`SidebarsError::BrokenReferences`] under the `throw` severity.
pub async fn process_sidebars<C: DocCatalog>(
    normalized: NormalizedSidebars,
    params: &mut ProcessParams<'_, C>,
) -> Result<ProcessedSidebars, SidebarsError> {
    let catalog = params.catalog;

    let mut dirs = BTreeSet::new();
    for items in normalized.values() {
        collect_autogenerated(items, &mut dirs);
    }
    let mut docs_by_dir = HashMap::with_capacity(dirs.len());
    let mut subdirs = BTreeSet::new();
    for dir in dirs {
        let docs = catalog.docs_in_dir(&dir).await?;
        subdirs.extend(subdirectories(&dir, &docs));
        docs_by_dir.insert(dir, docs);
    }
    let mut metadata = HashMap::new();
    for subdir in subdirs {
        if let Some(meta) = catalog.category_metadata(&subdir).await? {
            metadata.insert(subdir, meta);
        }
    }
    tracing::debug!(
        dirs = docs_by_dir.len(),
        categories = metadata.len(),
        "Fetched autogenerated content"
    );

    let mut generator = Generator {
        slugger: &mut *params.slugger,
        version: params.version,
        sort: params.options.sort,
        metadata: &metadata,
    };
    let expanded: Vec<(String, Vec<NormalizedItem>)> = normalized
        .into_iter()
        .map(|(name, items)| (name, expand(items, &mut generator, &docs_by_dir)))
        .collect();

    let mut ids = BTreeSet::new();
    for (_, items) in &expanded {
        collect_doc_ids(items, &mut ids);
    }
    let mut docs = HashMap::with_capacity(ids.len());
    for id in ids {
        if let Some(doc) = catalog.doc(&id).await? {
            docs.insert(id, doc);
        }
    }

    let mut broken_references = Vec::new();
    let mut sidebars = Sidebars::with_capacity(expanded.len());
    for (name, items) in expanded {
        let mut resolver = Resolver {
            sidebar: &name,
            docs: &docs,
            options: params.options,
            broken: &mut broken_references,
        };
        let items = resolver.items(items, &mut Vec::new());
        sidebars.insert(name, items);
    }

    match params.options.broken_references {
        BrokenReferenceSeverity::Ignore => {}
        BrokenReferenceSeverity::Warn => {
            for reference in &broken_references {
                tracing::warn!(
                    sidebar = %reference.sidebar,
                    doc_id = %reference.doc_id,
                    location = %reference.location.join(" > "),
                    "Sidebar references unknown document"
                );
            }
        }
        BrokenReferenceSeverity::Throw => {
            if !broken_references.is_empty() {
                return Err(SidebarsError::BrokenReferences(broken_references));
            }
        }
    }

    Ok(ProcessedSidebars {
        sidebars,
        broken_references,
    })
}

fn collect_autogenerated(items: &[NormalizedItem], dirs: &mut BTreeSet<String>) {
    for item in items {
        match item {
            NormalizedItem::Autogenerated(auto) => {
                dirs.insert(auto.dir_name.clone());
            }
            NormalizedItem::Category(category) => collect_autogenerated(&category.items, dirs),
            _ => {}
        }
    }
}

fn collect_doc_ids(items: &[NormalizedItem], ids: &mut BTreeSet<String>) {
    for item in items {
        match item {
            NormalizedItem::Doc(doc) | NormalizedItem::Ref(doc) => {
                ids.insert(doc.id.clone());
            }
            NormalizedItem::Category(category) => {
                if let Some(CategoryLink::Doc { id }) = &category.link {
                    ids.insert(id.clone());
                }
                collect_doc_ids(&category.items, ids);
            }
            _ => {}
        }
    }
}

fn expand(
    items: Vec<NormalizedItem>,
    generator: &mut Generator<'_>,
    docs_by_dir: &HashMap<String, Vec<DocRecord>>,
) -> Vec<NormalizedItem> {
    let mut expanded = Vec::with_capacity(items.len());
    for item in items {
        match item {
            NormalizedItem::Autogenerated(auto) => {
                let docs = docs_by_dir
                    .get(&auto.dir_name)
                    .map_or(&[][..], Vec::as_slice);
                expanded.extend(generator.generate(&auto.dir_name, docs));
            }
            NormalizedItem::Category(category) => {
                let items = expand(category.items, generator, docs_by_dir);
                expanded.push(NormalizedItem::Category(NormalizedCategory {
                    items,
                    ..category
                }));
            }
            other => expanded.push(other),
        }
    }
    expanded
}

struct Resolver<'a> {
    sidebar: &'a str,
    docs: &'a HashMap<String, DocRecord>,
    options: &'a SidebarOptions,
    broken: &'a mut Vec<BrokenReference>,
}

impl Resolver<'_> {
    /// Resolve `items`; `trail` holds the labels of the enclosing categories.
    fn items(&mut self, items: Vec<NormalizedItem>, trail: &mut Vec<String>) -> Vec<SidebarItem> {
        items
            .into_iter()
            .filter_map(|item| self.item(item, trail))
            .collect()
    }

    fn item(&mut self, item: NormalizedItem, trail: &mut Vec<String>) -> Option<SidebarItem> {
        match item {
            NormalizedItem::Doc(doc) => Some(SidebarItem::Doc(self.doc(doc, trail))),
            NormalizedItem::Ref(doc) => Some(SidebarItem::Ref(self.doc(doc, trail))),
            NormalizedItem::Link(link) => Some(SidebarItem::Link(link)),
            NormalizedItem::Html(html) => Some(SidebarItem::Html(html)),
            NormalizedItem::Category(category) => self.category(category, trail),
            // Expanded before resolution; an unexpanded marker has no content.
            NormalizedItem::Autogenerated(_) => None,
        }
    }

    fn doc(&mut self, doc: DocItem, trail: &[String]) -> ResolvedDoc {
        let Some(record) = self.docs.get(&doc.id) else {
            self.report(&doc.id, trail);
            return ResolvedDoc {
                label: doc.label.unwrap_or_else(|| doc.id.clone()),
                id: doc.id,
                permalink: None,
                class_name: doc.class_name,
                custom_props: doc.custom_props,
                broken: true,
            };
        };
        ResolvedDoc {
            label: doc
                .label
                .or_else(|| record.sidebar_label.clone())
                .unwrap_or_else(|| record.title.clone()),
            id: doc.id,
            permalink: Some(record.permalink.clone()),
            class_name: doc.class_name.or_else(|| record.class_name.clone()),
            custom_props: doc.custom_props.or_else(|| record.custom_props.clone()),
            broken: false,
        }
    }

    fn category(
        &mut self,
        category: NormalizedCategory,
        trail: &mut Vec<String>,
    ) -> Option<SidebarItem> {
        let collapsible = category.collapsible.unwrap_or(self.options.collapsible);
        let collapsed = collapsible && category.collapsed.unwrap_or(self.options.collapsed);

        trail.push(category.label.clone());
        let link = match category.link {
            Some(CategoryLink::Doc { id }) => Some(self.doc_link(id, trail)),
            Some(CategoryLink::GeneratedIndex(index)) => {
                Some(ResolvedCategoryLink::GeneratedIndex(index))
            }
            None => None,
        };
        let items = self.items(category.items, trail);
        trail.pop();

        if items.is_empty() {
            return match link {
                Some(ResolvedCategoryLink::Doc {
                    id,
                    permalink,
                    broken,
                }) => Some(SidebarItem::Doc(ResolvedDoc {
                    id,
                    label: category.label,
                    permalink,
                    class_name: category.class_name,
                    custom_props: category.custom_props,
                    broken,
                })),
                _ => None,
            };
        }

        Some(SidebarItem::Category(Category {
            id: category.id,
            label: category.label,
            items,
            collapsed,
            collapsible,
            link,
            class_name: category.class_name,
            custom_props: category.custom_props,
            description: category.description,
            key: category.key,
        }))
    }

    fn doc_link(&mut self, id: String, trail: &[String]) -> ResolvedCategoryLink {
        let permalink = self.docs.get(&id).map(|doc| doc.permalink.clone());
        if permalink.is_none() {
            self.report(&id, trail);
        }
        ResolvedCategoryLink::Doc {
            broken: permalink.is_none(),
            id,
            permalink,
        }
    }

    fn report(&mut self, doc_id: &str, trail: &[String]) {
        self.broken.push(BrokenReference {
            sidebar: self.sidebar.to_owned(),
            doc_id: doc_id.to_owned(),
            location: trail.to_vec(),
        });
    }
}
