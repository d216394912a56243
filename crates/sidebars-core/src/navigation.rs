//! Previous/next navigation over processed sidebars.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use serde::Serialize;

use crate::types::{ResolvedCategoryLink, SidebarItem, Sidebars};

/// Navigable entry of a sidebar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationLink {
    /// Display label.
    pub label: String,
    /// Target URL.
    pub permalink: String,
    /// Document id, `None` for generated index pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<String>,
}

/// Neighbors of a document in its sidebar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocNavigation {
    /// Sidebar containing the document.
    pub sidebar_name: String,
    /// Link before the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<NavigationLink>,
    /// Link after the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<NavigationLink>,
}

/// Lookup helpers over processed sidebars.
///
/// Navigable links are doc items, category doc links and generated index
/// pages, in tree order. Refs, external links, HTML and broken docs are
/// skipped.
#[derive(Debug, Default)]
pub struct SidebarsUtils {
    links: IndexMap<String, Vec<NavigationLink>>,
    doc_sidebars: HashMap<String, String>,
}

impl SidebarsUtils {
    /// Index the navigable links of every sidebar.
    #[must_use]
    pub fn new(sidebars: &Sidebars) -> Self {
        let mut utils = Self::default();
        for (name, items) in sidebars {
            let mut links = Vec::new();
            collect_links(items, &mut links);
            for doc_id in links.iter().filter_map(|link| link.doc_id.as_ref()) {
                if let Some(existing) = utils.doc_sidebars.get(doc_id) {
                    if existing != name {
                        tracing::debug!(
                            doc_id = %doc_id,
                            first = %existing,
                            other = %name,
                            "Document appears in several sidebars"
                        );
                    }
                    continue;
                }
                utils.doc_sidebars.insert(doc_id.clone(), name.clone());
            }
            utils.links.insert(name.clone(), links);
        }
        utils
    }

    /// Name of the first sidebar containing `doc_id`.
    #[must_use]
    pub fn sidebar_name_by_doc_id(&self, doc_id: &str) -> Option<&str> {
        self.doc_sidebars.get(doc_id).map(String::as_str)
    }

    /// Previous and next links around `doc_id` in its sidebar.
    #[must_use]
    pub fn doc_navigation(&self, doc_id: &str) -> Option<DocNavigation> {
        let sidebar_name = self.sidebar_name_by_doc_id(doc_id)?;
        let links = self.links.get(sidebar_name)?;
        let index = links
            .iter()
            .position(|link| link.doc_id.as_deref() == Some(doc_id))?;
        Some(DocNavigation {
            sidebar_name: sidebar_name.to_owned(),
            previous: index.checked_sub(1).map(|i| links[i].clone()),
            next: links.get(index + 1).cloned(),
        })
    }

    /// First document id of the first sidebar that has one.
    #[must_use]
    pub fn first_doc_id_of_first_sidebar(&self) -> Option<&str> {
        self.links
            .values()
            .next()?
            .iter()
            .find_map(|link| link.doc_id.as_deref())
    }

    /// First navigable link of `sidebar`.
    #[must_use]
    pub fn first_link(&self, sidebar: &str) -> Option<&NavigationLink> {
        self.links.get(sidebar)?.first()
    }

    /// Every document id referenced by a sidebar, in sidebar order.
    #[must_use]
    pub fn doc_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.links
            .values()
            .flatten()
            .filter_map(|link| link.doc_id.as_deref())
            .filter(|id| seen.insert(*id))
            .collect()
    }
}

fn collect_links(items: &[SidebarItem], links: &mut Vec<NavigationLink>) {
    for item in items {
        match item {
            SidebarItem::Doc(doc) => {
                if let Some(permalink) = &doc.permalink {
                    links.push(NavigationLink {
                        label: doc.label.clone(),
                        permalink: permalink.clone(),
                        doc_id: Some(doc.id.clone()),
                    });
                }
            }
            SidebarItem::Category(category) => {
                match &category.link {
                    Some(ResolvedCategoryLink::Doc {
                        id,
                        permalink: Some(permalink),
                        ..
                    }) => links.push(NavigationLink {
                        label: category.label.clone(),
                        permalink: permalink.clone(),
                        doc_id: Some(id.clone()),
                    }),
                    Some(ResolvedCategoryLink::GeneratedIndex(index)) => {
                        links.push(NavigationLink {
                            label: index.title.clone().unwrap_or_else(|| category.label.clone()),
                            permalink: index.permalink.clone(),
                            doc_id: None,
                        });
                    }
                    _ => {}
                }
                collect_links(&category.items, links);
            }
            SidebarItem::Ref(_) | SidebarItem::Link(_) | SidebarItem::Html(_) => {}
        }
    }
}
