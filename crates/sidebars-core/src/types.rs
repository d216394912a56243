//! Sidebar data model.
//!
//! Three shapes flow through the pipeline:
//!
//! - [`SidebarsConfig`]: raw, user-authored JSON values, unchecked until validated
//! - [`NormalizedSidebars`]: shorthands expanded into [`NormalizedItem`] trees,
//!   with autogenerated markers still in place
//! - [`Sidebars`]: final [`SidebarItem`] trees with documents resolved

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::util::join_url;

/// Raw sidebars config: sidebar name to untyped sidebar value.
///
/// Key order is preserved so sidebars keep their authored order.
pub type SidebarsConfig = serde_json::Map<String, serde_json::Value>;

/// Sidebars after shorthand expansion.
pub type NormalizedSidebars = IndexMap<String, Vec<NormalizedItem>>;

/// Fully processed sidebars.
pub type Sidebars = IndexMap<String, Vec<SidebarItem>>;

/// Content version the sidebars belong to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Version {
    /// Version name (e.g., "current", "1.0").
    pub name: String,
    /// URL base of the version (e.g., "/docs", "/docs/1.0").
    pub path: String,
}

impl Default for Version {
    fn default() -> Self {
        Self {
            name: "current".to_owned(),
            path: "/docs".to_owned(),
        }
    }
}

/// Sidebar node after normalization.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum NormalizedItem {
    /// Group of child items.
    Category(NormalizedCategory),
    /// Link to a document, associating the document with this sidebar.
    Doc(DocItem),
    /// Link to a document without associating it with this sidebar.
    Ref(DocItem),
    /// Arbitrary link.
    Link(LinkItem),
    /// Raw HTML.
    Html(HtmlItem),
    /// Placeholder expanded from a catalog directory during processing.
    Autogenerated(AutogeneratedItem),
}

impl NormalizedItem {
    /// Stable identifier of the node.
    ///
    /// Documents use their doc id, links their href, autogenerated markers
    /// their directory, and categories the slug assigned during normalization.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Category(category) => &category.id,
            Self::Doc(doc) | Self::Ref(doc) => &doc.id,
            Self::Link(link) => &link.href,
            Self::Html(html) => html.key.as_deref().unwrap_or(&html.value),
            Self::Autogenerated(auto) => &auto.dir_name,
        }
    }
}

/// Category node after normalization.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedCategory {
    /// Slug of the label, unique within one load.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Child items.
    pub items: Vec<NormalizedItem>,
    /// Explicit collapsed state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
    /// Explicit collapsible flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsible: Option<bool>,
    /// Category landing page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<CategoryLink>,
    /// CSS class.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Arbitrary renderer props.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_props: Option<serde_json::Value>,
    /// Category description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Explicit key for renderers that need one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// Doc or ref node.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocItem {
    /// Referenced document id.
    pub id: String,
    /// Explicit label (wins over front matter and title).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// CSS class.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Arbitrary renderer props.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_props: Option<serde_json::Value>,
}

impl DocItem {
    /// Doc item with only an id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            class_name: None,
            custom_props: None,
        }
    }
}

/// Link node.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkItem {
    /// Link target.
    pub href: String,
    /// Display label.
    pub label: String,
    /// Link description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// CSS class.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Arbitrary renderer props.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_props: Option<serde_json::Value>,
}

/// Raw HTML node.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlItem {
    /// HTML markup.
    pub value: String,
    /// Apply the default sidebar item styling.
    pub default_style: bool,
    /// CSS class.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Arbitrary renderer props.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_props: Option<serde_json::Value>,
    /// Explicit key for renderers that need one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// Autogenerated marker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutogeneratedItem {
    /// Catalog directory relative to the docs root (`.` for the root).
    pub dir_name: String,
}

/// Landing page of a category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CategoryLink {
    /// Existing document.
    Doc {
        /// Document id.
        id: String,
    },
    /// Generated page listing the category items.
    GeneratedIndex(GeneratedIndex),
}

/// Generated index page settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedIndex {
    /// URL slug relative to the version path.
    pub slug: String,
    /// Absolute URL (version path joined with slug).
    pub permalink: String,
    /// Page title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Page description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// SEO keywords.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    /// Social card image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl GeneratedIndex {
    /// Build a generated index for the category `category_id`.
    ///
    /// Without an explicit slug the page lives at `/category/<category_id>`.
    #[must_use]
    pub fn new(category_id: &str, slug: Option<String>, version: &Version) -> Self {
        let slug = slug.unwrap_or_else(|| format!("/category/{category_id}"));
        let permalink = join_url(&version.path, &slug);
        Self {
            slug,
            permalink,
            title: None,
            description: None,
            keywords: Vec::new(),
            image: None,
        }
    }
}

/// Sidebar node after processing.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SidebarItem {
    /// Group of child items.
    Category(Category),
    /// Resolved document.
    Doc(ResolvedDoc),
    /// Resolved document reference.
    Ref(ResolvedDoc),
    /// Arbitrary link.
    Link(LinkItem),
    /// Raw HTML.
    Html(HtmlItem),
}

impl SidebarItem {
    /// Display label, if the item has one.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Category(category) => Some(&category.label),
            Self::Doc(doc) | Self::Ref(doc) => Some(&doc.label),
            Self::Link(link) => Some(&link.label),
            Self::Html(_) => None,
        }
    }
}

/// Category after processing.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Slug of the label, unique within one load.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Child items.
    pub items: Vec<SidebarItem>,
    /// Whether the category starts collapsed.
    pub collapsed: bool,
    /// Whether the category can be collapsed.
    pub collapsible: bool,
    /// Category landing page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<ResolvedCategoryLink>,
    /// CSS class.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Arbitrary renderer props.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_props: Option<serde_json::Value>,
    /// Category description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Explicit key for renderers that need one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// Document reference resolved against the catalog.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDoc {
    /// Document id.
    pub id: String,
    /// Display label (explicit > `sidebar_label` > title > id).
    pub label: String,
    /// Document URL, `None` when the reference is broken.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,
    /// CSS class (explicit > front matter).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Arbitrary renderer props (explicit > front matter).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_props: Option<serde_json::Value>,
    /// The id does not exist in the catalog.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub broken: bool,
}

/// Category landing page after processing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ResolvedCategoryLink {
    /// Existing document.
    Doc {
        /// Document id.
        id: String,
        /// Document URL, `None` when the reference is broken.
        #[serde(skip_serializing_if = "Option::is_none")]
        permalink: Option<String>,
        /// The id does not exist in the catalog.
        #[serde(skip_serializing_if = "std::ops::Not::not")]
        broken: bool,
    },
    /// Generated page listing the category items.
    GeneratedIndex(GeneratedIndex),
}

impl ResolvedCategoryLink {
    /// URL of the landing page, if resolvable.
    #[must_use]
    pub fn permalink(&self) -> Option<&str> {
        match self {
            Self::Doc { permalink, .. } => permalink.as_deref(),
            Self::GeneratedIndex(index) => Some(&index.permalink),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_default() {
        let version = Version::default();
        assert_eq!(version.name, "current");
        assert_eq!(version.path, "/docs");
    }

    #[test]
    fn test_generated_index_default_slug() {
        let index = GeneratedIndex::new("getting-started", None, &Version::default());
        assert_eq!(index.slug, "/category/getting-started");
        assert_eq!(index.permalink, "/docs/category/getting-started");
    }

    #[test]
    fn test_generated_index_explicit_slug_on_versioned_path() {
        let version = Version {
            name: "1.0".to_owned(),
            path: "/docs/1.0/".to_owned(),
        };
        let index = GeneratedIndex::new("ignored", Some("/all".to_owned()), &version);
        assert_eq!(index.slug, "/all");
        assert_eq!(index.permalink, "/docs/1.0/all");
    }

    #[test]
    fn test_normalized_item_ids() {
        let doc = NormalizedItem::Doc(DocItem::new("intro"));
        let auto = NormalizedItem::Autogenerated(AutogeneratedItem {
            dir_name: ".".to_owned(),
        });
        let html = NormalizedItem::Html(HtmlItem {
            value: "<hr>".to_owned(),
            default_style: false,
            class_name: None,
            custom_props: None,
            key: Some("divider".to_owned()),
        });

        assert_eq!(doc.id(), "intro");
        assert_eq!(auto.id(), ".");
        assert_eq!(html.id(), "divider");
    }

    #[test]
    fn test_sidebar_item_serializes_type_tag() {
        let item = SidebarItem::Doc(ResolvedDoc {
            id: "intro".to_owned(),
            label: "Intro".to_owned(),
            permalink: Some("/docs/intro".to_owned()),
            class_name: None,
            custom_props: None,
            broken: false,
        });

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "doc",
                "id": "intro",
                "label": "Intro",
                "permalink": "/docs/intro"
            })
        );
    }

    #[test]
    fn test_generated_index_link_serializes_kebab_tag() {
        let link = ResolvedCategoryLink::GeneratedIndex(GeneratedIndex::new(
            "guides",
            None,
            &Version::default(),
        ));

        let json = serde_json::to_value(&link).unwrap();
        assert_eq!(json["type"], "generated-index");
        assert_eq!(json["permalink"], "/docs/category/guides");
    }
}
