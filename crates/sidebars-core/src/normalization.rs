//! Shorthand expansion.
//!
//! Converts a validated [`SidebarsConfig`] into typed [`NormalizedItem`]
//! trees. String items become docs, single-key objects and object-form
//! sidebars become categories, and every category gets an id from the
//! [`Slugger`] in document order.

use serde::Deserialize;
use serde_json::Value;

use crate::error::NormalizationError;
use crate::slug::Slugger;
use crate::types::{
    AutogeneratedItem, CategoryLink, DocItem, GeneratedIndex, HtmlItem, LinkItem,
    NormalizedCategory, NormalizedItem, NormalizedSidebars, SidebarsConfig, Version,
};

/// Inputs threaded through normalization.
pub struct NormalizeParams<'a> {
    /// Category id generator, scoped to one sidebars load.
    pub slugger: &'a mut Slugger,
    /// Version the sidebars belong to.
    pub version: &'a Version,
}

/// Expand every sidebar of a validated config.
///
/// # Errors
///
/// Returns [`NormalizationError::MissingItems`] for a category without
/// `items`, and [`NormalizationError::InvalidItem`] for items that do not
/// match their declared type.
pub fn normalize_sidebars(
    config: &SidebarsConfig,
    params: &mut NormalizeParams<'_>,
) -> Result<NormalizedSidebars, NormalizationError> {
    let mut sidebars = NormalizedSidebars::with_capacity(config.len());
    for (name, value) in config {
        let mut normalizer = Normalizer {
            sidebar: name,
            slugger: &mut *params.slugger,
            version: params.version,
        };
        let items = normalizer.sidebar(value)?;
        sidebars.insert(name.clone(), items);
    }
    Ok(sidebars)
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
enum RawItem {
    Doc(RawDoc),
    Ref(RawDoc),
    Link(RawLink),
    Html(RawHtml),
    Autogenerated(RawAutogenerated),
    Category(RawCategory),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDoc {
    id: String,
    label: Option<String>,
    class_name: Option<String>,
    custom_props: Option<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLink {
    href: String,
    label: String,
    description: Option<String>,
    class_name: Option<String>,
    custom_props: Option<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawHtml {
    value: String,
    #[serde(default)]
    default_style: bool,
    class_name: Option<String>,
    custom_props: Option<Value>,
    key: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAutogenerated {
    dir_name: String,
}

/// Category fields except `items`, which are walked from the raw value.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCategory {
    label: String,
    collapsed: Option<bool>,
    collapsible: Option<bool>,
    link: Option<RawCategoryLink>,
    class_name: Option<String>,
    custom_props: Option<Value>,
    description: Option<String>,
    key: Option<String>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
enum RawCategoryLink {
    Doc {
        id: String,
    },
    GeneratedIndex {
        slug: Option<String>,
        title: Option<String>,
        description: Option<String>,
        #[serde(default)]
        keywords: Vec<String>,
        image: Option<String>,
    },
}

struct Normalizer<'a> {
    sidebar: &'a str,
    slugger: &'a mut Slugger,
    version: &'a Version,
}

impl Normalizer<'_> {
    fn sidebar(&mut self, value: &Value) -> Result<Vec<NormalizedItem>, NormalizationError> {
        let location = self.sidebar.to_owned();
        match value {
            Value::Array(items) => self.items(&location, items),
            Value::Object(shorthand) => shorthand
                .iter()
                .map(|(label, items)| self.shorthand(&location, label, items))
                .collect(),
            _ => Err(self.invalid(&location, "sidebar must be an array or an object")),
        }
    }

    fn items(
        &mut self,
        location: &str,
        items: &[Value],
    ) -> Result<Vec<NormalizedItem>, NormalizationError> {
        items
            .iter()
            .enumerate()
            .map(|(i, item)| self.item(&format!("{location}[{i}]"), item))
            .collect()
    }

    fn item(
        &mut self,
        location: &str,
        value: &Value,
    ) -> Result<NormalizedItem, NormalizationError> {
        match value {
            Value::String(id) => Ok(NormalizedItem::Doc(DocItem::new(id.as_str()))),
            Value::Object(object) if !object.contains_key("type") => {
                let mut entries = object.iter();
                match (entries.next(), entries.next()) {
                    (Some((label, items)), None) => self.shorthand(location, label, items),
                    _ => Err(self.invalid(
                        location,
                        "category shorthand must have exactly one key",
                    )),
                }
            }
            Value::Object(_) => {
                let raw = RawItem::deserialize(value)
                    .map_err(|e| self.invalid(location, e.to_string()))?;
                self.typed(location, raw, value.get("items"))
            }
            _ => Err(self.invalid(location, "item must be a string or an object")),
        }
    }

    fn shorthand(
        &mut self,
        location: &str,
        label: &str,
        items: &Value,
    ) -> Result<NormalizedItem, NormalizationError> {
        let id = self.slugger.slug(label);
        let location = format!("{location}[\"{label}\"]");
        let Value::Array(items) = items else {
            return Err(self.invalid(&location, "category shorthand must map to an array"));
        };
        Ok(NormalizedItem::Category(NormalizedCategory {
            id,
            label: label.to_owned(),
            items: self.items(&location, items)?,
            collapsed: None,
            collapsible: None,
            link: None,
            class_name: None,
            custom_props: None,
            description: None,
            key: None,
        }))
    }

    fn typed(
        &mut self,
        location: &str,
        raw: RawItem,
        items: Option<&Value>,
    ) -> Result<NormalizedItem, NormalizationError> {
        let item = match raw {
            RawItem::Doc(doc) => NormalizedItem::Doc(doc.into()),
            RawItem::Ref(doc) => NormalizedItem::Ref(doc.into()),
            RawItem::Link(link) => NormalizedItem::Link(LinkItem {
                href: link.href,
                label: link.label,
                description: link.description,
                class_name: link.class_name,
                custom_props: link.custom_props,
            }),
            RawItem::Html(html) => NormalizedItem::Html(HtmlItem {
                value: html.value,
                default_style: html.default_style,
                class_name: html.class_name,
                custom_props: html.custom_props,
                key: html.key,
            }),
            RawItem::Autogenerated(auto) => NormalizedItem::Autogenerated(AutogeneratedItem {
                dir_name: auto.dir_name,
            }),
            RawItem::Category(category) => self.category(location, category, items)?,
        };
        Ok(item)
    }

    fn category(
        &mut self,
        location: &str,
        raw: RawCategory,
        items: Option<&Value>,
    ) -> Result<NormalizedItem, NormalizationError> {
        let id = self.slugger.slug(&raw.label);
        let items = match items {
            Some(Value::Array(items)) => self.items(&format!("{location}.items"), items)?,
            Some(_) => return Err(self.invalid(location, "field 'items' must be an array")),
            None => {
                return Err(NormalizationError::MissingItems {
                    sidebar: self.sidebar.to_owned(),
                    label: raw.label,
                });
            }
        };
        let link = raw.link.map(|link| match link {
            RawCategoryLink::Doc { id } => CategoryLink::Doc { id },
            RawCategoryLink::GeneratedIndex {
                slug,
                title,
                description,
                keywords,
                image,
            } => CategoryLink::GeneratedIndex(GeneratedIndex {
                title,
                description,
                keywords,
                image,
                ..GeneratedIndex::new(&id, slug, self.version)
            }),
        });

        Ok(NormalizedItem::Category(NormalizedCategory {
            id,
            label: raw.label,
            items,
            collapsed: raw.collapsed,
            collapsible: raw.collapsible,
            link,
            class_name: raw.class_name,
            custom_props: raw.custom_props,
            description: raw.description,
            key: raw.key,
        }))
    }

    fn invalid(&self, location: &str, message: impl Into<String>) -> NormalizationError {
        NormalizationError::InvalidItem {
            sidebar: self.sidebar.to_owned(),
            location: location.to_owned(),
            message: message.into(),
        }
    }
}

impl From<RawDoc> for DocItem {
    fn from(raw: RawDoc) -> Self {
        Self {
            id: raw.id,
            label: raw.label,
            class_name: raw.class_name,
            custom_props: raw.custom_props,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::loader::default_sidebars;

    fn normalize(value: Value) -> Result<NormalizedSidebars, NormalizationError> {
        normalize_with(value, &mut Slugger::new())
    }

    fn normalize_with(
        value: Value,
        slugger: &mut Slugger,
    ) -> Result<NormalizedSidebars, NormalizationError> {
        let Value::Object(config) = value else {
            panic!("test config must be an object");
        };
        let version = Version::default();
        let mut params = NormalizeParams {
            slugger,
            version: &version,
        };
        normalize_sidebars(&config, &mut params)
    }

    fn category(id: &str, label: &str, items: Vec<NormalizedItem>) -> NormalizedItem {
        NormalizedItem::Category(NormalizedCategory {
            id: id.to_owned(),
            label: label.to_owned(),
            items,
            collapsed: None,
            collapsible: None,
            link: None,
            class_name: None,
            custom_props: None,
            description: None,
            key: None,
        })
    }

    fn doc(id: &str) -> NormalizedItem {
        NormalizedItem::Doc(DocItem::new(id))
    }

    #[test]
    fn test_default_sidebars() {
        let version = Version::default();
        let mut slugger = Slugger::new();
        let mut params = NormalizeParams {
            slugger: &mut slugger,
            version: &version,
        };
        let sidebars = normalize_sidebars(&default_sidebars(), &mut params).unwrap();

        assert_eq!(sidebars.len(), 1);
        assert_eq!(
            sidebars["defaultSidebar"],
            vec![NormalizedItem::Autogenerated(AutogeneratedItem {
                dir_name: ".".to_owned()
            })]
        );
    }

    #[test]
    fn test_string_and_shorthand_items() {
        let sidebars =
            normalize(json!({"docs": ["intro", {"Guides": ["setup", "deploy"]}]})).unwrap();

        assert_eq!(
            sidebars["docs"],
            vec![
                doc("intro"),
                category("guides", "Guides", vec![doc("setup"), doc("deploy")]),
            ]
        );
    }

    #[test]
    fn test_object_form_sidebar() {
        let sidebars = normalize(json!({
            "docs": {"Getting Started": ["intro"], "API": ["api/index"]}
        }))
        .unwrap();

        assert_eq!(
            sidebars["docs"],
            vec![
                category("getting-started", "Getting Started", vec![doc("intro")]),
                category("api", "API", vec![doc("api/index")]),
            ]
        );
    }

    #[test]
    fn test_worked_example() {
        let sidebars = normalize(json!({
            "docs": [{"type": "category", "label": "Guide", "items": ["intro"]}]
        }))
        .unwrap();

        assert_eq!(
            sidebars["docs"],
            vec![category("guide", "Guide", vec![doc("intro")])]
        );
    }

    #[test]
    fn test_sibling_categories_get_unique_ids() {
        let sidebars = normalize(json!({
            "docs": [
                {"type": "category", "label": "Guide", "items": []},
                {"type": "category", "label": "Guide", "items": []},
                {"Guide": []}
            ]
        }))
        .unwrap();

        let ids: Vec<_> = sidebars["docs"].iter().map(NormalizedItem::id).collect();
        assert_eq!(ids, vec!["guide", "guide-1", "guide-2"]);
    }

    #[test]
    fn test_ids_unique_across_sidebars() {
        let sidebars = normalize(json!({
            "a": [{"Reference": []}],
            "b": [{"Reference": []}]
        }))
        .unwrap();

        assert_eq!(sidebars["a"][0].id(), "reference");
        assert_eq!(sidebars["b"][0].id(), "reference-1");
    }

    #[test]
    fn test_parent_slugged_before_children() {
        let sidebars = normalize(json!({
            "docs": [{"type": "category", "label": "Setup", "items": [{"Setup": ["x"]}]}]
        }))
        .unwrap();

        let NormalizedItem::Category(parent) = &sidebars["docs"][0] else {
            panic!("expected category");
        };
        assert_eq!(parent.id, "setup");
        assert_eq!(parent.items[0].id(), "setup-1");
    }

    #[test]
    fn test_fresh_slugger_gives_same_ids() {
        let config = json!({"docs": [{"Guide": ["a"]}, {"Guide": ["b"]}]});
        let first = normalize(config.clone()).unwrap();
        let second = normalize(config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_typed_items() {
        let sidebars = normalize(json!({
            "docs": [
                {
                    "type": "doc", "id": "a", "label": "A",
                    "className": "red", "customProps": {"x": 1}
                },
                {"type": "ref", "id": "b"},
                {"type": "link", "href": "https://example.com", "label": "Example"},
                {"type": "html", "value": "<hr>", "defaultStyle": true},
                {"type": "autogenerated", "dirName": "guides"}
            ]
        }))
        .unwrap();

        assert_eq!(
            sidebars["docs"],
            vec![
                NormalizedItem::Doc(DocItem {
                    id: "a".to_owned(),
                    label: Some("A".to_owned()),
                    class_name: Some("red".to_owned()),
                    custom_props: Some(json!({"x": 1})),
                }),
                NormalizedItem::Ref(DocItem::new("b")),
                NormalizedItem::Link(LinkItem {
                    href: "https://example.com".to_owned(),
                    label: "Example".to_owned(),
                    description: None,
                    class_name: None,
                    custom_props: None,
                }),
                NormalizedItem::Html(HtmlItem {
                    value: "<hr>".to_owned(),
                    default_style: true,
                    class_name: None,
                    custom_props: None,
                    key: None,
                }),
                NormalizedItem::Autogenerated(AutogeneratedItem {
                    dir_name: "guides".to_owned()
                }),
            ]
        );
    }

    #[test]
    fn test_generated_index_default_slug() {
        let sidebars = normalize(json!({
            "docs": [{
                "type": "category",
                "label": "Getting Started",
                "link": {"type": "generated-index", "title": "Start here", "keywords": ["intro"]},
                "items": ["intro"]
            }]
        }))
        .unwrap();

        let NormalizedItem::Category(category) = &sidebars["docs"][0] else {
            panic!("expected category");
        };
        assert_eq!(
            category.link,
            Some(CategoryLink::GeneratedIndex(GeneratedIndex {
                slug: "/category/getting-started".to_owned(),
                permalink: "/docs/category/getting-started".to_owned(),
                title: Some("Start here".to_owned()),
                description: None,
                keywords: vec!["intro".to_owned()],
                image: None,
            }))
        );
    }

    #[test]
    fn test_doc_link_and_flags() {
        let sidebars = normalize(json!({
            "docs": [{
                "type": "category",
                "label": "API",
                "collapsed": false,
                "collapsible": true,
                "link": {"type": "doc", "id": "api/overview"},
                "items": []
            }]
        }))
        .unwrap();

        let NormalizedItem::Category(category) = &sidebars["docs"][0] else {
            panic!("expected category");
        };
        assert_eq!(category.collapsed, Some(false));
        assert_eq!(category.collapsible, Some(true));
        assert_eq!(
            category.link,
            Some(CategoryLink::Doc {
                id: "api/overview".to_owned()
            })
        );
    }

    #[test]
    fn test_category_without_items() {
        let err = normalize(json!({
            "docs": [{"type": "category", "label": "Empty", "link": {"type": "doc", "id": "x"}}]
        }))
        .unwrap_err();

        assert_eq!(
            err,
            NormalizationError::MissingItems {
                sidebar: "docs".to_owned(),
                label: "Empty".to_owned(),
            }
        );
        assert_eq!(
            err.to_string(),
            "Category 'Empty' in sidebar 'docs' has no items"
        );
    }

    #[test]
    fn test_invalid_item_reports_location() {
        let err = normalize(json!({
            "docs": [{"type": "category", "label": "A", "items": ["x", {"type": "doc"}]}]
        }))
        .unwrap_err();

        let NormalizationError::InvalidItem { location, .. } = err else {
            panic!("expected InvalidItem");
        };
        assert_eq!(location, "docs[0].items[1]");
    }
}
