//! Category metadata types for catalog backends.
//!
//! Provides [`CategoryMetadata`], the per-directory settings read from
//! `_category_.json` / `_category_.yml` files. This module contains only data
//! types; locating and parsing the files is done by individual backends.

use serde::{Deserialize, Deserializer, Serialize};

/// Directory-level category settings.
///
/// All fields are optional. `None` means the field was not set and the
/// value derived from the directory contents applies.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CategoryMetadata {
    /// Category label (overrides the directory name).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Sort position among siblings (overrides the directory number prefix).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,

    /// Whether the category starts collapsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,

    /// Whether the category can be collapsed at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsible: Option<bool>,

    /// CSS class applied to the category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,

    /// Arbitrary props forwarded to the renderer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_props: Option<serde_json::Value>,

    /// Category description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Category link.
    ///
    /// - `None` - not set, an index doc in the directory becomes the link
    /// - `Some(None)` - explicitly `null`, the category has no link
    /// - `Some(Some(link))` - explicit link
    #[serde(
        default,
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub link: Option<Option<CategoryLinkMetadata>>,
}

/// Link declared in category metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", deny_unknown_fields)]
pub enum CategoryLinkMetadata {
    /// Link to an existing document.
    Doc {
        /// Document id.
        id: String,
    },
    /// Link to a generated index page listing the category items.
    #[serde(rename_all = "camelCase")]
    GeneratedIndex {
        /// URL slug (defaults to `/category/<category id>`).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        slug: Option<String>,
        /// Page title.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        /// Page description.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        /// Keywords for the page `<meta>` tags.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        keywords: Vec<String>,
        /// Social card image.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image: Option<String>,
    },
}

/// Distinguish an explicit `null` from an absent field.
fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl CategoryMetadata {
    /// Check if metadata has any non-default values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.label.is_none()
            && self.position.is_none()
            && self.collapsed.is_none()
            && self.collapsible.is_none()
            && self.class_name.is_none()
            && self.custom_props.is_none()
            && self.description.is_none()
            && self.link.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_default_is_empty() {
        assert!(CategoryMetadata::default().is_empty());
    }

    #[test]
    fn test_is_empty_with_label() {
        let meta = CategoryMetadata {
            label: Some("Guides".to_owned()),
            ..Default::default()
        };
        assert!(!meta.is_empty());
    }

    #[test]
    fn test_parse_json_metadata() {
        let json = r#"{"label": "Guides", "position": 2, "collapsed": false, "className": "red"}"#;
        let meta: CategoryMetadata = serde_json::from_str(json).unwrap();

        assert_eq!(meta.label.as_deref(), Some("Guides"));
        assert_eq!(meta.position, Some(2.0));
        assert_eq!(meta.collapsed, Some(false));
        assert_eq!(meta.class_name.as_deref(), Some("red"));
        assert!(meta.link.is_none());
    }

    #[test]
    fn test_parse_yaml_doc_link() {
        let yaml = "label: API\nlink:\n  type: doc\n  id: api/overview\n";
        let meta: CategoryMetadata = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(
            meta.link,
            Some(Some(CategoryLinkMetadata::Doc {
                id: "api/overview".to_owned()
            }))
        );
    }

    #[test]
    fn test_parse_generated_index_link() {
        let yaml = "link:\n  type: generated-index\n  slug: /all-guides\n  title: All guides\n";
        let meta: CategoryMetadata = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(
            meta.link,
            Some(Some(CategoryLinkMetadata::GeneratedIndex {
                slug: Some("/all-guides".to_owned()),
                title: Some("All guides".to_owned()),
                description: None,
                keywords: Vec::new(),
                image: None,
            }))
        );
    }

    #[test]
    fn test_parse_explicit_null_link() {
        let meta: CategoryMetadata = serde_json::from_str(r#"{"link": null}"#).unwrap();

        assert_eq!(meta.link, Some(None));
        assert!(!meta.is_empty());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<CategoryMetadata, _> = serde_json::from_str(r#"{"lable": "Typo"}"#);

        assert!(result.is_err());
    }
}
