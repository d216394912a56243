//! Sidebars config validation.
//!
//! Rejects malformed configs before normalization so later stages can rely
//! on the item shapes. Every error names the sidebar and the path of the
//! offending value within it (e.g., `docs[0].items[2]`).

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::types::SidebarsConfig;

/// Keys shared by every typed item.
const BASE_KEYS: &[&str] = &["type", "className", "customProps"];
const DOC_KEYS: &[&str] = &["id", "label"];
const LINK_KEYS: &[&str] = &["href", "label", "description"];
const HTML_KEYS: &[&str] = &["value", "defaultStyle", "key"];
const AUTOGENERATED_KEYS: &[&str] = &["dirName"];
const CATEGORY_KEYS: &[&str] = &[
    "label",
    "items",
    "collapsed",
    "collapsible",
    "link",
    "description",
    "key",
];
const DOC_LINK_KEYS: &[&str] = &["type", "id"];
const GENERATED_INDEX_KEYS: &[&str] = &[
    "type",
    "slug",
    "title",
    "description",
    "keywords",
    "image",
];

/// Check that every sidebar in `config` is well formed.
///
/// # Errors
///
/// Returns the first shape violation found, in sidebar and item order.
pub fn validate_sidebars(config: &SidebarsConfig) -> Result<(), ValidationError> {
    for (name, value) in config {
        let validator = Validator { sidebar: name };
        validator.sidebar(value)?;
    }
    Ok(())
}

struct Validator<'a> {
    sidebar: &'a str,
}

impl Validator<'_> {
    fn error(&self, location: &str, message: impl Into<String>) -> ValidationError {
        ValidationError {
            sidebar: self.sidebar.to_owned(),
            location: location.to_owned(),
            message: message.into(),
        }
    }

    fn sidebar(&self, value: &Value) -> Result<(), ValidationError> {
        match value {
            Value::Array(items) => self.items(self.sidebar, items),
            Value::Object(shorthand) => {
                for (label, items) in shorthand {
                    self.shorthand_entry(self.sidebar, label, items)?;
                }
                Ok(())
            }
            _ => Err(self.error(
                self.sidebar,
                "sidebar must be an array of items or an object of categories",
            )),
        }
    }

    fn items(&self, location: &str, items: &[Value]) -> Result<(), ValidationError> {
        for (i, item) in items.iter().enumerate() {
            self.item(&format!("{location}[{i}]"), item)?;
        }
        Ok(())
    }

    fn shorthand_entry(
        &self,
        location: &str,
        label: &str,
        items: &Value,
    ) -> Result<(), ValidationError> {
        let location = format!("{location}[\"{label}\"]");
        let Value::Array(items) = items else {
            return Err(self.error(
                &location,
                format!("category shorthand '{label}' must map to an array of items"),
            ));
        };
        self.items(&location, items)
    }

    fn item(&self, location: &str, item: &Value) -> Result<(), ValidationError> {
        match item {
            Value::String(_) => Ok(()),
            Value::Object(object) => match object.get("type") {
                Some(Value::String(kind)) => self.typed_item(location, kind, object),
                Some(_) => Err(self.error(location, "field 'type' must be a string")),
                None => {
                    let mut entries = object.iter();
                    match (entries.next(), entries.next()) {
                        (Some((label, items)), None) => {
                            self.shorthand_entry(location, label, items)
                        }
                        _ => Err(self.error(
                            location,
                            "category shorthand must have exactly one key",
                        )),
                    }
                }
            },
            _ => Err(self.error(location, "item must be a string or an object")),
        }
    }

    fn typed_item(
        &self,
        location: &str,
        kind: &str,
        object: &Map<String, Value>,
    ) -> Result<(), ValidationError> {
        let extra_keys = match kind {
            "doc" | "ref" => DOC_KEYS,
            "link" => LINK_KEYS,
            "html" => HTML_KEYS,
            "autogenerated" => AUTOGENERATED_KEYS,
            "category" => CATEGORY_KEYS,
            _ => return Err(self.error(location, format!("unknown item type '{kind}'"))),
        };
        self.known_keys(location, kind, object, |key| {
            BASE_KEYS.contains(&key) || extra_keys.contains(&key)
        })?;
        self.optional_string(location, object, "className")?;
        self.optional_object(location, object, "customProps")?;

        match kind {
            "doc" | "ref" => {
                self.required_string(location, object, "id")?;
                self.optional_string(location, object, "label")?;
            }
            "link" => {
                self.required_string(location, object, "href")?;
                self.required_string(location, object, "label")?;
                self.optional_string(location, object, "description")?;
            }
            "html" => {
                self.required_string(location, object, "value")?;
                self.optional_bool(location, object, "defaultStyle")?;
                self.optional_string(location, object, "key")?;
            }
            "autogenerated" => {
                let dir_name = self.required_string(location, object, "dirName")?;
                if dir_name.starts_with('/') {
                    return Err(self.error(
                        location,
                        format!("dirName '{dir_name}' must be relative to the docs root"),
                    ));
                }
            }
            _ => self.category(location, object)?,
        }
        Ok(())
    }

    fn category(&self, location: &str, object: &Map<String, Value>) -> Result<(), ValidationError> {
        self.required_string(location, object, "label")?;
        self.optional_bool(location, object, "collapsed")?;
        self.optional_bool(location, object, "collapsible")?;
        self.optional_string(location, object, "description")?;
        self.optional_string(location, object, "key")?;

        if let Some(link) = object.get("link") {
            self.category_link(&format!("{location}.link"), link)?;
        }

        match object.get("items") {
            None => Ok(()),
            Some(Value::Array(items)) => self.items(&format!("{location}.items"), items),
            Some(_) => Err(self.error(location, "field 'items' must be an array")),
        }
    }

    fn category_link(&self, location: &str, link: &Value) -> Result<(), ValidationError> {
        let Value::Object(object) = link else {
            return Err(self.error(location, "category link must be an object"));
        };
        match object.get("type").and_then(Value::as_str) {
            Some("doc") => {
                self.known_keys(location, "doc", object, |key| DOC_LINK_KEYS.contains(&key))?;
                self.required_string(location, object, "id")?;
            }
            Some("generated-index") => {
                self.known_keys(location, "generated-index", object, |key| {
                    GENERATED_INDEX_KEYS.contains(&key)
                })?;
                for field in ["slug", "title", "description", "image"] {
                    self.optional_string(location, object, field)?;
                }
                match object.get("keywords") {
                    None => {}
                    Some(Value::Array(keywords)) if keywords.iter().all(Value::is_string) => {}
                    Some(_) => {
                        return Err(
                            self.error(location, "field 'keywords' must be an array of strings")
                        );
                    }
                }
            }
            _ => {
                return Err(self.error(
                    location,
                    "category link type must be 'doc' or 'generated-index'",
                ));
            }
        }
        Ok(())
    }

    fn known_keys(
        &self,
        location: &str,
        kind: &str,
        object: &Map<String, Value>,
        allowed: impl Fn(&str) -> bool,
    ) -> Result<(), ValidationError> {
        match object.keys().find(|key| !allowed(key.as_str())) {
            Some(key) => Err(self.error(
                location,
                format!("unknown field '{key}' for item type '{kind}'"),
            )),
            None => Ok(()),
        }
    }

    fn required_string<'v>(
        &self,
        location: &str,
        object: &'v Map<String, Value>,
        field: &str,
    ) -> Result<&'v str, ValidationError> {
        match object.get(field) {
            Some(Value::String(value)) => Ok(value),
            Some(_) => Err(self.error(location, format!("field '{field}' must be a string"))),
            None => Err(self.error(location, format!("missing required field '{field}'"))),
        }
    }

    fn optional_string(
        &self,
        location: &str,
        object: &Map<String, Value>,
        field: &str,
    ) -> Result<(), ValidationError> {
        match object.get(field) {
            None | Some(Value::String(_)) => Ok(()),
            Some(_) => Err(self.error(location, format!("field '{field}' must be a string"))),
        }
    }

    fn optional_bool(
        &self,
        location: &str,
        object: &Map<String, Value>,
        field: &str,
    ) -> Result<(), ValidationError> {
        match object.get(field) {
            None | Some(Value::Bool(_)) => Ok(()),
            Some(_) => Err(self.error(location, format!("field '{field}' must be a boolean"))),
        }
    }

    fn optional_object(
        &self,
        location: &str,
        object: &Map<String, Value>,
        field: &str,
    ) -> Result<(), ValidationError> {
        match object.get(field) {
            None | Some(Value::Object(_)) => Ok(()),
            Some(_) => Err(self.error(location, format!("field '{field}' must be an object"))),
        }
    }
}
