//! Sidebar behavior options.

use serde::{Deserialize, Serialize};

/// Global sidebar options shared by every sidebar of a version.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SidebarOptions {
    /// Default `collapsible` for categories that do not set it.
    pub collapsible: bool,
    /// Default `collapsed` for categories that do not set it.
    pub collapsed: bool,
    /// Sibling order of autogenerated items.
    pub sort: SortPolicy,
    /// What to do with references to unknown documents.
    pub broken_references: BrokenReferenceSeverity,
}

impl Default for SidebarOptions {
    fn default() -> Self {
        Self {
            collapsible: true,
            collapsed: true,
            sort: SortPolicy::default(),
            broken_references: BrokenReferenceSeverity::default(),
        }
    }
}

/// Ordering of autogenerated siblings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortPolicy {
    /// Positioned items first (ascending), then by file name.
    #[default]
    Position,
    /// File name only, ignoring positions.
    FileName,
    /// Label only, ignoring positions.
    Title,
}

/// Handling of references to documents missing from the catalog.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BrokenReferenceSeverity {
    /// Flag the item and attach the reference to the result.
    Ignore,
    /// Same as `Ignore`, plus a warning log per reference.
    #[default]
    Warn,
    /// Fail the load with every broken reference aggregated.
    Throw,
}
