//! Sidebars config loading.
//!
//! Turns a [`SidebarPath`] into a validated [`SidebarsConfig`]. Files are
//! read and parsed on every call so edits are picked up on reload.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

use crate::error::SidebarsError;
use crate::types::SidebarsConfig;
use crate::validation::validate_sidebars;

/// Name of the sidebar produced when no sidebars file is configured.
pub const DEFAULT_SIDEBAR_NAME: &str = "defaultSidebar";

/// Where sidebars come from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SidebarPath {
    /// Sidebars turned off (`false`).
    Disabled,
    /// No path configured: one sidebar autogenerated from the docs root.
    #[default]
    Default,
    /// Sidebars file.
    File(PathBuf),
}

impl SidebarPath {
    /// Human-readable source of the config, used in error messages.
    #[must_use]
    pub fn origin(&self) -> String {
        match self {
            Self::Disabled => "disabled sidebars".to_owned(),
            Self::Default => "built-in default sidebars".to_owned(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for SidebarPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Path(PathBuf),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Flag(false) => Ok(Self::Disabled),
            Raw::Flag(true) => Err(serde::de::Error::custom(
                "sidebar path must be a file path or false",
            )),
            Raw::Path(path) => Ok(Self::File(path)),
        }
    }
}

/// Resolve a relative sidebars file against the site directory.
///
/// `Disabled`, `Default` and absolute paths pass through unchanged.
#[must_use]
pub fn resolve_sidebar_path(site_dir: &Path, option: SidebarPath) -> SidebarPath {
    match option {
        SidebarPath::File(path) if path.is_relative() => SidebarPath::File(site_dir.join(path)),
        other => other,
    }
}

/// One sidebar autogenerated from the docs root.
#[must_use]
pub fn default_sidebars() -> SidebarsConfig {
    let mut config = SidebarsConfig::new();
    config.insert(
        DEFAULT_SIDEBAR_NAME.to_owned(),
        serde_json::json!([{ "type": "autogenerated", "dirName": "." }]),
    );
    config
}

/// No sidebars.
#[must_use]
pub fn disabled_sidebars() -> SidebarsConfig {
    SidebarsConfig::new()
}

/// Load and validate the sidebars config for `path`.
///
/// A sidebars file that does not exist yields no sidebars.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if its content
/// fails validation.
pub fn load_sidebars_file(path: &SidebarPath) -> Result<SidebarsConfig, SidebarsError> {
    let config = match path {
        SidebarPath::Disabled => disabled_sidebars(),
        SidebarPath::Default => default_sidebars(),
        SidebarPath::File(file) if !file.exists() => {
            tracing::debug!(path = %file.display(), "Sidebars file not found, sidebars disabled");
            disabled_sidebars()
        }
        SidebarPath::File(file) => read_sidebars_file(file)?,
    };

    validate_sidebars(&config).map_err(|source| SidebarsError::InvalidConfig {
        origin: path.origin(),
        source,
    })?;
    Ok(config)
}

fn read_sidebars_file(path: &Path) -> Result<SidebarsConfig, SidebarsError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let format = match extension.as_deref() {
        Some("json") => Format::Json,
        Some("yaml" | "yml") => Format::Yaml,
        Some("toml") => Format::Toml,
        _ => return Err(SidebarsError::UnsupportedFormat(path.to_path_buf())),
    };

    let content = std::fs::read_to_string(path).map_err(|source| SidebarsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parse_error = |message: String| SidebarsError::Parse {
        path: path.to_path_buf(),
        message,
    };

    let value: serde_json::Value = match format {
        Format::Json => serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?,
        Format::Yaml => serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()))?,
        Format::Toml => toml::from_str(&content).map_err(|e| parse_error(e.to_string()))?,
    };

    match value {
        serde_json::Value::Object(config) => {
            tracing::debug!(
                path = %path.display(),
                sidebars = config.len(),
                "Loaded sidebars file"
            );
            Ok(config)
        }
        _ => Err(parse_error(
            "top level must be an object of sidebar name to items".to_owned(),
        )),
    }
}

#[derive(Clone, Copy)]
enum Format {
    Json,
    Yaml,
    Toml,
}
