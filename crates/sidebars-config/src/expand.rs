//! `${VAR}` expansion for `docs.toml` values.
//!
//! Expansion runs on the typed fields after parsing, before relative paths
//! are resolved. `${VAR:-default}` falls back to `default` when `VAR` is unset.

use std::path::PathBuf;

use sidebars_core::{SidebarPath, Version};

use crate::ConfigError;

/// Expand variable references in `value`, naming `field` on failure.
pub(crate) fn expand_string(value: &mut String, field: &str) -> Result<(), ConfigError> {
    if !value.contains("${") {
        return Ok(());
    }
    let expanded = shellexpand::env_with_context(value.as_str(), |var| {
        std::env::var(var).map(Some)
    })
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.var_name),
    })?;
    *value = expanded.into_owned();
    Ok(())
}

/// Expand variable references in a path.
///
/// Non-UTF-8 paths are left untouched.
pub(crate) fn expand_path(path: &mut PathBuf, field: &str) -> Result<(), ConfigError> {
    let Some(raw) = path.to_str() else {
        return Ok(());
    };
    let mut raw = raw.to_owned();
    expand_string(&mut raw, field)?;
    *path = PathBuf::from(raw);
    Ok(())
}

/// Expand the sidebars file location; disabled and default locators pass through.
pub(crate) fn expand_sidebar_path(sidebar_path: &mut SidebarPath) -> Result<(), ConfigError> {
    match sidebar_path {
        SidebarPath::File(path) => expand_path(path, "docs.sidebar_path"),
        SidebarPath::Disabled | SidebarPath::Default => Ok(()),
    }
}

/// Expand the version name and route base.
pub(crate) fn expand_version(version: &mut Version) -> Result<(), ConfigError> {
    expand_string(&mut version.name, "version.name")?;
    expand_string(&mut version.path, "version.path")
}
