//! Configuration for sidebar loading.
//!
//! Parses `docs.toml` files with serde and provides auto-discovery of config
//! files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Example
//!
//! ```toml
//! [docs]
//! source_dir = "docs"
//! sidebar_path = "sidebars.yaml"   # or false; omitted = default sidebars
//!
//! [sidebar]
//! collapsible = true
//! collapsed = true
//! sort = "position"                # position | file-name | title
//! broken_references = "warn"       # ignore | warn | throw
//!
//! [version]
//! name = "current"
//! path = "/docs"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `docs.source_dir`
//! - `docs.sidebar_path`
//! - `version.name`
//! - `version.path`

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;
use sidebars_core::{
    BrokenReferenceSeverity, LoadOptions, SidebarOptions, SidebarPath, SortPolicy, Version,
    resolve_sidebar_path,
};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docs.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override sidebars file.
    pub sidebar_path: Option<SidebarPath>,
    /// Override autogenerated sort order.
    pub sort: Option<SortPolicy>,
    /// Override broken reference handling.
    pub broken_references: Option<BrokenReferenceSeverity>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Docs configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Sidebar behavior.
    pub sidebar: SidebarOptions,
    /// Version the sidebars belong to.
    pub version: Version,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct DocsConfigRaw {
    source_dir: Option<PathBuf>,
    sidebar_path: SidebarPath,
}

/// Resolved docs configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Root directory of the document catalog.
    pub source_dir: PathBuf,
    /// Sidebars file, resolved against the config directory.
    pub sidebar_path: SidebarPath,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.sidebar_path`").
        field: String,
        /// Error message (e.g., "${`SIDEBARS`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docs.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            tracing::debug!(path = %discovered.display(), "Discovered config file");
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Options for [`sidebars_core::load_sidebars`].
    #[must_use]
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            version: self.version.clone(),
            sidebar_options: self.sidebar.clone(),
        }
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(sidebar_path) = &settings.sidebar_path {
            self.docs_resolved.sidebar_path.clone_from(sidebar_path);
        }
        if let Some(sort) = settings.sort {
            self.sidebar.sort = sort;
        }
        if let Some(broken_references) = settings.broken_references {
            self.sidebar.broken_references = broken_references;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            sidebar: SidebarOptions::default(),
            version: Version::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                sidebar_path: SidebarPath::Default,
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.version.name, "version.name")?;
        if !self.version.path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "version.path must start with '/', got '{}'",
                self.version.path
            )));
        }
        if let SidebarPath::File(path) = &self.docs_resolved.sidebar_path
            && path.as_os_str().is_empty()
        {
            return Err(ConfigError::Validation(
                "docs.sidebar_path cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(source_dir) = &mut self.docs.source_dir {
            expand::expand_path(source_dir, "docs.source_dir")?;
        }
        expand::expand_sidebar_path(&mut self.docs.sidebar_path)?;
        expand::expand_version(&mut self.version)
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.docs_resolved = DocsConfig {
            source_dir: config_dir.join(
                self.docs
                    .source_dir
                    .as_deref()
                    .unwrap_or(Path::new("docs")),
            ),
            sidebar_path: resolve_sidebar_path(config_dir, self.docs.sidebar_path.clone()),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(config.docs_resolved.sidebar_path, SidebarPath::Default);
        assert_eq!(config.sidebar, SidebarOptions::default());
        assert_eq!(config.version, Version::default());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.docs.sidebar_path, SidebarPath::Default);
        assert!(config.sidebar.collapsible);
        assert_eq!(config.version.path, "/docs");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[docs]
source_dir = "content"
sidebar_path = "sidebars.yaml"

[sidebar]
collapsible = false
sort = "title"
broken_references = "throw"

[version]
name = "1.0"
path = "/docs/1.0"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.docs.source_dir.as_deref(), Some(Path::new("content")));
        assert_eq!(
            config.docs.sidebar_path,
            SidebarPath::File(PathBuf::from("sidebars.yaml"))
        );
        assert!(!config.sidebar.collapsible);
        assert!(config.sidebar.collapsed);
        assert_eq!(config.sidebar.sort, SortPolicy::Title);
        assert_eq!(
            config.sidebar.broken_references,
            BrokenReferenceSeverity::Throw
        );
        assert_eq!(config.version.name, "1.0");
    }

    #[test]
    fn test_parse_disabled_sidebars() {
        let config: Config = toml::from_str("[docs]\nsidebar_path = false").unwrap();
        assert_eq!(config.docs.sidebar_path, SidebarPath::Disabled);
    }

    #[test]
    fn test_parse_unknown_field_rejected() {
        let result: Result<Config, _> = toml::from_str("[docs]\nsidebars = \"x\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[docs]
source_dir = "documentation"
sidebar_path = "config/sidebars.json"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/project/documentation")
        );
        assert_eq!(
            config.docs_resolved.sidebar_path,
            SidebarPath::File(PathBuf::from("/project/config/sidebars.json"))
        );
    }

    #[test]
    fn test_resolve_paths_keeps_disabled() {
        let mut config: Config = toml::from_str("[docs]\nsidebar_path = false").unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.docs_resolved.sidebar_path, SidebarPath::Disabled);
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let settings = CliSettings {
            source_dir: Some(PathBuf::from("/other/docs")),
            sidebar_path: Some(SidebarPath::Disabled),
            sort: Some(SortPolicy::FileName),
            broken_references: Some(BrokenReferenceSeverity::Ignore),
        };

        config.apply_cli_settings(&settings);

        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/other/docs"));
        assert_eq!(config.docs_resolved.sidebar_path, SidebarPath::Disabled);
        assert_eq!(config.sidebar.sort, SortPolicy::FileName);
        assert_eq!(
            config.sidebar.broken_references,
            BrokenReferenceSeverity::Ignore
        );
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(config.sidebar, SidebarOptions::default());
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SIDEBARS_CONFIG_TEST_VERSION", "2.0");
        }

        let toml = r#"
[docs]
sidebar_path = "${SIDEBARS_CONFIG_TEST_FILE:-sidebars.json}"

[version]
name = "${SIDEBARS_CONFIG_TEST_VERSION}"
path = "/docs/${SIDEBARS_CONFIG_TEST_VERSION}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(
            config.docs.sidebar_path,
            SidebarPath::File(PathBuf::from("sidebars.json"))
        );
        assert_eq!(config.version.name, "2.0");
        assert_eq!(config.version.path, "/docs/2.0");

        unsafe {
            std::env::remove_var("SIDEBARS_CONFIG_TEST_VERSION");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("SIDEBARS_CONFIG_TEST_MISSING");
        }

        let mut config: Config =
            toml::from_str("[docs]\nsource_dir = \"${SIDEBARS_CONFIG_TEST_MISSING}\"").unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("docs.source_dir"));
    }

    #[test]
    fn test_validate_version_path() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.version.path = "docs".to_owned();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("version.path"));
    }

    #[test]
    fn test_validate_version_name() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.version.name = String::new();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("docs.toml");
        std::fs::write(
            &path,
            "[docs]\nsidebar_path = \"sidebars.yaml\"\n\n[sidebar]\nsort = \"file-name\"\n",
        )
        .unwrap();

        let settings = CliSettings {
            broken_references: Some(BrokenReferenceSeverity::Throw),
            ..Default::default()
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(config.docs_resolved.source_dir, temp.path().join("docs"));
        assert_eq!(
            config.docs_resolved.sidebar_path,
            SidebarPath::File(temp.path().join("sidebars.yaml"))
        );
        let options = config.load_options();
        assert_eq!(options.sidebar_options.sort, SortPolicy::FileName);
        assert_eq!(
            options.sidebar_options.broken_references,
            BrokenReferenceSeverity::Throw
        );
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("missing.toml");

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("docs.toml");
        std::fs::write(&path, "[docs\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
