//! CLI command implementations.

mod check;
mod nav;
mod show;

pub(crate) use check::CheckArgs;
pub(crate) use nav::NavArgs;
pub(crate) use show::ShowArgs;

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use sidebars_catalog::FsCatalog;
use sidebars_config::{CliSettings, Config};
use sidebars_core::{
    BrokenReferenceSeverity, LoadOptions, LoadedSidebars, SidebarPath, SortPolicy, load_sidebars,
};

use crate::error::CliError;

/// Options shared by every command that loads sidebars.
#[derive(Args)]
pub(crate) struct LoadArgs {
    /// Path to configuration file (default: auto-discover docs.toml).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Documentation source directory.
    #[arg(short, long)]
    pub source_dir: Option<PathBuf>,

    /// Sidebars config file (JSON, YAML or TOML).
    #[arg(long, conflicts_with = "no_sidebars")]
    pub sidebars_file: Option<PathBuf>,

    /// Disable sidebars entirely.
    #[arg(long)]
    pub no_sidebars: bool,

    /// Sibling order of autogenerated items.
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,

    /// What to do with references to unknown documents.
    #[arg(long, value_enum)]
    pub broken_references: Option<SeverityArg>,
}

#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum SortArg {
    Position,
    FileName,
    Title,
}

impl From<SortArg> for SortPolicy {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Position => Self::Position,
            SortArg::FileName => Self::FileName,
            SortArg::Title => Self::Title,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum SeverityArg {
    Ignore,
    Warn,
    Throw,
}

impl From<SeverityArg> for BrokenReferenceSeverity {
    fn from(value: SeverityArg) -> Self {
        match value {
            SeverityArg::Ignore => Self::Ignore,
            SeverityArg::Warn => Self::Warn,
            SeverityArg::Throw => Self::Throw,
        }
    }
}

impl LoadArgs {
    fn cli_settings(&self) -> CliSettings {
        let sidebar_path = if self.no_sidebars {
            Some(SidebarPath::Disabled)
        } else {
            self.sidebars_file.clone().map(SidebarPath::File)
        };
        CliSettings {
            source_dir: self.source_dir.clone(),
            sidebar_path,
            sort: self.sort.map(Into::into),
            broken_references: self.broken_references.map(Into::into),
        }
    }

    /// Load the configuration with CLI overrides applied.
    pub(crate) fn config(&self) -> Result<Config, CliError> {
        Ok(Config::load(
            self.config.as_deref(),
            Some(&self.cli_settings()),
        )?)
    }

    /// Run the sidebar pipeline against the docs source directory.
    pub(crate) async fn load(
        &self,
        config: &Config,
        options: &LoadOptions,
    ) -> Result<LoadedSidebars, CliError> {
        let catalog = FsCatalog::open(
            config.docs_resolved.source_dir.clone(),
            &config.version.path,
        )?;
        tracing::debug!(
            source_dir = %config.docs_resolved.source_dir.display(),
            docs = catalog.index().len(),
            "Opened docs catalog"
        );
        Ok(load_sidebars(&config.docs_resolved.sidebar_path, options, &catalog).await?)
    }
}
