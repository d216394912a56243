//! CLI error types.

use sidebars_catalog::CatalogError;
use sidebars_config::ConfigError;
use sidebars_core::SidebarsError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Catalog(#[from] CatalogError),

    #[error("{0}")]
    Sidebars(#[from] SidebarsError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),
}

impl CliError {
    /// Check whether rerunning the command can succeed without changes.
    pub(crate) fn is_temporary(&self) -> bool {
        match self {
            Self::Catalog(err) | Self::Sidebars(SidebarsError::Catalog(err)) => err.is_temporary(),
            _ => false,
        }
    }
}
