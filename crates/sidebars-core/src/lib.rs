//! Sidebar loading and processing for documentation sites.
//!
//! This crate turns a sidebars file into navigation trees:
//!
//! - **Loader**: reads the sidebars file, or supplies the built-in default or
//!   disabled config ([`load_sidebars_file`])
//! - **Validator**: rejects malformed configs ([`validate_sidebars`])
//! - **Normalizer**: expands shorthands and assigns category ids
//!   ([`normalize_sidebars`])
//! - **Processor**: expands autogenerated items and resolves documents against
//!   a [`DocCatalog`] ([`process_sidebars`])
//!
//! [`SidebarsUtils`] computes previous/next navigation over the result.
//!
//! # Quick Start
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use sidebars_catalog::FsCatalog;
//! use sidebars_core::{LoadOptions, SidebarPath, SidebarsUtils, load_sidebars};
//!
//! let catalog = FsCatalog::open(PathBuf::from("docs"), "/docs")?;
//! let path = SidebarPath::File(PathBuf::from("sidebars.yaml"));
//! let loaded = load_sidebars(&path, &LoadOptions::default(), &catalog).await?;
//!
//! let utils = SidebarsUtils::new(&loaded.sidebars);
//! let nav = utils.doc_navigation("intro");
//! # Ok(())
//! # }
//! ```

mod error;
mod generator;
mod loader;
mod navigation;
mod normalization;
mod options;
mod processor;
mod slug;
mod types;
mod util;
mod validation;

use std::time::Instant;

pub use error::{BrokenReference, NormalizationError, SidebarsError, ValidationError};
pub use loader::{
    DEFAULT_SIDEBAR_NAME, SidebarPath, default_sidebars, disabled_sidebars, load_sidebars_file,
    resolve_sidebar_path,
};
pub use navigation::{DocNavigation, NavigationLink, SidebarsUtils};
pub use normalization::{NormalizeParams, normalize_sidebars};
pub use options::{BrokenReferenceSeverity, SidebarOptions, SortPolicy};
pub use processor::{ProcessParams, ProcessedSidebars, process_sidebars};
pub use sidebars_catalog::DocCatalog;
pub use slug::Slugger;
pub use types::{
    AutogeneratedItem, Category, CategoryLink, DocItem, GeneratedIndex, HtmlItem, LinkItem,
    NormalizedCategory, NormalizedItem, NormalizedSidebars, ResolvedCategoryLink, ResolvedDoc,
    SidebarItem, Sidebars, SidebarsConfig, Version,
};
pub use validation::validate_sidebars;

/// Result of [`load_sidebars`].
pub type LoadedSidebars = ProcessedSidebars;

/// Version and behavior settings for [`load_sidebars`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Version the sidebars belong to.
    pub version: Version,
    /// Global sidebar options.
    pub sidebar_options: SidebarOptions,
}

/// Load, validate and normalize the sidebars config at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated, or if
/// normalization fails.
pub fn load_normalized_sidebars(
    path: &SidebarPath,
    params: &mut NormalizeParams<'_>,
) -> Result<NormalizedSidebars, SidebarsError> {
    let config = load_sidebars_file(path)?;
    normalize_sidebars(&config, params).map_err(|source| SidebarsError::Normalization {
        origin: path.origin(),
        source,
    })
}

/// Run the whole pipeline for `path`.
///
/// Each call reads the config fresh and uses its own [`Slugger`], so repeated
/// calls over unchanged inputs yield identical trees.
///
/// # Errors
///
/// Returns an error if loading, validation or normalization fails, if a
/// catalog lookup fails, or if broken references are found under
/// [`BrokenReferenceSeverity::Throw`].
pub async fn load_sidebars<C: DocCatalog>(
    path: &SidebarPath,
    options: &LoadOptions,
    catalog: &C,
) -> Result<LoadedSidebars, SidebarsError> {
    let start = Instant::now();
    let mut slugger = Slugger::new();

    let normalized = load_normalized_sidebars(
        path,
        &mut NormalizeParams {
            slugger: &mut slugger,
            version: &options.version,
        },
    )?;

    let mut params = ProcessParams {
        catalog,
        version: &options.version,
        options: &options.sidebar_options,
        slugger: &mut slugger,
    };
    let loaded = process_sidebars(normalized, &mut params).await?;

    tracing::info!(
        origin = %path.origin(),
        version = %options.version.name,
        sidebars = loaded.sidebars.len(),
        broken_references = loaded.broken_references.len(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Sidebars loaded"
    );
    Ok(loaded)
}
