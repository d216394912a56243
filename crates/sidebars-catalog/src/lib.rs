//! Document catalog abstraction for sidebar processing.
//!
//! This crate provides a [`DocCatalog`] trait for looking up the documents and
//! directory metadata that autogenerated sidebars and doc references resolve
//! against. This enables:
//!
//! - **Unit testing** of sidebar processing without touching the real filesystem
//! - **Backend flexibility** (filesystem scan, prebuilt indexes, remote content)
//! - **Clean separation** between sidebar logic and I/O operations
//!
//! # Architecture
//!
//! The crate provides:
//! - [`DocCatalog`] trait with async `docs_in_dir()`, `doc()`, and `category_metadata()`
//! - [`FsCatalog`] implementation that scans a docs directory once on open
//! - [`MockCatalog`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use sidebars_catalog::{DocCatalog, FsCatalog};
//!
//! let catalog = FsCatalog::open(PathBuf::from("docs"), "/docs")?;
//! for doc in catalog.docs_in_dir("guides").await? {
//!     println!("{}: {}", doc.id, doc.title);
//! }
//! ```

mod catalog;
mod front_matter;
mod fs;
mod index;
mod metadata;
#[cfg(feature = "mock")]
mod mock;
mod number_prefix;

pub use catalog::{CatalogError, CatalogErrorKind, DocCatalog, DocRecord, ErrorStatus};
pub use front_matter::FrontMatterError;
pub use fs::FsCatalog;
pub use index::CatalogIndex;
pub use metadata::{CategoryLinkMetadata, CategoryMetadata};
#[cfg(feature = "mock")]
pub use mock::MockCatalog;
pub use number_prefix::{NumberPrefix, strip_number_prefix};
