//! Read-only access to the legacy catalog
//!
//! Defines the [`CatalogSource`] trait the exporter reads from, and two implementations:
//! - [`InMemoryCatalog`]: records held in memory (tests, embedding applications)
//! - [`CatalogSnapshot`]: a JSON or YAML dump of the legacy tables, joined into typed records

use std::path::PathBuf;

use crate::models::{SourceCategory, SourceProduct};

pub mod memory;
pub mod snapshot;

pub use memory::InMemoryCatalog;
pub use snapshot::CatalogSnapshot;

/// Error type for catalog source operations
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Unsupported snapshot format: {0}")]
    UnsupportedFormat(String),
}

/// Product selection applied by [`CatalogSource::list_products`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Only these product ids (all products when `None`)
    pub ids: Option<Vec<i64>>,
    /// At most this many products, applied after the id filter
    pub limit: Option<usize>,
}

impl ProductFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ids(mut self, ids: Vec<i64>) -> Self {
        self.ids = Some(ids);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check whether a product id passes the id filter
    pub fn accepts(&self, id: i64) -> bool {
        self.ids.as_ref().is_none_or(|ids| ids.contains(&id))
    }
}

/// Trait for catalog sources
///
/// Implementations only read; the exporter never writes back to the legacy catalog.
pub trait CatalogSource {
    /// Categories whose parent is null or `0`
    fn list_root_categories(&self) -> Result<Vec<SourceCategory>, SourceError>;

    /// Every category that has a parent
    fn list_child_categories(&self) -> Result<Vec<SourceCategory>, SourceError>;

    /// Products having at least one price tier, ordered by id
    fn list_products(&self, filter: &ProductFilter) -> Result<Vec<SourceProduct>, SourceError>;
}

impl<T: CatalogSource + ?Sized> CatalogSource for &T {
    fn list_root_categories(&self) -> Result<Vec<SourceCategory>, SourceError> {
        (**self).list_root_categories()
    }

    fn list_child_categories(&self) -> Result<Vec<SourceCategory>, SourceError> {
        (**self).list_child_categories()
    }

    fn list_products(&self, filter: &ProductFilter) -> Result<Vec<SourceProduct>, SourceError> {
        (**self).list_products(filter)
    }
}
