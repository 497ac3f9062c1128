//! In-memory catalog source

use super::{CatalogSource, ProductFilter, SourceError};
use crate::models::{SourceCategory, SourceProduct};

/// Catalog held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    categories: Vec<SourceCategory>,
    products: Vec<SourceProduct>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from already-loaded records
    pub fn from_records(categories: Vec<SourceCategory>, products: Vec<SourceProduct>) -> Self {
        Self {
            categories,
            products,
        }
    }

    pub fn with_category(mut self, category: SourceCategory) -> Self {
        self.categories.push(category);
        self
    }

    pub fn with_product(mut self, product: SourceProduct) -> Self {
        self.products.push(product);
        self
    }

    pub fn categories(&self) -> &[SourceCategory] {
        &self.categories
    }

    pub fn products(&self) -> &[SourceProduct] {
        &self.products
    }

    fn categories_where(&self, root: bool) -> Vec<SourceCategory> {
        let mut selected: Vec<SourceCategory> = self
            .categories
            .iter()
            .filter(|c| c.is_root() == root)
            .cloned()
            .collect();
        selected.sort_by_key(|c| c.id);
        selected
    }
}

impl CatalogSource for InMemoryCatalog {
    fn list_root_categories(&self) -> Result<Vec<SourceCategory>, SourceError> {
        Ok(self.categories_where(true))
    }

    fn list_child_categories(&self) -> Result<Vec<SourceCategory>, SourceError> {
        Ok(self.categories_where(false))
    }

    fn list_products(&self, filter: &ProductFilter) -> Result<Vec<SourceProduct>, SourceError> {
        let mut selected: Vec<SourceProduct> = self
            .products
            .iter()
            .filter(|p| !p.price_tiers.is_empty() && filter.accepts(p.id))
            .cloned()
            .collect();
        selected.sort_by_key(|p| p.id);

        if let Some(limit) = filter.limit {
            selected.truncate(limit);
        }
        Ok(selected)
    }
}
