//! Catalog snapshot files
//!
//! A snapshot is a dump of the four legacy tables the exporter reads:
//!
//! ```yaml
//! categories:
//!   - { id: 1, title: "Roses", parent_id: 0 }
//! tier_types:
//!   - { id: 1, key: "standard", title: "Standard" }
//! products:
//!   - { id: 10, header: "Red roses", category_ids: [1] }
//! product_tiers:
//!   - { id: 100, product_id: 10, tier_type_id: 1, price: 25.00 }
//! ```
//!
//! Loading joins `product_tiers` with `tier_types` into [`PriceTier`] records attached
//! to their products, the same inner join the legacy product query performed.

use std::collections::HashMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{InMemoryCatalog, SourceError};
use crate::models::{PriceTier, SourceCategory, SourceProduct};

/// A price tier type ("complect") row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TierType {
    pub id: i64,
    /// Type key such as `standard`, `small` or `lux`
    pub key: String,
    #[serde(default)]
    pub title: String,
}

/// Association row joining a product to a tier type with its price
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductTierLink {
    pub id: i64,
    pub product_id: i64,
    pub tier_type_id: i64,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

/// Raw snapshot of the legacy catalog tables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub categories: Vec<SourceCategory>,
    #[serde(default)]
    pub tier_types: Vec<TierType>,
    /// Products without tiers; tiers are attached from `product_tiers` on load
    #[serde(default)]
    pub products: Vec<SourceProduct>,
    #[serde(default)]
    pub product_tiers: Vec<ProductTierLink>,
}

impl CatalogSnapshot {
    /// Read a snapshot from a `.json`, `.yaml` or `.yml` file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SourceError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            SourceError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Self::from_json(&content),
            "yaml" | "yml" => Self::from_yaml(&content),
            other => Err(SourceError::UnsupportedFormat(format!(
                "'{}' (expected .json, .yaml or .yml)",
                other
            ))),
        }
    }

    pub fn from_json(content: &str) -> Result<Self, SourceError> {
        serde_json::from_str(content).map_err(|e| {
            SourceError::SerializationError(format!("Failed to parse JSON snapshot: {}", e))
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, SourceError> {
        serde_yaml::from_str(content).map_err(|e| {
            SourceError::SerializationError(format!("Failed to parse YAML snapshot: {}", e))
        })
    }

    /// Join the tables into typed records.
    ///
    /// Links pointing at an unknown tier type or product are dropped with a warning.
    pub fn into_catalog(self) -> InMemoryCatalog {
        let tier_types: HashMap<i64, TierType> =
            self.tier_types.into_iter().map(|t| (t.id, t)).collect();

        let mut products: Vec<SourceProduct> = self.products;
        let positions: HashMap<i64, usize> = products
            .iter()
            .enumerate()
            .map(|(index, product)| (product.id, index))
            .collect();

        for link in self.product_tiers {
            let Some(tier_type) = tier_types.get(&link.tier_type_id) else {
                warn!(
                    link_id = link.id,
                    tier_type_id = link.tier_type_id,
                    "Dropping price tier link with unknown tier type"
                );
                continue;
            };
            let Some(&position) = positions.get(&link.product_id) else {
                warn!(
                    link_id = link.id,
                    product_id = link.product_id,
                    "Dropping price tier link with unknown product"
                );
                continue;
            };

            products[position].price_tiers.push(PriceTier {
                id: tier_type.id,
                key: tier_type.key.clone(),
                title: tier_type.title.clone(),
                price: link.price.unwrap_or(Decimal::ZERO),
                image_ref: link.image_ref,
                link_id: Some(link.id),
            });
        }

        debug!(
            categories = self.categories.len(),
            products = products.len(),
            "Snapshot joined"
        );

        InMemoryCatalog::from_records(self.categories, products)
    }
}
