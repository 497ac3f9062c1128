//! Product and price tier records read from the legacy catalog

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product row together with its category links and price tiers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceProduct {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub announce: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Linked category ids; the first one is the primary category
    #[serde(default)]
    pub category_ids: Vec<i64>,
    #[serde(default)]
    pub price_tiers: Vec<PriceTier>,
}

impl SourceProduct {
    pub fn new(id: i64, header: impl Into<String>) -> Self {
        Self {
            id,
            header: Some(header.into()),
            title: None,
            announce: None,
            text: None,
            description: None,
            keywords: None,
            rating: None,
            color: None,
            category_ids: Vec::new(),
            price_tiers: Vec::new(),
        }
    }

    /// Link the product to a category
    pub fn with_category(mut self, category_id: i64) -> Self {
        self.category_ids.push(category_id);
        self
    }

    /// Attach a price tier
    pub fn with_tier(mut self, tier: PriceTier) -> Self {
        self.price_tiers.push(tier);
        self
    }

    /// Header, falling back to title when the header is blank
    pub fn display_name(&self) -> &str {
        non_blank(self.header.as_deref())
            .or_else(|| non_blank(self.title.as_deref()))
            .unwrap_or("")
    }

    /// First linked category, used to place the product remotely
    pub fn primary_category(&self) -> Option<i64> {
        self.category_ids.first().copied()
    }
}

/// One price tier ("complect") of a product.
///
/// `id` is the tier type id; `link_id` is the id of the association row
/// that joined the product to the tier type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceTier {
    pub id: i64,
    pub key: String,
    #[serde(default)]
    pub title: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_id: Option<i64>,
}

impl PriceTier {
    pub fn new(id: i64, key: impl Into<String>, title: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            key: key.into(),
            title: title.into(),
            price,
            image_ref: None,
            link_id: None,
        }
    }

    /// Title shown to customers, falling back to the type key
    pub fn display_title(&self) -> &str {
        non_blank(Some(self.title.as_str())).unwrap_or(&self.key)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
