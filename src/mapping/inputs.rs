//! Mutation input shapes of the remote platform
//!
//! Field names serialize in the platform's camelCase. Money and weight amounts are
//! decimals on our side and JSON numbers on the wire.

use rust_decimal::Decimal;
use serde::Serialize;

/// `{key, value}` pair stored in the platform's public metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataItem {
    pub key: String,
    pub value: String,
}

impl MetadataItem {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Input of `categoryCreate`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
    pub slug: String,
    /// Rich-text JSON document, or `""` when the source has no text
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
    /// Remote parent id; sent as the mutation's separate `parent` argument
    #[serde(skip)]
    pub parent: Option<String>,
}

/// Input of `productTypeCreate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTypeInput {
    pub name: String,
    pub slug: String,
    pub has_variants: bool,
    pub is_shipping_required: bool,
    /// Weight unit of products of this type
    pub weight: String,
}

/// Input of `productCreate`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    /// Omitted when empty so the platform derives one from the name
    #[serde(skip_serializing_if = "String::is_empty")]
    pub slug: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub weight: Decimal,
    pub visible: bool,
    pub metadata: Vec<MetadataItem>,
}

/// Input of `productVariantCreate`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantInput {
    /// Remote product id, filled in by the exporter once the product exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    pub name: String,
    pub sku: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub cost_price: Decimal,
    pub track_inventory: bool,
    #[serde(with = "rust_decimal::serde::float")]
    pub weight: Decimal,
    pub metadata: Vec<MetadataItem>,
}

/// One element of `productVariantChannelListingUpdate(input: [...])`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelListingInput {
    pub channel_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub cost_price: Decimal,
}
