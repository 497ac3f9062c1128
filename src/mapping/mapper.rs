//! Source record to mutation input conversion
//!
//! Every function here is pure: no remote lookups, no clock, no randomness.
//! Remote ids the inputs depend on are resolved by the exporter and passed in.

use rust_decimal::Decimal;
use serde_json::json;

use super::inputs::{
    CategoryInput, ChannelListingInput, MetadataItem, ProductInput, ProductTypeInput, VariantInput,
};
use super::slug::slugify;
use crate::models::{PriceTier, SourceCategory, SourceProduct};

/// Weight of a product when the platform needs one, in kilograms
pub const PRODUCT_WEIGHT: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Wrap text paragraphs in the platform's rich-text document.
///
/// Blank parts are dropped; the rest are joined by a blank line into a single
/// paragraph block. With nothing left the block holds an empty text, since the
/// platform parses the field as JSON.
pub fn rich_text_description<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> String {
    let texts: Vec<&str> = parts
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect();

    json!({
        "blocks": [
            {
                "type": "paragraph",
                "data": { "text": texts.join("\n\n") }
            }
        ]
    })
    .to_string()
}

/// Shipping weight of a price tier by its type key
pub fn variant_weight(tier_key: &str) -> Decimal {
    match tier_key {
        "small" => Decimal::new(3, 1),
        "lux" => Decimal::new(8, 1),
        _ => Decimal::new(5, 1),
    }
}

/// Estimated cost price: 60% of the sale price, rounded to cents
pub fn cost_price(price: Decimal) -> Decimal {
    (price * Decimal::new(6, 1)).round_dp(2)
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub fn map_category(category: &SourceCategory, parent_remote_id: Option<&str>) -> CategoryInput {
    let slug = match category.explicit_slug() {
        Some(slug) => slug.to_string(),
        None => slugify(&category.title),
    };

    CategoryInput {
        name: category.title.clone(),
        slug,
        description: rich_text_description([category.announce.as_deref()]),
        seo_title: non_blank(category.seo_title.as_deref()),
        seo_description: non_blank(category.seo_description.as_deref()),
        parent: parent_remote_id.map(str::to_string),
    }
}

pub fn map_product_type(name: &str, slug: &str) -> ProductTypeInput {
    ProductTypeInput {
        name: name.to_string(),
        slug: slug.to_string(),
        has_variants: true,
        is_shipping_required: true,
        weight: "GRAM".to_string(),
    }
}

/// Map a product placed in `category_remote_id`.
///
/// Metadata always carries `source_id`; `rating` and `color` only when present.
pub fn map_product(
    product: &SourceProduct,
    category_remote_id: &str,
    product_type_remote_id: Option<&str>,
) -> ProductInput {
    let name = product.display_name().to_string();

    let mut metadata = vec![MetadataItem::new("source_id", product.id.to_string())];
    if let Some(rating) = product.rating {
        metadata.push(MetadataItem::new("rating", rating.to_string()));
    }
    if let Some(color) = non_blank(product.color.as_deref()) {
        metadata.push(MetadataItem::new("color", color));
    }

    ProductInput {
        slug: slugify(&name),
        name,
        description: rich_text_description([product.announce.as_deref(), product.text.as_deref()]),
        seo_title: non_blank(product.description.as_deref()),
        seo_description: non_blank(product.keywords.as_deref()),
        category: category_remote_id.to_string(),
        product_type: product_type_remote_id.map(str::to_string),
        weight: PRODUCT_WEIGHT,
        visible: true,
        metadata,
    }
}

/// Map one price tier of a product to a variant.
///
/// The SKU is `"<product id>-<tier type id>"`, unique per product and tier type.
pub fn map_variant(product: &SourceProduct, tier: &PriceTier) -> VariantInput {
    let mut metadata = Vec::with_capacity(3);
    if let Some(link_id) = tier.link_id {
        metadata.push(MetadataItem::new("source_tier_link_id", link_id.to_string()));
    }
    metadata.push(MetadataItem::new("tier_type", tier.key.clone()));
    metadata.push(MetadataItem::new("original_price", tier.price.to_string()));

    VariantInput {
        product: None,
        name: format!("{} - {}", product.display_name(), tier.display_title()),
        sku: format!("{}-{}", product.id, tier.id),
        price: tier.price,
        cost_price: cost_price(tier.price),
        track_inventory: false,
        weight: variant_weight(&tier.key),
        metadata,
    }
}

/// Channel price listing for a created variant
pub fn map_channel_listing(channel_id: &str, variant: &VariantInput) -> ChannelListingInput {
    ChannelListingInput {
        channel_id: channel_id.to_string(),
        price: variant.price,
        cost_price: variant.cost_price,
    }
}
