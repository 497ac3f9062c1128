//! Entity mapping from legacy catalog records to remote mutation inputs
//!
//! - [`slugify`]: URL slug derivation
//! - [`inputs`]: the mutation input shapes
//! - [`mapper`]: pure conversion functions, one per entity kind

pub mod inputs;
pub mod mapper;
pub mod slug;

pub use inputs::{
    CategoryInput, ChannelListingInput, MetadataItem, ProductInput, ProductTypeInput, VariantInput,
};
pub use mapper::{
    cost_price, map_category, map_channel_listing, map_product, map_product_type, map_variant,
    rich_text_description, variant_weight,
};
pub use slug::slugify;
