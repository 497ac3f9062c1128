//! Typed records of the legacy catalog
//!
//! These are the rows the export pipeline reads from a [`CatalogSource`](crate::source::CatalogSource).

pub mod category;
pub mod product;

pub use category::SourceCategory;
pub use product::{PriceTier, SourceProduct};
