//! Exporter configuration types

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::source::ProductFilter;

/// Product type created on the remote platform before products
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductTypeSeed {
    pub name: String,
    pub slug: String,
}

impl ProductTypeSeed {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
        }
    }

    /// Flowers, Compositions and Bouquets
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("Flowers", "flowers"),
            Self::new("Compositions", "compositions"),
            Self::new("Bouquets", "bouquets"),
        ]
    }
}

/// Settings of one [`Exporter`](super::Exporter)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExporterConfig {
    /// Products per progress batch
    pub batch_size: usize,
    /// Pause after each entity mutation, in seconds
    pub delay_secs: f64,
    /// Product types seeded by the product type stage
    pub product_types: Vec<ProductTypeSeed>,
    /// Product type assigned to every product
    pub default_product_type: String,
    /// Publish variant prices to a sales channel after creating them
    pub channel_pricing: bool,
    /// Channel for variant prices; first active channel when `None`
    pub channel_id: Option<String>,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            batch_size: 10,
            delay_secs: 1.0,
            product_types: ProductTypeSeed::defaults(),
            default_product_type: "Flowers".to_string(),
            channel_pricing: false,
            channel_id: None,
        }
    }
}

impl ExporterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_delay_secs(mut self, delay_secs: f64) -> Self {
        self.delay_secs = delay_secs;
        self
    }

    /// Disable pacing entirely
    pub fn without_delay(self) -> Self {
        self.with_delay_secs(0.0)
    }

    pub fn with_product_types(mut self, product_types: Vec<ProductTypeSeed>) -> Self {
        self.product_types = product_types;
        self
    }

    pub fn with_default_product_type(mut self, name: impl Into<String>) -> Self {
        self.default_product_type = name.into();
        self
    }

    /// Enable channel pricing, optionally pinned to one channel
    pub fn with_channel_pricing(mut self, channel_id: Option<String>) -> Self {
        self.channel_pricing = true;
        self.channel_id = channel_id;
        self
    }

    /// Pause between entity mutations; no pause for a delay `validate` rejects
    pub fn delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.delay_secs).unwrap_or(Duration::ZERO)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("Batch size must be greater than zero".to_string());
        }
        if let Err(e) = Duration::try_from_secs_f64(self.delay_secs) {
            return Err(format!(
                "Delay must be a non-negative number of seconds, got {}: {}",
                self.delay_secs, e
            ));
        }
        if self.default_product_type.trim().is_empty() {
            return Err("Default product type name is required".to_string());
        }
        if let Some(seed) = self
            .product_types
            .iter()
            .find(|seed| seed.name.trim().is_empty() || seed.slug.trim().is_empty())
        {
            return Err(format!("Product type seed needs a name and a slug: {:?}", seed));
        }
        if self
            .channel_id
            .as_deref()
            .is_some_and(|channel| channel.trim().is_empty())
        {
            return Err("Channel id must not be empty".to_string());
        }
        Ok(())
    }
}

/// What a single [`Exporter::export_all`](super::Exporter::export_all) run covers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub export_categories: bool,
    pub create_product_types: bool,
    /// Only these product ids
    pub product_ids: Option<Vec<i64>>,
    /// At most this many products
    pub limit: Option<usize>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            export_categories: true,
            create_product_types: true,
            product_ids: None,
            limit: None,
        }
    }
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories(mut self, enabled: bool) -> Self {
        self.export_categories = enabled;
        self
    }

    pub fn with_product_types(mut self, enabled: bool) -> Self {
        self.create_product_types = enabled;
        self
    }

    pub fn with_product_ids(mut self, ids: Vec<i64>) -> Self {
        self.product_ids = Some(ids);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Product selection handed to the catalog source
    pub fn product_filter(&self) -> ProductFilter {
        ProductFilter {
            ids: self.product_ids.clone(),
            limit: self.limit,
        }
    }
}

/// Lifecycle of an export run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportState {
    Init,
    ConnectionVerified,
    CategoriesExported,
    ProductTypesReady,
    ProductsExported,
    Reported,
    Success,
    Failed,
}

impl ExportState {
    /// Get state name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::ConnectionVerified => "connection_verified",
            Self::CategoriesExported => "categories_exported",
            Self::ProductTypesReady => "product_types_ready",
            Self::ProductsExported => "products_exported",
            Self::Reported => "reported",
            Self::Success => "success",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for ExportState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
