//! Dependency-ordered exporter
//!
//! Runs the stages strictly in sequence: connectivity check, categories (parents
//! before children), product types, then products in batches with their variants.
//! A failure of one entity is logged and counted; only run-level errors stop the run.

use serde_json::{Value, json};
use tracing::{debug, error, info, info_span, warn};
use uuid::Uuid;

use super::config::{ExportOptions, ExportState, ExporterConfig};
use super::error::{ExportError, ExportResult};
use super::id_mapping::IdMapping;
use super::ordering::order_child_categories;
use super::pacer::Pacer;
use super::stats::{Counter, ExportReport, RunStats};
use crate::mapping::{
    VariantInput, map_category, map_channel_listing, map_product, map_product_type, map_variant,
};
use crate::models::{SourceCategory, SourceProduct};
use crate::remote::documents::{
    CATEGORIES_QUERY, CATEGORY_CREATE, CHANNELS_QUERY, MutationSpec, PRODUCT_CREATE,
    PRODUCT_TYPE_CREATE, PRODUCT_TYPES_QUERY, PRODUCT_VARIANT_CREATE,
    VARIANT_CHANNEL_LISTING_UPDATE,
};
use crate::remote::response::{
    ChannelNode, ProductTypeNode, connection_nodes, list_items, parse_mutation, top_level_errors,
};
use crate::remote::{GraphQlTransport, MutationFailure, RemoteEntity, RemoteError};
use crate::source::CatalogSource;

/// Why a single entity was not created
#[derive(Debug, thiserror::Error)]
enum EntityFailure {
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error(transparent)]
    Rejected(#[from] MutationFailure),
}

/// Channel used for variant prices, resolved at most once per run
#[derive(Debug, Clone, PartialEq, Eq)]
enum PricingChannel {
    Unresolved,
    Active(String),
    Disabled,
}

/// Exports a legacy catalog to the remote platform.
///
/// Generic over the transport and the catalog source so runs can be driven by
/// the HTTPS client and a snapshot file, or by in-memory fakes.
///
/// # Example
///
/// ```rust,no_run
/// use catalog_export::export::{ExportOptions, Exporter, ExporterConfig};
/// use catalog_export::remote::{ClientConfig, HttpGraphQlClient};
/// use catalog_export::source::CatalogSnapshot;
///
/// let client = HttpGraphQlClient::new(
///     ClientConfig::new("https://shop.example.com/graphql/").with_token("secret"),
/// )?;
/// let catalog = CatalogSnapshot::from_path("catalog.yaml")?.into_catalog();
///
/// let mut exporter = Exporter::new(client, catalog, ExporterConfig::default())?;
/// let report = exporter.export_all(&ExportOptions::default());
/// println!("{}", report.summary());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Exporter<T, S> {
    transport: T,
    source: S,
    config: ExporterConfig,
    pacer: Pacer,
    ids: IdMapping,
    stats: RunStats,
    state: ExportState,
    run_id: String,
    channel: PricingChannel,
    fallback_product_type: Option<Option<String>>,
}

impl<T: GraphQlTransport, S: CatalogSource> Exporter<T, S> {
    /// Create a new exporter
    pub fn new(transport: T, source: S, config: ExporterConfig) -> ExportResult<Self> {
        config.validate().map_err(ExportError::ConfigError)?;
        let pacer = Pacer::new(config.delay());

        Ok(Self {
            transport,
            source,
            config,
            pacer,
            ids: IdMapping::new(),
            stats: RunStats::new(),
            state: ExportState::Init,
            run_id: Uuid::new_v4().to_string(),
            channel: PricingChannel::Unresolved,
            fallback_product_type: None,
        })
    }

    pub fn config(&self) -> &ExporterConfig {
        &self.config
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn id_mapping(&self) -> &IdMapping {
        &self.ids
    }

    pub fn state(&self) -> ExportState {
        self.state
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Check that the endpoint answers a lightweight `categories` query
    pub fn test_connection(&self) -> bool {
        match self.check_connection() {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "Connection test failed");
                false
            }
        }
    }

    fn check_connection(&self) -> ExportResult<()> {
        let response = self
            .transport
            .execute(CATEGORIES_QUERY, json!({}))
            .map_err(|e| ExportError::ConnectionFailed(e.to_string()))?;

        let errors = top_level_errors(&response);
        if !errors.is_empty() {
            return Err(ExportError::ConnectionFailed(
                MutationFailure::GraphQl(errors).to_string(),
            ));
        }

        info!("Connection to remote platform verified");
        Ok(())
    }

    /// Run every stage and report the outcome.
    ///
    /// Starts a fresh run: the id mapping and statistics of a previous run are
    /// discarded. Never returns an error; fatal failures end up in the report.
    pub fn export_all(&mut self, options: &ExportOptions) -> ExportReport {
        self.reset_run();

        let _span = info_span!("export_run", run_id = %self.run_id).entered();
        info!(
            run_id = %self.run_id,
            export_categories = options.export_categories,
            create_product_types = options.create_product_types,
            product_ids = ?options.product_ids,
            limit = ?options.limit,
            "Starting catalog export"
        );

        let outcome = self.run_stages(options);

        let error = match outcome {
            Ok(()) => {
                self.state = ExportState::Reported;
                self.stats.log_final_stats();
                self.state = ExportState::Success;
                info!(
                    run_id = %self.run_id,
                    categories_mapped = self.ids.category_count(),
                    product_types_mapped = self.ids.product_type_count(),
                    "Catalog export completed"
                );
                None
            }
            Err(e) => {
                error!(
                    run_id = %self.run_id,
                    state = %self.state,
                    stage = e.stage_name().unwrap_or("-"),
                    error = %e,
                    "Catalog export failed"
                );
                self.stats.log_final_stats();
                self.state = ExportState::Failed;
                Some(e.to_string())
            }
        };

        ExportReport {
            success: error.is_none(),
            stats: self.stats.clone(),
            duration: self.stats.elapsed(),
            error,
            run_id: self.run_id.clone(),
            state: self.state,
        }
    }

    fn reset_run(&mut self) {
        self.ids = IdMapping::new();
        self.stats = RunStats::new();
        self.state = ExportState::Init;
        self.run_id = Uuid::new_v4().to_string();
        self.channel = PricingChannel::Unresolved;
        self.fallback_product_type = None;
    }

    fn run_stages(&mut self, options: &ExportOptions) -> ExportResult<()> {
        self.check_connection()?;
        self.state = ExportState::ConnectionVerified;

        if options.export_categories {
            let _stage = info_span!("export_stage", stage = "categories").entered();
            self.export_categories()?;
        } else {
            info!("Category export disabled, skipping");
        }
        self.state = ExportState::CategoriesExported;

        if options.create_product_types {
            let _stage = info_span!("export_stage", stage = "product_types").entered();
            self.create_product_types();
        } else {
            info!("Product type creation disabled, skipping");
        }
        self.state = ExportState::ProductTypesReady;

        {
            let _stage = info_span!("export_stage", stage = "products").entered();
            self.export_products(options)?;
        }
        self.state = ExportState::ProductsExported;

        Ok(())
    }

    /// Create and check one mutation
    fn create(&self, spec: &MutationSpec, variables: Value) -> Result<RemoteEntity, EntityFailure> {
        let response = self.transport.execute(spec.document, variables)?;
        Ok(parse_mutation(&response, spec)?)
    }

    /// Export roots first, then children in parent-before-child order.
    ///
    /// Fails before creating anything if the parent graph has a cycle.
    pub fn export_categories(&mut self) -> ExportResult<()> {
        let roots = self
            .source
            .list_root_categories()
            .map_err(|e| ExportError::stage("categories", e))?;
        let children = self
            .source
            .list_child_categories()
            .map_err(|e| ExportError::stage("categories", e))?;
        let children = order_child_categories(children)?;

        info!(
            roots = roots.len(),
            children = children.len(),
            "Exporting categories"
        );

        for category in &roots {
            self.export_category(category, None);
        }

        for category in &children {
            let parent_remote_id = category
                .parent()
                .and_then(|parent| self.ids.category(parent))
                .map(str::to_string);

            match parent_remote_id {
                Some(parent) => self.export_category(category, Some(&parent)),
                None => {
                    self.stats.increment(Counter::CategoriesProcessed);
                    self.stats.increment(Counter::CategoriesSkipped);
                    warn!(
                        source_id = category.id,
                        parent_id = ?category.parent(),
                        "Skipping category whose parent was not exported"
                    );
                }
            }
        }

        info!(
            created = self.stats.get(Counter::CategoriesCreated),
            skipped = self.stats.get(Counter::CategoriesSkipped),
            errors = self.stats.get(Counter::CategoriesErrors),
            "Categories exported"
        );
        Ok(())
    }

    fn export_category(&mut self, category: &SourceCategory, parent_remote_id: Option<&str>) {
        self.stats.increment(Counter::CategoriesProcessed);

        let input = map_category(category, parent_remote_id);
        let variables = json!({ "input": input, "parent": parent_remote_id });

        match self.create(&CATEGORY_CREATE, variables) {
            Ok(entity) => {
                info!(
                    source_id = category.id,
                    remote_id = %entity.id,
                    name = %category.title,
                    "Category created"
                );
                self.ids.record_category(category.id, entity.id);
                self.stats.increment(Counter::CategoriesCreated);
            }
            Err(e) => {
                error!(
                    source_id = category.id,
                    mutation = CATEGORY_CREATE.name,
                    error = %e,
                    "Category export failed"
                );
                self.stats.increment(Counter::CategoriesErrors);
            }
        }

        self.pacer.wait();
    }

    /// Create the configured product types. Failures are counted, never fatal.
    pub fn create_product_types(&mut self) {
        let seeds = self.config.product_types.clone();
        info!(count = seeds.len(), "Creating product types");

        for seed in &seeds {
            let input = map_product_type(&seed.name, &seed.slug);

            match self.create(&PRODUCT_TYPE_CREATE, json!({ "input": input })) {
                Ok(entity) => {
                    info!(name = %seed.name, remote_id = %entity.id, "Product type created");
                    self.ids.record_product_type(seed.name.clone(), entity.id);
                    self.stats.increment(Counter::ProductTypesCreated);
                }
                Err(e) => {
                    warn!(
                        name = %seed.name,
                        mutation = PRODUCT_TYPE_CREATE.name,
                        error = %e,
                        "Product type creation failed"
                    );
                    self.stats.increment(Counter::ProductTypesErrors);
                }
            }

            self.pacer.wait();
        }
    }

    /// Remote product type for new products.
    ///
    /// The configured default when it was created this run; otherwise an existing
    /// remote type, looked up once per run.
    fn product_type_for_products(&mut self) -> Option<String> {
        if let Some(id) = self.ids.product_type(&self.config.default_product_type) {
            return Some(id.to_string());
        }

        if let Some(ref resolved) = self.fallback_product_type {
            return resolved.clone();
        }

        let resolved = self.lookup_existing_product_type();
        self.fallback_product_type = Some(resolved.clone());
        resolved
    }

    fn lookup_existing_product_type(&self) -> Option<String> {
        let nodes: Vec<ProductTypeNode> = match self
            .transport
            .execute(PRODUCT_TYPES_QUERY, json!({}))
            .map_err(EntityFailure::from)
            .and_then(|response| Ok(connection_nodes(&response, "productTypes")?))
        {
            Ok(nodes) => nodes,
            Err(e) => {
                warn!(error = %e, "Product type lookup failed, creating products without a type");
                return None;
            }
        };

        let chosen = nodes
            .iter()
            .find(|node| node.has_variants)
            .or_else(|| nodes.first());

        match chosen {
            Some(node) => {
                info!(
                    name = %node.name,
                    remote_id = %node.id,
                    default = %self.config.default_product_type,
                    "Using existing product type"
                );
                Some(node.id.clone())
            }
            None => {
                warn!("No product types on the remote platform, creating products without a type");
                None
            }
        }
    }

    /// Export products in batches, logging progress after each batch
    pub fn export_products(&mut self, options: &ExportOptions) -> ExportResult<()> {
        let products = self
            .source
            .list_products(&options.product_filter())
            .map_err(|e| ExportError::stage("products", e))?;
        let total = products.len();
        let batch_size = self.config.batch_size;

        info!(total, batch_size, "Exporting products");

        for (index, batch) in products.chunks(batch_size).enumerate() {
            for product in batch {
                self.export_product(product);
            }

            info!(
                batch = index + 1,
                processed = self.stats.get(Counter::ProductsProcessed),
                total,
                created = self.stats.get(Counter::ProductsCreated),
                skipped = self.stats.get(Counter::ProductsSkipped),
                errors = self.stats.get(Counter::ProductsErrors),
                "Product batch complete"
            );
        }

        Ok(())
    }

    fn export_product(&mut self, product: &SourceProduct) {
        self.stats.increment(Counter::ProductsProcessed);

        let category_remote_id = product
            .primary_category()
            .and_then(|category| self.ids.category(category))
            .map(str::to_string);

        let Some(category_remote_id) = category_remote_id else {
            warn!(
                source_id = product.id,
                category_id = ?product.primary_category(),
                "Skipping product without an exported category"
            );
            self.stats.increment(Counter::ProductsSkipped);
            return;
        };

        let product_type = self.product_type_for_products();
        let input = map_product(product, &category_remote_id, product_type.as_deref());

        match self.create(&PRODUCT_CREATE, json!({ "input": input })) {
            Ok(entity) => {
                info!(
                    source_id = product.id,
                    remote_id = %entity.id,
                    name = %product.display_name(),
                    "Product created"
                );
                self.stats.increment(Counter::ProductsCreated);
                self.pacer.wait();
                self.export_product_variants(product, &entity.id);
            }
            Err(e) => {
                error!(
                    source_id = product.id,
                    mutation = PRODUCT_CREATE.name,
                    error = %e,
                    "Product export failed"
                );
                self.stats.increment(Counter::ProductsErrors);
                self.pacer.wait();
            }
        }
    }

    /// Create one variant per price tier; each tier succeeds or fails on its own
    pub fn export_product_variants(&mut self, product: &SourceProduct, remote_product_id: &str) {
        for tier in &product.price_tiers {
            let mut input = map_variant(product, tier);
            input.product = Some(remote_product_id.to_string());

            match self.create(&PRODUCT_VARIANT_CREATE, json!({ "input": input })) {
                Ok(entity) => {
                    debug!(
                        source_id = product.id,
                        tier_id = tier.id,
                        sku = %input.sku,
                        remote_id = %entity.id,
                        "Variant created"
                    );
                    self.stats.increment(Counter::VariantsCreated);
                    self.pacer.wait_short();

                    if let Some(channel) = self.pricing_channel() {
                        self.publish_variant_price(&entity.id, &channel, &input);
                    }
                }
                Err(e) => {
                    error!(
                        source_id = product.id,
                        tier_id = tier.id,
                        sku = %input.sku,
                        mutation = PRODUCT_VARIANT_CREATE.name,
                        error = %e,
                        "Variant export failed"
                    );
                    self.stats.increment(Counter::VariantsErrors);
                    self.pacer.wait_short();
                }
            }
        }
    }

    /// Channel for variant prices, or `None` when channel pricing is off
    fn pricing_channel(&mut self) -> Option<String> {
        if !self.config.channel_pricing {
            return None;
        }

        if self.channel == PricingChannel::Unresolved {
            self.channel = match self.config.channel_id.clone() {
                Some(channel_id) => PricingChannel::Active(channel_id),
                None => self.lookup_active_channel(),
            };
        }

        match self.channel {
            PricingChannel::Active(ref channel_id) => Some(channel_id.clone()),
            _ => None,
        }
    }

    fn lookup_active_channel(&self) -> PricingChannel {
        let channels: Vec<ChannelNode> = match self
            .transport
            .execute(CHANNELS_QUERY, json!({}))
            .map_err(EntityFailure::from)
            .and_then(|response| Ok(list_items(&response, "channels")?))
        {
            Ok(channels) => channels,
            Err(e) => {
                warn!(error = %e, "Channel lookup failed, channel pricing disabled for this run");
                return PricingChannel::Disabled;
            }
        };

        match channels.into_iter().find(|channel| channel.is_active) {
            Some(channel) => {
                info!(
                    channel = %channel.name,
                    remote_id = %channel.id,
                    currency = ?channel.currency_code,
                    "Publishing variant prices to channel"
                );
                PricingChannel::Active(channel.id)
            }
            None => {
                warn!("No active channel found, channel pricing disabled for this run");
                PricingChannel::Disabled
            }
        }
    }

    fn publish_variant_price(&mut self, variant_id: &str, channel_id: &str, variant: &VariantInput) {
        let listing = map_channel_listing(channel_id, variant);
        let variables = json!({ "id": variant_id, "input": [listing] });

        match self.create(&VARIANT_CHANNEL_LISTING_UPDATE, variables) {
            Ok(_) => {
                debug!(sku = %variant.sku, channel = %channel_id, "Variant price published");
                self.stats.increment(Counter::ChannelListingsCreated);
            }
            Err(e) => {
                warn!(
                    sku = %variant.sku,
                    remote_id = %variant_id,
                    mutation = VARIANT_CHANNEL_LISTING_UPDATE.name,
                    error = %e,
                    "Variant channel listing failed"
                );
                self.stats.increment(Counter::ChannelListingsErrors);
            }
        }

        self.pacer.wait_short();
    }
}
