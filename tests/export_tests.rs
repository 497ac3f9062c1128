//! Exporter integration tests

mod common;

use catalog_export::export::{Counter, ExportError, ExportOptions, ExportState, Exporter};
use catalog_export::source::ProductFilter;
use catalog_export::{
    CatalogSnapshot, CatalogSource, InMemoryCatalog, SourceCategory, SourceError, SourceProduct,
};
use common::{RecordingTransport, product, sample_catalog, test_config};
use serde_json::json;

fn position(operations: &[serde_json::Value], name: &str) -> usize {
    operations
        .iter()
        .position(|vars| vars["input"]["name"] == name)
        .unwrap_or_else(|| panic!("no call for {name}"))
}

mod end_to_end_tests {
    use super::*;

    #[test]
    fn test_full_run() {
        let transport = RecordingTransport::new();
        let catalog = sample_catalog();
        let mut exporter = Exporter::new(&transport, &catalog, test_config()).unwrap();

        let report = exporter.export_all(&ExportOptions::default());

        assert!(report.success, "{:?}", report.error);
        assert_eq!(report.state, ExportState::Success);
        assert!(report.error.is_none());

        let stats = &report.stats;
        assert_eq!(stats.get(Counter::CategoriesCreated), 3);
        assert_eq!(stats.get(Counter::ProductTypesCreated), 3);
        assert_eq!(stats.get(Counter::ProductsCreated), 3);
        assert_eq!(stats.get(Counter::VariantsCreated), 6);
        assert_eq!(stats.total_errors(), 0);

        assert_eq!(transport.count("categories"), 1);
        assert_eq!(transport.count("categoryCreate"), 3);
        assert_eq!(transport.count("productTypeCreate"), 3);
        assert_eq!(transport.count("productCreate"), 3);
        assert_eq!(transport.count("productVariantCreate"), 6);
        assert_eq!(transport.count("productVariantChannelListingUpdate"), 0);
        assert_eq!(transport.count("productTypes"), 0);

        assert_eq!(exporter.id_mapping().category_count(), 3);
        assert_eq!(exporter.id_mapping().product_type_count(), 3);

        let operations = transport.operations();
        assert_eq!(operations[0], "categories");
        let last_category = operations.iter().rposition(|op| op == "categoryCreate").unwrap();
        let first_product = operations.iter().position(|op| op == "productCreate").unwrap();
        assert!(last_category < first_product);
    }

    #[test]
    fn test_child_is_created_under_its_parent() {
        let transport = RecordingTransport::new();
        let catalog = sample_catalog();
        let mut exporter = Exporter::new(&transport, &catalog, test_config()).unwrap();
        exporter.export_all(&ExportOptions::default());

        let creates = transport.calls_for("categoryCreate");
        let roses = position(&creates, "Roses");
        let red_roses = position(&creates, "Red Roses");
        assert!(roses < red_roses);

        let roses_id = exporter.id_mapping().category(1).unwrap().to_string();
        assert_eq!(creates[red_roses]["parent"], json!(roses_id));
        assert_eq!(creates[roses]["parent"], json!(null));
        assert!(creates[red_roses]["input"].get("parent").is_none());
        assert_eq!(creates[red_roses]["input"]["slug"], "red-roses");
    }

    #[test]
    fn test_product_and_variant_inputs() {
        let transport = RecordingTransport::new();
        let catalog = sample_catalog();
        let mut exporter = Exporter::new(&transport, &catalog, test_config()).unwrap();
        exporter.export_all(&ExportOptions::default());

        let products = transport.calls_for("productCreate");
        let first = &products[0]["input"];
        assert_eq!(first["name"], "Red Rose Bouquet");
        assert_eq!(first["category"], json!(exporter.id_mapping().category(3).unwrap()));
        assert_eq!(
            first["productType"],
            json!(exporter.id_mapping().product_type("Flowers").unwrap())
        );
        assert_eq!(first["metadata"][0], json!({"key": "source_id", "value": "10"}));

        let variants = transport.calls_for("productVariantCreate");
        let skus: Vec<&str> = variants
            .iter()
            .map(|v| v["input"]["sku"].as_str().unwrap())
            .collect();
        assert_eq!(skus, vec!["10-1", "10-2", "11-1", "11-2", "12-1", "12-2"]);
        assert_eq!(variants[0]["input"]["price"], json!(25.0));
        assert_eq!(variants[0]["input"]["costPrice"], json!(15.0));
        assert_eq!(variants[1]["input"]["weight"], json!(0.8));
        assert!(variants[0]["input"]["product"].as_str().unwrap().starts_with("product:"));
    }

    #[test]
    fn test_snapshot_catalog_run() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("catalog.yaml");
        std::fs::write(
            &path,
            r#"
categories:
  - { id: 1, title: "Bouquets", parent_id: 0 }
  - { id: 2, title: "Wedding", parent_id: 1, slug: "wedding" }
tier_types:
  - { id: 1, key: "small", title: "Small" }
  - { id: 2, key: "standard", title: "Standard" }
products:
  - { id: 5, header: "Bride Bouquet", category_ids: [2], rating: 5 }
  - { id: 6, header: "No prices", category_ids: [1] }
product_tiers:
  - { id: 50, product_id: 5, tier_type_id: 1, price: 30 }
  - { id: 51, product_id: 5, tier_type_id: 2, price: 45.5 }
"#,
        )
        .unwrap();

        let catalog = CatalogSnapshot::from_path(&path).unwrap().into_catalog();
        let transport = RecordingTransport::new();
        let mut exporter = Exporter::new(&transport, catalog, test_config()).unwrap();
        let report = exporter.export_all(&ExportOptions::default());

        assert!(report.success);
        assert_eq!(report.stats.get(Counter::CategoriesCreated), 2);
        assert_eq!(report.stats.get(Counter::ProductsProcessed), 1);
        assert_eq!(report.stats.get(Counter::VariantsCreated), 2);

        let variants = transport.calls_for("productVariantCreate");
        assert_eq!(variants[0]["input"]["weight"], json!(0.3));
        assert_eq!(
            variants[1]["input"]["metadata"][0],
            json!({"key": "source_tier_link_id", "value": "51"})
        );

        let stats_path = temp.path().join("stats.txt");
        report.write_stats_file(&stats_path).unwrap();
        let content = std::fs::read_to_string(&stats_path).unwrap();
        assert!(content.starts_with("# Catalog Export Statistics\n# Generated at: "));
        assert!(content.contains("variants_created: 2"));
    }
}

mod category_ordering_tests {
    use super::*;

    #[test]
    fn test_roots_before_children_regardless_of_ids() {
        let catalog = InMemoryCatalog::new()
            .with_category(SourceCategory::new(1, "Child A").with_parent(9))
            .with_category(SourceCategory::new(2, "Child B").with_parent(8))
            .with_category(SourceCategory::new(8, "Root B"))
            .with_category(SourceCategory::new(9, "Root A").with_parent(0));

        let transport = RecordingTransport::new();
        let mut exporter = Exporter::new(&transport, &catalog, test_config()).unwrap();
        let report = exporter.export_all(&ExportOptions::new().with_product_types(false));
        assert!(report.success);

        let names: Vec<String> = transport
            .calls_for("categoryCreate")
            .iter()
            .map(|v| v["input"]["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Root B", "Root A", "Child A", "Child B"]);
    }

    #[test]
    fn test_three_level_hierarchy() {
        let catalog = InMemoryCatalog::new()
            .with_category(SourceCategory::new(30, "Grandchild").with_parent(20))
            .with_category(SourceCategory::new(20, "Child").with_parent(10))
            .with_category(SourceCategory::new(10, "Root"))
            .with_product(product(1, "Deep product", 30));

        let transport = RecordingTransport::new();
        let mut exporter = Exporter::new(&transport, &catalog, test_config()).unwrap();
        let report = exporter.export_all(&ExportOptions::default());

        assert!(report.success);
        assert_eq!(report.stats.get(Counter::CategoriesCreated), 3);
        assert_eq!(report.stats.get(Counter::ProductsCreated), 1);

        let creates = transport.calls_for("categoryCreate");
        assert!(position(&creates, "Root") < position(&creates, "Child"));
        assert!(position(&creates, "Child") < position(&creates, "Grandchild"));

        let ids = exporter.id_mapping();
        assert_eq!(creates[2]["parent"], json!(ids.category(20).unwrap()));
        assert_eq!(creates[1]["parent"], json!(ids.category(10).unwrap()));
    }

    #[test]
    fn test_cycle_fails_the_run() {
        let catalog = InMemoryCatalog::new()
            .with_category(SourceCategory::new(1, "Root"))
            .with_category(SourceCategory::new(2, "Loop A").with_parent(3))
            .with_category(SourceCategory::new(3, "Loop B").with_parent(2))
            .with_product(product(1, "Rose", 1));

        let transport = RecordingTransport::new();
        let mut exporter = Exporter::new(&transport, &catalog, test_config()).unwrap();
        let report = exporter.export_all(&ExportOptions::default());

        assert!(!report.success);
        assert_eq!(report.state, ExportState::Failed);
        assert!(report.error.as_deref().unwrap().contains("cycle"));
        assert_eq!(transport.operations(), vec!["categories"]);
    }

    #[test]
    fn test_child_of_failed_parent_is_skipped() {
        let catalog = InMemoryCatalog::new()
            .with_category(SourceCategory::new(1, "Roses"))
            .with_category(SourceCategory::new(2, "Red Roses").with_parent(1))
            .with_category(SourceCategory::new(3, "Dark Red Roses").with_parent(2))
            .with_category(SourceCategory::new(4, "Orphan").with_parent(77));

        let transport = RecordingTransport::new()
            .reject(|op, vars| op == "categoryCreate" && vars["input"]["name"] == "Roses");
        let mut exporter = Exporter::new(&transport, &catalog, test_config()).unwrap();
        let report = exporter.export_all(&ExportOptions::new().with_product_types(false));

        assert!(report.success);
        let stats = &report.stats;
        assert_eq!(stats.get(Counter::CategoriesProcessed), 4);
        assert_eq!(stats.get(Counter::CategoriesErrors), 1);
        assert_eq!(stats.get(Counter::CategoriesSkipped), 3);
        assert_eq!(stats.get(Counter::CategoriesCreated), 0);
        assert_eq!(transport.count("categoryCreate"), 1);
    }
}

mod failure_isolation_tests {
    use super::*;

    #[test]
    fn test_product_with_unmapped_category_is_skipped() {
        let catalog = sample_catalog().with_product(product(13, "Lost Product", 99));

        let transport = RecordingTransport::new();
        let mut exporter = Exporter::new(&transport, &catalog, test_config()).unwrap();
        let report = exporter.export_all(&ExportOptions::default());

        assert!(report.success);
        let stats = &report.stats;
        assert_eq!(stats.get(Counter::ProductsProcessed), 4);
        assert_eq!(stats.get(Counter::ProductsSkipped), 1);
        assert_eq!(stats.get(Counter::ProductsErrors), 0);
        assert_eq!(stats.get(Counter::ProductsCreated), 3);
        assert!(
            !transport
                .calls_for("productCreate")
                .iter()
                .any(|v| v["input"]["name"] == "Lost Product")
        );
    }

    #[test]
    fn test_rejected_product_does_not_stop_the_run() {
        let transport = RecordingTransport::new()
            .reject(|op, vars| op == "productCreate" && vars["input"]["name"] == "White Roses");
        let catalog = sample_catalog();
        let mut exporter = Exporter::new(&transport, &catalog, test_config()).unwrap();
        let report = exporter.export_all(&ExportOptions::default());

        assert!(report.success);
        let stats = &report.stats;
        assert_eq!(stats.get(Counter::ProductsErrors), 1);
        assert_eq!(stats.get(Counter::ProductsCreated), 2);
        assert_eq!(stats.get(Counter::VariantsCreated), 4);
        assert_eq!(transport.count("productCreate"), 3);
    }

    #[test]
    fn test_transport_error_on_product_is_entity_level() {
        let transport = RecordingTransport::new()
            .fail_transport(|op, vars| op == "productCreate" && vars["input"]["name"] == "Tulip Mix");
        let catalog = sample_catalog();
        let mut exporter = Exporter::new(&transport, &catalog, test_config()).unwrap();
        let report = exporter.export_all(&ExportOptions::default());

        assert!(report.success);
        assert_eq!(report.stats.get(Counter::ProductsErrors), 1);
        assert_eq!(report.stats.get(Counter::ProductsCreated), 2);
    }

    #[test]
    fn test_variant_failure_does_not_block_siblings() {
        let transport = RecordingTransport::new()
            .reject(|op, vars| op == "productVariantCreate" && vars["input"]["sku"] == "10-1");
        let catalog = sample_catalog();
        let mut exporter = Exporter::new(&transport, &catalog, test_config()).unwrap();
        let report = exporter.export_all(&ExportOptions::default());

        assert!(report.success);
        assert_eq!(report.stats.get(Counter::VariantsErrors), 1);
        assert_eq!(report.stats.get(Counter::VariantsCreated), 5);
        assert_eq!(transport.count("productVariantCreate"), 6);
    }

    #[test]
    fn test_connection_graphql_error_fails_before_any_mutation() {
        let transport = RecordingTransport::new().with_connection_error("Invalid token");
        let catalog = sample_catalog();
        let mut exporter = Exporter::new(&transport, &catalog, test_config()).unwrap();

        assert!(!exporter.test_connection());

        let report = exporter.export_all(&ExportOptions::default());
        assert!(!report.success);
        assert_eq!(report.state, ExportState::Failed);
        assert!(report.error.as_deref().unwrap().contains("Invalid token"));
        assert_eq!(transport.count("categoryCreate"), 0);
        assert_eq!(transport.count("productCreate"), 0);
        assert_eq!(report.stats.get(Counter::CategoriesProcessed), 0);
    }

    #[test]
    fn test_connection_transport_error_fails_the_run() {
        let transport = RecordingTransport::new().fail_transport(|op, _| op == "categories");
        let catalog = sample_catalog();
        let mut exporter = Exporter::new(&transport, &catalog, test_config()).unwrap();

        let report = exporter.export_all(&ExportOptions::default());
        assert!(!report.success);
        assert!(report.error.as_deref().unwrap().contains("HTTP 502"));
        assert_eq!(transport.operations(), vec!["categories"]);
    }
}

mod option_tests {
    use super::*;

    #[test]
    fn test_product_ids_and_limit() {
        let transport = RecordingTransport::new();
        let catalog = sample_catalog();
        let mut exporter = Exporter::new(&transport, &catalog, test_config().with_batch_size(1)).unwrap();

        let options = ExportOptions::new().with_product_ids(vec![12, 11]).with_limit(1);
        let report = exporter.export_all(&options);

        assert!(report.success);
        assert_eq!(report.stats.get(Counter::ProductsProcessed), 1);
        let products = transport.calls_for("productCreate");
        assert_eq!(products.len(), 1);
        assert_eq!(products[0]["input"]["name"], "White Roses");
    }

    #[test]
    fn test_without_categories_every_product_is_skipped() {
        let transport = RecordingTransport::new();
        let catalog = sample_catalog();
        let mut exporter = Exporter::new(&transport, &catalog, test_config()).unwrap();

        let report = exporter.export_all(&ExportOptions::new().with_categories(false));
        assert!(report.success);
        assert_eq!(transport.count("categoryCreate"), 0);
        assert_eq!(report.stats.get(Counter::ProductsSkipped), 3);
        assert_eq!(transport.count("productCreate"), 0);
    }

    #[test]
    fn test_oversized_delay_is_a_config_error() {
        let transport = RecordingTransport::new();
        let catalog = sample_catalog();
        let result = Exporter::new(&transport, &catalog, test_config().with_delay_secs(1e20));
        assert!(matches!(result, Err(ExportError::ConfigError(_))));
        assert!(transport.calls().is_empty());
    }

    #[test]
    fn test_each_run_starts_fresh() {
        let transport = RecordingTransport::new();
        let catalog = sample_catalog();
        let mut exporter = Exporter::new(&transport, &catalog, test_config()).unwrap();

        let first = exporter.export_all(&ExportOptions::default());
        let second = exporter.export_all(&ExportOptions::default());

        assert_ne!(first.run_id, second.run_id);
        assert_eq!(second.stats.get(Counter::CategoriesCreated), 3);
        assert_eq!(second.stats.get(Counter::ProductsCreated), 3);
        assert_eq!(transport.count("productCreate"), 6);
    }
}

mod product_type_tests {
    use super::*;

    #[test]
    fn test_existing_type_with_variants_is_used() {
        let transport = RecordingTransport::new().with_product_types(vec![
            json!({"id": "pt-simple", "name": "Simple", "hasVariants": false}),
            json!({"id": "pt-flowers", "name": "Flowers", "hasVariants": true}),
        ]);
        let catalog = sample_catalog();
        let mut exporter = Exporter::new(&transport, &catalog, test_config()).unwrap();

        let report = exporter.export_all(&ExportOptions::new().with_product_types(false));
        assert!(report.success);
        assert_eq!(transport.count("productTypeCreate"), 0);
        assert_eq!(transport.count("productTypes"), 1);

        for call in transport.calls_for("productCreate") {
            assert_eq!(call["input"]["productType"], "pt-flowers");
        }
    }

    #[test]
    fn test_first_type_when_none_has_variants() {
        let transport = RecordingTransport::new().with_product_types(vec![
            json!({"id": "pt-a", "name": "A", "hasVariants": false}),
            json!({"id": "pt-b", "name": "B", "hasVariants": false}),
        ]);
        let catalog = sample_catalog();
        let mut exporter = Exporter::new(&transport, &catalog, test_config()).unwrap();
        exporter.export_all(&ExportOptions::new().with_product_types(false));

        let products = transport.calls_for("productCreate");
        assert_eq!(products[0]["input"]["productType"], "pt-a");
    }

    #[test]
    fn test_failed_creation_falls_back_to_lookup() {
        let transport = RecordingTransport::new()
            .reject(|op, _| op == "productTypeCreate")
            .with_product_types(vec![json!({"id": "pt-existing", "name": "Flowers", "hasVariants": true})]);
        let catalog = sample_catalog();
        let mut exporter = Exporter::new(&transport, &catalog, test_config()).unwrap();

        let report = exporter.export_all(&ExportOptions::default());
        assert!(report.success);
        assert_eq!(report.stats.get(Counter::ProductTypesErrors), 3);
        assert_eq!(report.stats.get(Counter::ProductTypesCreated), 0);
        assert_eq!(report.stats.get(Counter::ProductsCreated), 3);
        assert_eq!(transport.count("productTypes"), 1);
    }

    #[test]
    fn test_no_remote_types_omits_product_type() {
        let transport = RecordingTransport::new();
        let catalog = sample_catalog();
        let mut exporter = Exporter::new(&transport, &catalog, test_config()).unwrap();
        exporter.export_all(&ExportOptions::new().with_product_types(false));

        for call in transport.calls_for("productCreate") {
            assert!(call["input"].get("productType").is_none());
        }
        assert_eq!(transport.count("productTypes"), 1);
    }
}

mod channel_pricing_tests {
    use super::*;

    #[test]
    fn test_configured_channel() {
        let transport = RecordingTransport::new();
        let catalog = sample_catalog();
        let config = test_config().with_channel_pricing(Some("channel-main".to_string()));
        let mut exporter = Exporter::new(&transport, &catalog, config).unwrap();

        let report = exporter.export_all(&ExportOptions::default());
        assert!(report.success);
        assert_eq!(transport.count("channels"), 0);
        assert_eq!(report.stats.get(Counter::ChannelListingsCreated), 6);

        let listings = transport.calls_for("productVariantChannelListingUpdate");
        assert_eq!(listings.len(), 6);
        assert!(listings[0]["id"].as_str().unwrap().starts_with("productVariant:"));
        assert_eq!(
            listings[0]["input"],
            json!([{"channelId": "channel-main", "price": 25.0, "costPrice": 15.0}])
        );

        let operations = transport.operations();
        let first_variant = operations.iter().position(|op| op == "productVariantCreate").unwrap();
        assert_eq!(operations[first_variant + 1], "productVariantChannelListingUpdate");
    }

    #[test]
    fn test_first_active_channel_is_resolved_once() {
        let transport = RecordingTransport::new().with_channels(vec![
            json!({"id": "ch-off", "name": "Archive", "slug": "archive", "isActive": false, "currencyCode": "RUB"}),
            json!({"id": "ch-on", "name": "Default", "slug": "default", "isActive": true, "currencyCode": "RUB"}),
        ]);
        let catalog = sample_catalog();
        let mut exporter =
            Exporter::new(&transport, &catalog, test_config().with_channel_pricing(None)).unwrap();

        let report = exporter.export_all(&ExportOptions::default());
        assert!(report.success);
        assert_eq!(transport.count("channels"), 1);
        for listing in transport.calls_for("productVariantChannelListingUpdate") {
            assert_eq!(listing["input"][0]["channelId"], "ch-on");
        }
    }

    #[test]
    fn test_no_active_channel_disables_pricing() {
        let transport = RecordingTransport::new().with_channels(vec![json!({
            "id": "ch-off", "name": "Archive", "slug": "archive", "isActive": false, "currencyCode": "RUB"
        })]);
        let catalog = sample_catalog();
        let mut exporter =
            Exporter::new(&transport, &catalog, test_config().with_channel_pricing(None)).unwrap();

        let report = exporter.export_all(&ExportOptions::default());
        assert!(report.success);
        assert_eq!(transport.count("channels"), 1);
        assert_eq!(transport.count("productVariantChannelListingUpdate"), 0);
        assert_eq!(report.stats.get(Counter::VariantsCreated), 6);
    }

    #[test]
    fn test_listing_failure_is_counted() {
        let transport = RecordingTransport::new()
            .reject(|op, _| op == "productVariantChannelListingUpdate");
        let catalog = sample_catalog();
        let config = test_config().with_channel_pricing(Some("channel-main".to_string()));
        let mut exporter = Exporter::new(&transport, &catalog, config).unwrap();

        let report = exporter.export_all(&ExportOptions::default());
        assert!(report.success);
        assert_eq!(report.stats.get(Counter::ChannelListingsErrors), 6);
        assert_eq!(report.stats.get(Counter::VariantsCreated), 6);
    }
}

mod catalog_failure_tests {
    use super::*;

    /// Catalog whose product listing always fails
    struct BrokenProducts(InMemoryCatalog);

    impl CatalogSource for BrokenProducts {
        fn list_root_categories(&self) -> Result<Vec<SourceCategory>, SourceError> {
            self.0.list_root_categories()
        }

        fn list_child_categories(&self) -> Result<Vec<SourceCategory>, SourceError> {
            self.0.list_child_categories()
        }

        fn list_products(&self, _filter: &ProductFilter) -> Result<Vec<SourceProduct>, SourceError> {
            Err(SourceError::IoError("product table unreadable".to_string()))
        }
    }

    #[test]
    fn test_product_listing_failure_names_the_stage() {
        let transport = RecordingTransport::new();
        let catalog = BrokenProducts(sample_catalog());
        let mut exporter = Exporter::new(&transport, catalog, test_config()).unwrap();

        let report = exporter.export_all(&ExportOptions::default());
        assert!(!report.success);
        assert_eq!(report.state, ExportState::Failed);

        let error = report.error.as_deref().unwrap();
        assert!(error.contains("'products'"), "{error}");
        assert!(error.contains("product table unreadable"), "{error}");
        assert_eq!(report.stats.get(Counter::CategoriesCreated), 3);
        assert_eq!(transport.count("productCreate"), 0);
    }
}
