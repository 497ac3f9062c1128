//! Shared fixtures for exporter integration tests

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use catalog_export::remote::documents::{
    CATEGORIES_QUERY, CATEGORY_CREATE, CHANNELS_QUERY, MutationSpec, PRODUCT_CREATE,
    PRODUCT_TYPE_CREATE, PRODUCT_TYPES_QUERY, PRODUCT_VARIANT_CREATE,
    VARIANT_CHANNEL_LISTING_UPDATE,
};
use catalog_export::remote::{GraphQlTransport, RemoteError};
use catalog_export::{ExporterConfig, InMemoryCatalog, PriceTier, SourceCategory, SourceProduct};
use rust_decimal::Decimal;
use serde_json::{Value, json};

const MUTATIONS: [MutationSpec; 5] = [
    CATEGORY_CREATE,
    PRODUCT_TYPE_CREATE,
    PRODUCT_CREATE,
    PRODUCT_VARIANT_CREATE,
    VARIANT_CHANNEL_LISTING_UPDATE,
];

/// One call seen by the fake transport
#[derive(Debug, Clone)]
pub struct Call {
    pub operation: String,
    pub variables: Value,
}

type Predicate = Box<dyn Fn(&str, &Value) -> bool>;

/// In-memory GraphQL endpoint that records every call and answers like the platform
pub struct RecordingTransport {
    calls: RefCell<Vec<Call>>,
    next_id: Cell<u32>,
    rejections: Vec<Predicate>,
    transport_failures: Vec<Predicate>,
    connection_error: Option<String>,
    product_types: Vec<Value>,
    channels: Vec<Value>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            rejections: Vec::new(),
            transport_failures: Vec::new(),
            connection_error: None,
            product_types: Vec::new(),
            channels: Vec::new(),
        }
    }

    /// Answer matching mutations with a payload `errors` entry
    pub fn reject(mut self, predicate: impl Fn(&str, &Value) -> bool + 'static) -> Self {
        self.rejections.push(Box::new(predicate));
        self
    }

    /// Fail matching calls with an HTTP 502
    pub fn fail_transport(mut self, predicate: impl Fn(&str, &Value) -> bool + 'static) -> Self {
        self.transport_failures.push(Box::new(predicate));
        self
    }

    /// Answer the connectivity query with a top-level GraphQL error
    pub fn with_connection_error(mut self, message: &str) -> Self {
        self.connection_error = Some(message.to_string());
        self
    }

    pub fn with_product_types(mut self, nodes: Vec<Value>) -> Self {
        self.product_types = nodes;
        self
    }

    pub fn with_channels(mut self, channels: Vec<Value>) -> Self {
        self.channels = channels;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn operations(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.operation.clone()).collect()
    }

    /// Variables of every call to `operation`, in call order
    pub fn calls_for(&self, operation: &str) -> Vec<Value> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.operation == operation)
            .map(|c| c.variables.clone())
            .collect()
    }

    pub fn count(&self, operation: &str) -> usize {
        self.calls_for(operation).len()
    }

    fn operation_of(query: &str) -> String {
        if let Some(spec) = MUTATIONS.iter().find(|spec| spec.document == query) {
            return spec.name.to_string();
        }
        match query {
            q if q == CATEGORIES_QUERY => "categories".to_string(),
            q if q == PRODUCT_TYPES_QUERY => "productTypes".to_string(),
            q if q == CHANNELS_QUERY => "channels".to_string(),
            other => panic!("unexpected document: {other}"),
        }
    }

    fn next_id(&self, entity: &str) -> String {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        format!("{}:{}", entity, id)
    }

    fn mutation_response(&self, spec: &MutationSpec, variables: &Value) -> Value {
        if self
            .rejections
            .iter()
            .any(|rejects| rejects(spec.name, variables))
        {
            return json!({
                "data": { spec.name: {
                    "errors": [{"field": "input", "message": "rejected by test", "code": "INVALID"}],
                    spec.entity: null
                }}
            });
        }

        let name = variables["input"]["name"].clone();
        json!({
            "data": { spec.name: {
                "errors": [],
                spec.entity: { "id": self.next_id(spec.entity), "name": name }
            }}
        })
    }
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphQlTransport for RecordingTransport {
    fn execute(&self, query: &str, variables: Value) -> Result<Value, RemoteError> {
        let operation = Self::operation_of(query);
        self.calls.borrow_mut().push(Call {
            operation: operation.clone(),
            variables: variables.clone(),
        });

        if self
            .transport_failures
            .iter()
            .any(|fails| fails(&operation, &variables))
        {
            return Err(RemoteError::Http {
                status: 502,
                body: "bad gateway".to_string(),
            });
        }

        if let Some(spec) = MUTATIONS.iter().find(|spec| spec.name == operation) {
            return Ok(self.mutation_response(spec, &variables));
        }

        let response = match operation.as_str() {
            "categories" => match self.connection_error {
                Some(ref message) => json!({ "errors": [{ "message": message }], "data": null }),
                None => json!({ "data": { "categories": { "edges": [] } } }),
            },
            "productTypes" => {
                let edges: Vec<Value> = self
                    .product_types
                    .iter()
                    .map(|node| json!({ "node": node }))
                    .collect();
                json!({ "data": { "productTypes": { "edges": edges } } })
            }
            "channels" => json!({ "data": { "channels": self.channels } }),
            _ => unreachable!(),
        };
        Ok(response)
    }
}

/// Exporter settings for tests: no pacing
pub fn test_config() -> ExporterConfig {
    ExporterConfig::new().without_delay()
}

pub fn tier(id: i64, key: &str, price_cents: i64) -> PriceTier {
    let mut tier = PriceTier::new(id, key, key.to_uppercase(), Decimal::new(price_cents, 2));
    tier.link_id = Some(id * 1000);
    tier
}

pub fn product(id: i64, header: &str, category_id: i64) -> SourceProduct {
    SourceProduct::new(id, header)
        .with_category(category_id)
        .with_tier(tier(1, "standard", 2500))
        .with_tier(tier(2, "lux", 4000))
}

/// Two roots, one child of the first root, three products with two tiers each
pub fn sample_catalog() -> InMemoryCatalog {
    InMemoryCatalog::new()
        .with_category(SourceCategory::new(1, "Roses"))
        .with_category(SourceCategory::new(2, "Tulips").with_parent(0))
        .with_category(SourceCategory::new(3, "Red Roses").with_parent(1))
        .with_product(product(10, "Red Rose Bouquet", 3))
        .with_product(product(11, "White Roses", 1))
        .with_product(product(12, "Tulip Mix", 2))
}
