//! Source id to remote id resolution for one run

use std::collections::HashMap;

/// Remote ids assigned during a run.
///
/// Entries are only ever added, and only for entities the remote platform
/// confirmed. The mapping lives for a single run.
#[derive(Debug, Clone, Default)]
pub struct IdMapping {
    categories: HashMap<i64, String>,
    product_types: HashMap<String, String>,
}

impl IdMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_category(&mut self, source_id: i64, remote_id: impl Into<String>) {
        self.categories.entry(source_id).or_insert_with(|| remote_id.into());
    }

    pub fn category(&self, source_id: i64) -> Option<&str> {
        self.categories.get(&source_id).map(String::as_str)
    }

    pub fn record_product_type(&mut self, name: impl Into<String>, remote_id: impl Into<String>) {
        self.product_types
            .entry(name.into())
            .or_insert_with(|| remote_id.into());
    }

    pub fn product_type(&self, name: &str) -> Option<&str> {
        self.product_types.get(name).map(String::as_str)
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn product_type_count(&self) -> usize {
        self.product_types.len()
    }
}
