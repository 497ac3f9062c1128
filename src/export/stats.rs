//! Run statistics and the final report

use std::fmt::Write as _;
use std::path::Path;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use super::config::ExportState;
use super::error::{ExportError, ExportResult};

/// Counters tracked during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    CategoriesProcessed,
    CategoriesCreated,
    CategoriesSkipped,
    CategoriesErrors,
    ProductTypesCreated,
    ProductTypesErrors,
    ProductsProcessed,
    ProductsCreated,
    ProductsSkipped,
    ProductsErrors,
    VariantsCreated,
    VariantsErrors,
    ChannelListingsCreated,
    ChannelListingsErrors,
}

impl Counter {
    /// All counters in report order
    pub fn all() -> [Self; 14] {
        [
            Self::CategoriesProcessed,
            Self::CategoriesCreated,
            Self::CategoriesSkipped,
            Self::CategoriesErrors,
            Self::ProductTypesCreated,
            Self::ProductTypesErrors,
            Self::ProductsProcessed,
            Self::ProductsCreated,
            Self::ProductsSkipped,
            Self::ProductsErrors,
            Self::VariantsCreated,
            Self::VariantsErrors,
            Self::ChannelListingsCreated,
            Self::ChannelListingsErrors,
        ]
    }

    /// Get counter name
    pub fn name(&self) -> &'static str {
        match self {
            Self::CategoriesProcessed => "categories_processed",
            Self::CategoriesCreated => "categories_created",
            Self::CategoriesSkipped => "categories_skipped",
            Self::CategoriesErrors => "categories_errors",
            Self::ProductTypesCreated => "product_types_created",
            Self::ProductTypesErrors => "product_types_errors",
            Self::ProductsProcessed => "products_processed",
            Self::ProductsCreated => "products_created",
            Self::ProductsSkipped => "products_skipped",
            Self::ProductsErrors => "products_errors",
            Self::VariantsCreated => "variants_created",
            Self::VariantsErrors => "variants_errors",
            Self::ChannelListingsCreated => "channel_listings_created",
            Self::ChannelListingsErrors => "channel_listings_errors",
        }
    }
}

/// Per-entity counters of one export run.
///
/// Counters only go up; there is no way to reset or decrement them.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    start_time: DateTime<Utc>,
    #[serde(skip)]
    started: Instant,
    categories_processed: u64,
    categories_created: u64,
    categories_skipped: u64,
    categories_errors: u64,
    product_types_created: u64,
    product_types_errors: u64,
    products_processed: u64,
    products_created: u64,
    products_skipped: u64,
    products_errors: u64,
    variants_created: u64,
    variants_errors: u64,
    channel_listings_created: u64,
    channel_listings_errors: u64,
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}

impl RunStats {
    /// Start counting now
    pub fn new() -> Self {
        Self {
            start_time: Utc::now(),
            started: Instant::now(),
            categories_processed: 0,
            categories_created: 0,
            categories_skipped: 0,
            categories_errors: 0,
            product_types_created: 0,
            product_types_errors: 0,
            products_processed: 0,
            products_created: 0,
            products_skipped: 0,
            products_errors: 0,
            variants_created: 0,
            variants_errors: 0,
            channel_listings_created: 0,
            channel_listings_errors: 0,
        }
    }

    fn slot(&mut self, counter: Counter) -> &mut u64 {
        match counter {
            Counter::CategoriesProcessed => &mut self.categories_processed,
            Counter::CategoriesCreated => &mut self.categories_created,
            Counter::CategoriesSkipped => &mut self.categories_skipped,
            Counter::CategoriesErrors => &mut self.categories_errors,
            Counter::ProductTypesCreated => &mut self.product_types_created,
            Counter::ProductTypesErrors => &mut self.product_types_errors,
            Counter::ProductsProcessed => &mut self.products_processed,
            Counter::ProductsCreated => &mut self.products_created,
            Counter::ProductsSkipped => &mut self.products_skipped,
            Counter::ProductsErrors => &mut self.products_errors,
            Counter::VariantsCreated => &mut self.variants_created,
            Counter::VariantsErrors => &mut self.variants_errors,
            Counter::ChannelListingsCreated => &mut self.channel_listings_created,
            Counter::ChannelListingsErrors => &mut self.channel_listings_errors,
        }
    }

    pub fn increment(&mut self, counter: Counter) {
        *self.slot(counter) += 1;
    }

    pub fn get(&self, counter: Counter) -> u64 {
        match counter {
            Counter::CategoriesProcessed => self.categories_processed,
            Counter::CategoriesCreated => self.categories_created,
            Counter::CategoriesSkipped => self.categories_skipped,
            Counter::CategoriesErrors => self.categories_errors,
            Counter::ProductTypesCreated => self.product_types_created,
            Counter::ProductTypesErrors => self.product_types_errors,
            Counter::ProductsProcessed => self.products_processed,
            Counter::ProductsCreated => self.products_created,
            Counter::ProductsSkipped => self.products_skipped,
            Counter::ProductsErrors => self.products_errors,
            Counter::VariantsCreated => self.variants_created,
            Counter::VariantsErrors => self.variants_errors,
            Counter::ChannelListingsCreated => self.channel_listings_created,
            Counter::ChannelListingsErrors => self.channel_listings_errors,
        }
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Sum of all `*_errors` counters
    pub fn total_errors(&self) -> u64 {
        self.categories_errors
            + self.product_types_errors
            + self.products_errors
            + self.variants_errors
            + self.channel_listings_errors
    }

    /// `(name, value)` pairs in report order
    pub fn entries(&self) -> Vec<(&'static str, u64)> {
        Counter::all()
            .into_iter()
            .map(|counter| (counter.name(), self.get(counter)))
            .collect()
    }

    /// Log duration and every counter
    pub fn log_final_stats(&self) {
        info!(
            duration_secs = self.elapsed().as_secs_f64(),
            categories_processed = self.categories_processed,
            categories_created = self.categories_created,
            categories_skipped = self.categories_skipped,
            categories_errors = self.categories_errors,
            product_types_created = self.product_types_created,
            product_types_errors = self.product_types_errors,
            products_processed = self.products_processed,
            products_created = self.products_created,
            products_skipped = self.products_skipped,
            products_errors = self.products_errors,
            variants_created = self.variants_created,
            variants_errors = self.variants_errors,
            channel_listings_created = self.channel_listings_created,
            channel_listings_errors = self.channel_listings_errors,
            "Export statistics"
        );
    }
}

/// Outcome of [`Exporter::export_all`](super::Exporter::export_all)
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    /// `true` when the run completed, even with entity-level errors
    pub success: bool,
    pub stats: RunStats,
    pub duration: Duration,
    /// Fatal error that ended the run
    pub error: Option<String>,
    pub run_id: String,
    /// Last state reached
    pub state: ExportState,
}

impl ExportReport {
    /// Get formatted duration
    pub fn duration_formatted(&self) -> String {
        let secs = self.duration.as_secs();
        let mins = secs / 60;
        let remaining_secs = secs % 60;

        if mins > 0 {
            format!("{}m {}s", mins, remaining_secs)
        } else {
            format!("{}s", secs)
        }
    }

    /// Human-readable summary block
    pub fn summary(&self) -> String {
        let s = &self.stats;
        let status = if self.success { "success" } else { "failed" };
        let mut out = String::new();

        let _ = writeln!(out, "Export {} - {}", self.run_id, status);
        let _ = writeln!(out, "Duration: {}", self.duration_formatted());
        let _ = writeln!(
            out,
            "Categories: {} processed, {} created, {} skipped, {} errors",
            s.categories_processed, s.categories_created, s.categories_skipped, s.categories_errors
        );
        let _ = writeln!(
            out,
            "Product types: {} created, {} errors",
            s.product_types_created, s.product_types_errors
        );
        let _ = writeln!(
            out,
            "Products: {} processed, {} created, {} skipped, {} errors",
            s.products_processed, s.products_created, s.products_skipped, s.products_errors
        );
        let _ = writeln!(
            out,
            "Variants: {} created, {} errors",
            s.variants_created, s.variants_errors
        );
        if s.channel_listings_created + s.channel_listings_errors > 0 {
            let _ = writeln!(
                out,
                "Channel listings: {} created, {} errors",
                s.channel_listings_created, s.channel_listings_errors
            );
        }
        if let Some(ref error) = self.error {
            let _ = writeln!(out, "Error: {}", error);
        }
        out
    }

    /// Write the statistics file: comment header, then `key: value` lines
    pub fn write_stats_file(&self, path: impl AsRef<Path>) -> ExportResult<()> {
        let path = path.as_ref();
        let mut content = String::new();

        let _ = writeln!(content, "# Catalog Export Statistics");
        let _ = writeln!(content, "# Generated at: {}", Utc::now().to_rfc3339());
        let _ = writeln!(content);
        let _ = writeln!(content, "run_id: {}", self.run_id);
        let _ = writeln!(content, "success: {}", self.success);
        let _ = writeln!(content, "state: {}", self.state);
        let _ = writeln!(content, "start_time: {}", self.stats.start_time().to_rfc3339());
        let _ = writeln!(content, "duration_secs: {:.1}", self.duration.as_secs_f64());
        for (name, value) in self.stats.entries() {
            let _ = writeln!(content, "{}: {}", name, value);
        }
        if let Some(ref error) = self.error {
            let _ = writeln!(content, "error: {}", error);
        }

        std::fs::write(path, content)
            .map_err(|e| ExportError::io_with_path(path, "writing statistics", e))
    }
}
