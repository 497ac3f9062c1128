//! Dependency-ordered export of the legacy catalog
//!
//! This module orchestrates a full run against the remote platform:
//! - Connectivity check (a failed check ends the run before any mutation)
//! - Categories, roots first and every parent before its children
//! - Product types from a fixed seed list
//! - Products in batches, each followed by one variant per price tier
//! - Optional channel pricing for every created variant
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_export::export::{ExportOptions, Exporter, ExporterConfig};
//!
//! let config = ExporterConfig::new().with_batch_size(20).with_delay_secs(0.5);
//! let mut exporter = Exporter::new(client, catalog, config)?;
//!
//! let report = exporter.export_all(&ExportOptions::new().with_limit(100));
//! println!("{}", report.summary());
//! ```
//!
//! # Failure handling
//!
//! Entity-level failures (a payload `errors` array, a missing parent or category,
//! a transport error while creating one entity) are logged with the source id and
//! counted in [`RunStats`]; the run continues. Run-level failures (connectivity,
//! a category cycle, an unreadable catalog) end the run with `success: false`.
//! There are no retries and no resumption: a rerun creates the entities again.

mod config;
mod error;
mod exporter;
mod id_mapping;
mod ordering;
mod pacer;
mod stats;

pub use config::{ExportOptions, ExportState, ExporterConfig, ProductTypeSeed};
pub use error::{ExportError, ExportResult};
pub use exporter::Exporter;
pub use id_mapping::IdMapping;
pub use ordering::order_child_categories;
pub use pacer::Pacer;
pub use stats::{Counter, ExportReport, RunStats};
