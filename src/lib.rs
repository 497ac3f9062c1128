//! Catalog Export - migrate a legacy commerce catalog to a GraphQL commerce platform
//!
//! Provides:
//! - Typed source records and read access to the legacy catalog ([`source`])
//! - Pure mapping from source records to mutation inputs ([`mapping`])
//! - A GraphQL transport with an HTTPS implementation ([`remote`])
//! - The dependency-ordered exporter, pacing and run statistics ([`export`])
//!
//! The library never installs a tracing subscriber; that is left to the binary
//! or the embedding application.

#[cfg(feature = "cli")]
pub mod cli;
pub mod export;
pub mod mapping;
pub mod models;
pub mod remote;
pub mod source;

pub use export::{
    ExportError, ExportOptions, ExportReport, ExportState, Exporter, ExporterConfig, RunStats,
};
pub use mapping::slugify;
pub use models::{PriceTier, SourceCategory, SourceProduct};
pub use remote::{ClientConfig, GraphQlTransport, HttpGraphQlClient, RemoteError};
pub use source::{CatalogSnapshot, CatalogSource, InMemoryCatalog, ProductFilter, SourceError};
