//! Command line flags

use std::path::PathBuf;

use clap::Parser;

/// Export a legacy catalog to a GraphQL commerce platform
#[derive(Debug, Parser)]
#[command(name = "catalog-export", version, about)]
pub struct Args {
    /// GraphQL endpoint URL
    #[arg(short, long, env = "CATALOG_EXPORT_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Bearer token for the GraphQL endpoint
    #[arg(short, long, env = "CATALOG_EXPORT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Snapshot of the legacy catalog tables (.json, .yaml or .yml)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// TOML file with default settings; flags take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Skip category export
    #[arg(long)]
    pub no_categories: bool,

    /// Skip product type creation
    #[arg(long)]
    pub no_product_types: bool,

    /// Only export these product ids (comma separated)
    #[arg(short, long, value_delimiter = ',', num_args = 1..)]
    pub products: Option<Vec<i64>>,

    /// Export at most this many products
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Products per progress batch
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Pause after each mutation, in seconds
    #[arg(short, long)]
    pub delay: Option<f64>,

    /// Publish variant prices to a sales channel
    #[arg(long)]
    pub channel_pricing: bool,

    /// Channel id for variant prices (implies --channel-pricing)
    #[arg(long)]
    pub channel: Option<String>,

    /// Append logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Only check connectivity to the endpoint
    #[arg(long)]
    pub test_connection: bool,

    /// Write run statistics to this file
    #[arg(long)]
    pub stats: Option<PathBuf>,
}
