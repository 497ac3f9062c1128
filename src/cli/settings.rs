//! Run settings resolved from flags and an optional TOML file
//!
//! ```toml
//! endpoint = "https://shop.example.com/graphql/"
//! catalog = "catalog.yaml"
//! timeout_secs = 60
//!
//! [exporter]
//! batch_size = 20
//! delay_secs = 0.5
//! channel_pricing = true
//! ```
//!
//! Flags (and their environment variables) take precedence over the file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::args::Args;
use super::error::CliError;
use crate::export::{ExportOptions, ExporterConfig};
use crate::remote::ClientConfig;

/// Contents of a `--config` file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileSettings {
    pub endpoint: Option<String>,
    pub token: Option<String>,
    pub catalog: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub stats: Option<PathBuf>,
    pub exporter: ExporterConfig,
}

impl FileSettings {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::FileReadError(path.to_path_buf(), e.to_string()))?;
        Self::parse(path, &content)
    }

    fn parse(path: &Path, content: &str) -> Result<Self, CliError> {
        toml::from_str(content)
            .map_err(|e| CliError::ConfigParseError(path.to_path_buf(), e.to_string()))
    }
}

/// Everything a run needs, after merging flags over the config file
#[derive(Debug, Clone)]
pub struct Settings {
    pub client: ClientConfig,
    pub exporter: ExporterConfig,
    pub options: ExportOptions,
    /// Catalog snapshot; `None` only in connection-test mode
    pub catalog: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub stats_file: Option<PathBuf>,
    pub debug: bool,
    pub test_connection: bool,
}

impl Settings {
    /// Load the config file named by `--config`, if any, and merge the flags over it
    pub fn from_args(args: &Args) -> Result<Self, CliError> {
        let file = match args.config {
            Some(ref path) => FileSettings::load(path)?,
            None => FileSettings::default(),
        };
        Self::resolve(args, file)
    }

    pub fn resolve(args: &Args, file: FileSettings) -> Result<Self, CliError> {
        let endpoint = args.endpoint.clone().or(file.endpoint).ok_or_else(|| {
            CliError::InvalidArgument(
                "--endpoint (or CATALOG_EXPORT_ENDPOINT) is required".to_string(),
            )
        })?;
        let token = args.token.clone().or(file.token).ok_or_else(|| {
            CliError::InvalidArgument("--token (or CATALOG_EXPORT_TOKEN) is required".to_string())
        })?;

        let mut client = ClientConfig::new(endpoint).with_token(token);
        if let Some(timeout) = file.timeout_secs {
            client = client.with_timeout(timeout);
        }
        client.validate().map_err(CliError::InvalidArgument)?;

        let catalog = args.catalog.clone().or(file.catalog);
        if catalog.is_none() && !args.test_connection {
            return Err(CliError::InvalidArgument(
                "--catalog is required unless --test-connection is given".to_string(),
            ));
        }

        let mut exporter = file.exporter;
        if let Some(batch_size) = args.batch_size {
            exporter = exporter.with_batch_size(batch_size);
        }
        if let Some(delay) = args.delay {
            exporter = exporter.with_delay_secs(delay);
        }
        if args.channel_pricing || args.channel.is_some() {
            let channel = args.channel.clone().or(exporter.channel_id.take());
            exporter = exporter.with_channel_pricing(channel);
        }
        exporter.validate().map_err(CliError::InvalidArgument)?;

        let options = ExportOptions {
            export_categories: !args.no_categories,
            create_product_types: !args.no_product_types,
            product_ids: args.products.clone(),
            limit: args.limit,
        };

        Ok(Self {
            client,
            exporter,
            options,
            catalog,
            log_file: args.log_file.clone().or(file.log_file),
            stats_file: args.stats.clone().or(file.stats),
            debug: args.debug,
            test_connection: args.test_connection,
        })
    }
}
