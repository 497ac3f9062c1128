//! Export command implementation

use tracing::{info, warn};

use crate::cli::error::CliError;
use crate::cli::output::format_report;
use crate::cli::settings::Settings;
use crate::export::{ExportReport, Exporter};
use crate::remote::HttpGraphQlClient;
use crate::source::CatalogSnapshot;

/// Handle a full export run and return its report
pub fn handle_export(settings: &Settings) -> Result<ExportReport, CliError> {
    let catalog_path = settings.catalog.as_deref().ok_or_else(|| {
        CliError::InvalidArgument("--catalog is required for an export run".to_string())
    })?;

    info!(catalog = %catalog_path.display(), "Loading catalog snapshot");
    let catalog = CatalogSnapshot::from_path(catalog_path)?.into_catalog();

    let client = HttpGraphQlClient::new(settings.client.clone())?;
    info!(endpoint = %client.endpoint(), "Exporting to remote platform");

    let mut exporter = Exporter::new(client, catalog, settings.exporter.clone())?;
    let report = exporter.export_all(&settings.options);

    eprint!("{}", format_report(&report));

    if let Some(ref path) = settings.stats_file {
        match report.write_stats_file(path) {
            Ok(()) => info!(path = %path.display(), "Statistics written"),
            Err(e) => warn!(error = %e, "Could not write statistics file"),
        }
    }

    Ok(report)
}
