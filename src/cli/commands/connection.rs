//! Connection test command implementation

use crate::cli::error::CliError;
use crate::cli::settings::Settings;
use crate::export::Exporter;
use crate::remote::HttpGraphQlClient;
use crate::source::InMemoryCatalog;

/// Handle `--test-connection`; returns whether the endpoint answered
pub fn handle_test_connection(settings: &Settings) -> Result<bool, CliError> {
    let client = HttpGraphQlClient::new(settings.client.clone())?;
    let exporter = Exporter::new(client, InMemoryCatalog::new(), settings.exporter.clone())?;

    let connected = exporter.test_connection();
    if connected {
        println!("Connection to {} OK", settings.client.endpoint);
    } else {
        eprintln!("Connection to {} failed", settings.client.endpoint);
    }
    Ok(connected)
}
