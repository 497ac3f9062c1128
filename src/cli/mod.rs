//! CLI module for the catalog-export binary

#[cfg(feature = "cli")]
pub mod args;
#[cfg(feature = "cli")]
pub mod commands;
#[cfg(feature = "cli")]
pub mod error;
#[cfg(feature = "cli")]
pub mod logging;
#[cfg(feature = "cli")]
pub mod output;
#[cfg(feature = "cli")]
pub mod settings;

#[cfg(feature = "cli")]
pub use args::Args;
#[cfg(feature = "cli")]
pub use error::CliError;
#[cfg(feature = "cli")]
pub use settings::{FileSettings, Settings};
