//! CLI command implementations

pub mod connection;
pub mod export;

pub use connection::handle_test_connection;
pub use export::handle_export;
