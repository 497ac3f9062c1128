//! Remote commerce platform access over GraphQL
//!
//! The exporter talks to the remote platform only through [`GraphQlTransport`].
//! [`HttpGraphQlClient`] is the HTTPS implementation; tests drive the exporter with
//! recording fakes.
//!
//! GraphQL-level errors are not transport errors: a `200` response carrying an
//! `errors` array is returned as data, and [`response`] helpers decide whether a
//! mutation succeeded.

use serde_json::Value;

pub mod client;
pub mod documents;
pub mod response;

pub use client::{ClientConfig, HttpGraphQlClient};
pub use response::{GraphQlError, MutationFailure, RemoteEntity};

/// Error type for remote calls
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The endpoint answered with a non-200 status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    /// Connection failure, timeout or other network error
    #[error("Transport error: {0}")]
    Transport(String),
    /// The body of a 200 response was not valid JSON
    #[error("Invalid JSON response: {0}")]
    ResponseParse(String),
}

impl RemoteError {
    /// HTTP status code if the endpoint answered
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Trait for GraphQL transports
pub trait GraphQlTransport {
    /// Execute one GraphQL document with its variables and return the parsed body
    fn execute(&self, query: &str, variables: Value) -> Result<Value, RemoteError>;
}

impl<T: GraphQlTransport + ?Sized> GraphQlTransport for &T {
    fn execute(&self, query: &str, variables: Value) -> Result<Value, RemoteError> {
        (**self).execute(query, variables)
    }
}

impl<T: GraphQlTransport + ?Sized> GraphQlTransport for Box<T> {
    fn execute(&self, query: &str, variables: Value) -> Result<Value, RemoteError> {
        (**self).execute(query, variables)
    }
}
