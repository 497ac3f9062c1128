//! Interpreting GraphQL response bodies
//!
//! A mutation is accepted only when the top-level `errors` array is absent or empty,
//! the payload `errors` array is absent or empty, and the payload carries the
//! created entity with an `id`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::documents::MutationSpec;

/// One entry of a GraphQL `errors` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlError {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

impl std::fmt::Display for GraphQlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = self.message.as_deref().unwrap_or("unknown error");
        match (&self.field, &self.code) {
            (Some(field), Some(code)) => write!(f, "{field}: {message} ({code})"),
            (Some(field), None) => write!(f, "{field}: {message}"),
            (None, Some(code)) => write!(f, "{message} ({code})"),
            (None, None) => write!(f, "{message}"),
        }
    }
}

/// Why a response was not accepted
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MutationFailure {
    /// Top-level GraphQL errors (syntax, auth, schema mismatch)
    #[error("GraphQL errors: {}", join(.0))]
    GraphQl(Vec<GraphQlError>),
    /// The mutation payload reported validation errors
    #[error("rejected: {}", join(.0))]
    Rejected(Vec<GraphQlError>),
    /// No errors reported, but no entity returned either
    #[error("no {0} returned")]
    MissingEntity(String),
    /// The data section did not have the expected shape
    #[error("unexpected response shape: {0}")]
    Malformed(String),
}

fn join(errors: &[GraphQlError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Entity read back from a successful mutation
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteEntity {
    pub id: String,
    pub name: Option<String>,
}

/// Parse an `errors` array, tolerating entries that are not objects
fn parse_errors(value: Option<&Value>) -> Vec<GraphQlError> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                serde_json::from_value(item.clone()).unwrap_or_else(|_| GraphQlError {
                    field: None,
                    message: Some(item.to_string()),
                    code: None,
                })
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Top-level GraphQL errors of a response
pub fn top_level_errors(response: &Value) -> Vec<GraphQlError> {
    parse_errors(response.get("errors"))
}

/// Check a mutation response and extract the created entity
pub fn parse_mutation(response: &Value, spec: &MutationSpec) -> Result<RemoteEntity, MutationFailure> {
    let errors = top_level_errors(response);
    if !errors.is_empty() {
        return Err(MutationFailure::GraphQl(errors));
    }

    let payload = response
        .get("data")
        .and_then(|data| data.get(spec.name))
        .filter(|payload| !payload.is_null())
        .ok_or_else(|| MutationFailure::Malformed(format!("missing data.{}", spec.name)))?;

    let errors = parse_errors(payload.get("errors"));
    if !errors.is_empty() {
        return Err(MutationFailure::Rejected(errors));
    }

    let entity = payload
        .get(spec.entity)
        .filter(|entity| !entity.is_null())
        .ok_or_else(|| MutationFailure::MissingEntity(spec.entity.to_string()))?;

    let id = entity
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| MutationFailure::MissingEntity(format!("{}.id", spec.entity)))?;

    Ok(RemoteEntity {
        id: id.to_string(),
        name: entity.get("name").and_then(Value::as_str).map(str::to_string),
    })
}

/// Nodes of a relay-style connection at `data.<field>.edges[].node`
pub fn connection_nodes<T: DeserializeOwned>(
    response: &Value,
    field: &str,
) -> Result<Vec<T>, MutationFailure> {
    let errors = top_level_errors(response);
    if !errors.is_empty() {
        return Err(MutationFailure::GraphQl(errors));
    }

    let edges = response
        .get("data")
        .and_then(|data| data.get(field))
        .and_then(|connection| connection.get("edges"))
        .and_then(Value::as_array)
        .ok_or_else(|| MutationFailure::Malformed(format!("missing data.{}.edges", field)))?;

    edges
        .iter()
        .filter_map(|edge| edge.get("node"))
        .map(|node| {
            serde_json::from_value(node.clone())
                .map_err(|e| MutationFailure::Malformed(format!("{} node: {}", field, e)))
        })
        .collect()
}

/// Items of a plain list at `data.<field>`
pub fn list_items<T: DeserializeOwned>(response: &Value, field: &str) -> Result<Vec<T>, MutationFailure> {
    let errors = top_level_errors(response);
    if !errors.is_empty() {
        return Err(MutationFailure::GraphQl(errors));
    }

    let items = response
        .get("data")
        .and_then(|data| data.get(field))
        .filter(|items| items.is_array())
        .ok_or_else(|| MutationFailure::Malformed(format!("missing data.{}", field)))?;

    serde_json::from_value(items.clone())
        .map_err(|e| MutationFailure::Malformed(format!("{}: {}", field, e)))
}

/// Product type as listed by the `productTypes` query
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTypeNode {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub has_variants: bool,
}

/// Channel as listed by the `channels` query
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelNode {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub currency_code: Option<String>,
}
