//! Document model for the unified (v2-shaped) OpenAPI spec, plus the
//! v3 -> v2 normalizer that feeds it.

mod normalize;
mod parameter;
mod path;
mod schema;
mod spec;

pub use normalize::normalize;
pub use parameter::{Location, Parameter};
pub use path::{HttpMethod, MediaType, Operation, PathItem, RequestBody, Response};
pub use schema::{AdditionalProperties, Schema};
pub use spec::{Info, Swagger};

use crate::error::ParseError;

/// Normalize and deserialize an already-parsed document.
pub fn from_value(doc: serde_json::Value) -> Result<Swagger, ParseError> {
    let normalized = normalize(doc);
    if !normalized.is_object() {
        return Err(ParseError::NotAnOpenApiDocument);
    }
    Ok(serde_json::from_value(normalized)?)
}

/// Parse a JSON document and normalize it.
pub fn from_json(input: &str) -> Result<Swagger, ParseError> {
    let doc: serde_json::Value = serde_json::from_str(input)?;
    from_value(doc)
}

/// Parse a YAML document and normalize it.
pub fn from_yaml(input: &str) -> Result<Swagger, ParseError> {
    let doc: serde_json::Value = serde_yaml_ng::from_str(input)?;
    from_value(doc)
}
